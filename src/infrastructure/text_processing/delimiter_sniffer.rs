use std::collections::HashMap;

/// Only this many leading bytes are inspected.
pub const SNIFF_SAMPLE_BYTES: usize = 1024;

/// Candidates in preference order; earlier wins a tie.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

pub const FALLBACK_DELIMITER: u8 = b',';

/// Share of sample records that must agree on the per-record delimiter count.
const MIN_CONSISTENCY: f64 = 0.9;

/// Picks the delimiter from a leading sample, or comma when the sample is inconclusive.
pub fn detect_delimiter(data: &[u8]) -> u8 {
    sniff_delimiter(data).unwrap_or(FALLBACK_DELIMITER)
}

/// A delimiter qualifies when it occurs the same non-zero number of times
/// (outside quotes) on nearly every sample record.
pub fn sniff_delimiter(data: &[u8]) -> Option<u8> {
    let records = sample_records(data);
    if records.is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64)> = None;

    for &delimiter in &CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = records
            .iter()
            .map(|record| count_unquoted(record, delimiter))
            .collect();

        let Some(modal) = modal_count(&counts) else {
            continue;
        };

        let agreeing = counts.iter().filter(|&&c| c == modal).count();
        let consistency = agreeing as f64 / records.len() as f64;
        if consistency < MIN_CONSISTENCY {
            continue;
        }

        tracing::trace!(
            delimiter = %char::from(delimiter).escape_default(),
            per_record = modal,
            consistency,
            "Delimiter candidate"
        );

        // Strictly greater, so an earlier candidate keeps a tie.
        if best.is_none_or(|(_, best_consistency)| consistency > best_consistency) {
            best = Some((delimiter, consistency));
        }
    }

    best.map(|(delimiter, _)| delimiter)
}

/// Splits the sample into records; a newline inside quotes belongs to the cell.
fn sample_records(data: &[u8]) -> Vec<&[u8]> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let sample_len = data.len().min(SNIFF_SAMPLE_BYTES);
    let sample = &data[..sample_len];

    let mut records: Vec<&[u8]> = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, &byte) in sample.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                records.push(&sample[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    records.push(&sample[start..]);

    let mut records: Vec<&[u8]> = records
        .into_iter()
        .map(|record| record.strip_suffix(b"\r").unwrap_or(record))
        .filter(|record| !record.iter().all(u8::is_ascii_whitespace))
        .collect();

    // The last record of a cut sample is usually partial.
    if sample_len < data.len() && records.len() > 1 {
        records.pop();
    }

    records
}

fn count_unquoted(record: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;

    for &byte in record {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }

    count
}

/// Most frequent count across records, larger count on ties; `None` if that is zero.
fn modal_count(counts: &[usize]) -> Option<usize> {
    let mut frequency: HashMap<usize, usize> = HashMap::new();
    for &count in counts {
        *frequency.entry(count).or_default() += 1;
    }

    frequency
        .into_iter()
        .max_by_key(|&(count, occurrences)| (occurrences, count))
        .map(|(count, _)| count)
        .filter(|&count| count > 0)
}
