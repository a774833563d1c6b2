const MAX_VISIBLE_CHARS: usize = 100;
const MIN_REDACTED_DIGITS: usize = 8;

/// Shortens free text for logging and masks credentials and long digit runs
/// such as account or card numbers.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}... ({total_chars} chars total)", &trimmed[..cut]),
        None => trimmed.to_string(),
    };

    redact_digit_runs(&redact_credentials(&visible))
}

fn redact_credentials(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("apikey=", "apikey=[REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}

/// Keeps the last four digits of any run of `MIN_REDACTED_DIGITS` or more.
fn redact_digit_runs(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        flush_run(&mut result, &mut run);
        result.push(c);
    }
    flush_run(&mut result, &mut run);

    result
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.len() >= MIN_REDACTED_DIGITS {
        out.push_str("[REDACTED]");
        out.push_str(&run[run.len() - 4..]);
    } else {
        out.push_str(run);
    }
    run.clear();
}

