use std::fmt::Write as FmtWrite;

const COLUMN_GAP: &str = "  ";
const MISSING_CELL: &str = "NaN";

/// Parsed table: a header row plus the leading data rows kept for preview.
#[derive(Debug, Clone, PartialEq)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    total_rows: usize,
}

impl TextTable {
    /// Blank header cells are named `Unnamed: <index>`.
    pub fn new(header: Vec<Option<String>>) -> Self {
        let header = header
            .into_iter()
            .enumerate()
            .map(|(index, name)| match name {
                Some(name) if !name.trim().is_empty() => name,
                _ => format!("Unnamed: {index}"),
            })
            .collect();

        Self {
            header,
            rows: Vec::new(),
            total_rows: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn kept_rows(&self) -> usize {
        self.rows.len()
    }

    /// Counts every row, keeps only the first `max_rows`. Short rows are padded.
    pub fn push_row(&mut self, mut cells: Vec<Option<String>>, max_rows: usize) {
        self.total_rows += 1;
        if self.rows.len() >= max_rows {
            return;
        }
        cells.resize(self.header.len(), None);
        self.rows.push(cells);
    }

    /// Fixed-width rendering: each column right-aligned to its widest cell.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_text(cell).chars().count());
            }
        }

        let mut out = String::new();
        write_line(&mut out, self.header.iter().map(String::as_str), &widths);
        for row in &self.rows {
            out.push('\n');
            write_line(&mut out, row.iter().map(cell_text), &widths);
        }
        out
    }
}

fn cell_text(cell: &Option<String>) -> &str {
    cell.as_deref().unwrap_or(MISSING_CELL)
}

fn write_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let start = out.len();
    for (index, (cell, &width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            out.push_str(COLUMN_GAP);
        }
        let _ = write!(out, "{cell:>width$}");
    }
    let trimmed_len = out[start..].trim_end().len();
    out.truncate(start + trimmed_len);
}
