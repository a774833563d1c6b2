use std::io::{Cursor, Read, Seek};
use std::path::Path;

use async_trait::async_trait;
use calamine::{Data, Range, Reader, Xlsx};

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat, SpreadsheetDialect};

use super::delimiter_sniffer::detect_delimiter;
use super::staged_file::read_staged;
use super::text_table::TextTable;

pub const DEFAULT_MAX_PREVIEW_ROWS: usize = 200;

/// Renders delimited text and workbooks as a bounded fixed-width preview.
#[derive(Debug, Clone, Copy)]
pub struct TabularPreviewer {
    max_rows: usize,
}

impl TabularPreviewer {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    pub fn preview_delimited(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        let delimiter = detect_delimiter(data);
        tracing::debug!(delimiter = %char::from(delimiter).escape_default(), "Delimiter detected");

        let table = self.parse_delimited(data, delimiter)?;
        Ok(self.finish(table))
    }

    /// Only the first sheet is read.
    pub fn preview_spreadsheet(
        &self,
        data: &[u8],
        dialect: SpreadsheetDialect,
    ) -> Result<String, FileLoaderError> {
        let range = match dialect {
            SpreadsheetDialect::Xlsx => {
                let workbook = Xlsx::new(Cursor::new(data)).map_err(|e| {
                    FileLoaderError::TabularParseFailure(format!("failed to parse XLSX: {e}"))
                })?;
                first_sheet(workbook)?
            }
            SpreadsheetDialect::Xls => open_xls_first_sheet(data)?,
        };

        let table = self.table_from_range(&range)?;
        Ok(self.finish(table))
    }

    fn parse_delimited(&self, data: &[u8], delimiter: u8) -> Result<TextTable, FileLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| {
                FileLoaderError::TabularParseFailure("no columns to parse from file".to_string())
            })?
            .map_err(csv_failure)?;

        if header.iter().all(|field| field.trim().is_empty()) {
            return Err(FileLoaderError::TabularParseFailure(
                "no columns to parse from file".to_string(),
            ));
        }

        let mut table = TextTable::new(header.iter().map(|f| Some(f.to_string())).collect());

        for record in records {
            let record = record.map_err(csv_failure)?;

            if record.len() > table.width() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(FileLoaderError::TabularParseFailure(format!(
                    "expected {} fields in line {line}, saw {}",
                    table.width(),
                    record.len()
                )));
            }

            let cells = record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect();
            table.push_row(cells, self.max_rows);
        }

        Ok(table)
    }

    /// The range starts at the first used cell; blank leading columns are restored.
    fn table_from_range(&self, range: &Range<Data>) -> Result<TextTable, FileLoaderError> {
        let leading_blank = range.start().map_or(0, |(_, column)| column as usize);
        let cells = |row: &[Data]| -> Vec<Option<String>> {
            std::iter::repeat_n(None, leading_blank)
                .chain(row.iter().map(format_cell))
                .collect()
        };

        let mut rows = range.rows();

        let header = rows.next().ok_or_else(|| {
            FileLoaderError::TabularParseFailure("first sheet is empty".to_string())
        })?;

        let mut table = TextTable::new(cells(header));
        for row in rows {
            table.push_row(cells(row), self.max_rows);
        }

        Ok(table)
    }

    fn finish(&self, table: TextTable) -> String {
        if table.total_rows() > table.kept_rows() {
            tracing::debug!(
                total_rows = table.total_rows(),
                kept_rows = table.kept_rows(),
                "Tabular preview capped"
            );
        }
        table.render()
    }
}

impl Default for TabularPreviewer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PREVIEW_ROWS)
    }
}

#[async_trait]
impl FileLoader for TabularPreviewer {
    #[tracing::instrument(
        skip(self, staged),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract_text(
        &self,
        staged: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let data = read_staged(staged).await?;
        let previewer = *self;
        let format = document.format;

        tokio::task::spawn_blocking(move || match format {
            DocumentFormat::Csv => previewer.preview_delimited(&data),
            DocumentFormat::Xlsx => previewer.preview_spreadsheet(&data, SpreadsheetDialect::Xlsx),
            DocumentFormat::Xls => previewer.preview_spreadsheet(&data, SpreadsheetDialect::Xls),
            other => Err(FileLoaderError::UnsupportedFormat(
                other.extension().to_string(),
            )),
        })
        .await
        .map_err(|e| FileLoaderError::TabularParseFailure(format!("parse task failed: {e}")))?
    }
}

fn csv_failure(error: csv::Error) -> FileLoaderError {
    FileLoaderError::TabularParseFailure(error.to_string())
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Range<Data>, FileLoaderError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FileLoaderError::TabularParseFailure("workbook has no sheets".to_string()))?
        .map_err(|e| FileLoaderError::TabularParseFailure(format!("failed to read first sheet: {e}")))
}

#[cfg(feature = "legacy-xls")]
fn open_xls_first_sheet(data: &[u8]) -> Result<Range<Data>, FileLoaderError> {
    let workbook = calamine::Xls::new(Cursor::new(data))
        .map_err(|e| FileLoaderError::TabularParseFailure(format!("failed to parse XLS: {e}")))?;
    first_sheet(workbook)
}

#[cfg(not(feature = "legacy-xls"))]
fn open_xls_first_sheet(_data: &[u8]) -> Result<Range<Data>, FileLoaderError> {
    Err(FileLoaderError::MissingDependency(
        "the .xls engine is not built in; rebuild with the `legacy-xls` feature".to_string(),
    ))
}

fn format_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("#ERR {e:?}")),
    }
}
