use finsight::application::ports::{FileLoader, FileLoaderError};
use finsight::domain::{Document, DocumentFormat, SpreadsheetDialect};
use finsight::infrastructure::text_processing::{StagedFile, TabularPreviewer};

use crate::helpers::build_xlsx;

#[test]
fn given_semicolon_csv_when_previewing_then_renders_separate_columns() {
    let data = "date;amount;memo\n2024-01-02;1200;rent\n2024-01-03;80;coffee\n";

    let text = TabularPreviewer::default()
        .preview_delimited(data.as_bytes())
        .unwrap();

    assert_eq!(
        text,
        "      date  amount    memo\n2024-01-02    1200    rent\n2024-01-03      80  coffee"
    );
}

#[test]
fn given_short_rows_when_previewing_then_missing_cells_render_as_nan() {
    let text = TabularPreviewer::default()
        .preview_delimited(b"a,b,c\n1,2\n")
        .unwrap();

    assert_eq!(text, "a  b    c\n1  2  NaN");
}

#[test]
fn given_row_with_extra_fields_when_previewing_then_reports_line() {
    let result = TabularPreviewer::default().preview_delimited(b"a,b\n1,2\n3,4,5\n");

    match result {
        Err(FileLoaderError::TabularParseFailure(msg)) => {
            assert!(msg.contains("line 3"), "unexpected message: {msg}");
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn given_empty_file_when_previewing_then_reports_no_columns() {
    let result = TabularPreviewer::default().preview_delimited(b"");
    assert!(matches!(result, Err(FileLoaderError::TabularParseFailure(msg)) if msg.contains("no columns")));
}

#[test]
fn given_invalid_utf8_when_previewing_then_parse_fails() {
    let result = TabularPreviewer::default().preview_delimited(b"name,amount\n\xff\xfe,1\n");
    assert!(matches!(result, Err(FileLoaderError::TabularParseFailure(_))));
}

#[test]
fn given_more_rows_than_cap_when_previewing_then_renders_only_cap() {
    let mut data = String::from("n\n");
    for n in 0..300 {
        data.push_str(&format!("{n}\n"));
    }

    let text = TabularPreviewer::new(200)
        .preview_delimited(data.as_bytes())
        .unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 201);
    assert_eq!(lines[200].trim(), "199");
}

#[test]
fn given_xlsx_workbook_when_previewing_then_renders_first_sheet() {
    let workbook = build_xlsx(&[
        &["account", "balance"],
        &["checking", "1500"],
        &["savings", "12.5"],
    ]);

    let text = TabularPreviewer::default()
        .preview_spreadsheet(&workbook, SpreadsheetDialect::Xlsx)
        .unwrap();

    assert_eq!(
        text,
        " account  balance\nchecking     1500\n savings     12.5"
    );
}

#[test]
fn given_xlsx_with_blank_cell_when_previewing_then_renders_nan() {
    let workbook = build_xlsx(&[&["a", "b"], &["x", ""], &["y", "2"]]);

    let text = TabularPreviewer::default()
        .preview_spreadsheet(&workbook, SpreadsheetDialect::Xlsx)
        .unwrap();

    assert_eq!(text, "a    b\nx  NaN\ny    2");
}

#[test]
fn given_xlsx_with_blank_first_column_when_previewing_then_keeps_it_unnamed() {
    let workbook = build_xlsx(&[&["", "amount"], &["", "5"]]);

    let text = TabularPreviewer::default()
        .preview_spreadsheet(&workbook, SpreadsheetDialect::Xlsx)
        .unwrap();

    assert_eq!(text, "Unnamed: 0  amount\n       NaN       5");
}

#[test]
fn given_semicolon_csv_with_multiline_quoted_cell_when_previewing_then_keeps_columns() {
    let text = TabularPreviewer::default()
        .preview_delimited(b"a;b\n\"x\ny\";2\n3;4\n")
        .unwrap();

    let header: Vec<&str> = text.lines().next().unwrap().split_whitespace().collect();
    assert_eq!(header, vec!["a", "b"]);
    assert!(!text.contains(';'), "delimiter left in cells: {text}");
}

#[test]
fn given_corrupt_workbook_when_previewing_then_parse_fails() {
    let result = TabularPreviewer::default()
        .preview_spreadsheet(b"not a zip archive", SpreadsheetDialect::Xlsx);
    assert!(matches!(result, Err(FileLoaderError::TabularParseFailure(_))));
}

#[cfg(feature = "legacy-xls")]
#[test]
fn given_corrupt_xls_when_previewing_then_parse_fails() {
    let result = TabularPreviewer::default()
        .preview_spreadsheet(b"not a compound file", SpreadsheetDialect::Xls);
    assert!(matches!(result, Err(FileLoaderError::TabularParseFailure(_))));
}

#[cfg(not(feature = "legacy-xls"))]
#[test]
fn given_xls_without_engine_when_previewing_then_reports_missing_dependency() {
    let result = TabularPreviewer::default().preview_spreadsheet(b"", SpreadsheetDialect::Xls);
    assert!(matches!(result, Err(FileLoaderError::MissingDependency(_))));
}

#[tokio::test]
async fn given_staged_csv_when_loading_then_reads_file_and_previews() {
    let staged = StagedFile::stage(b"x|y\n1|2\n", "csv").unwrap();
    let document = Document::new("pipes.csv".to_string(), DocumentFormat::Csv, 8);

    let text = TabularPreviewer::default()
        .extract_text(staged.path(), &document)
        .await
        .unwrap();

    assert_eq!(text, "x  y\n1  2");
}
