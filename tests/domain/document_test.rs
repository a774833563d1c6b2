use finsight::domain::{
    Document, DocumentFormat, DocumentKind, ExtractionResult, SpreadsheetDialect,
};

#[test]
fn given_supported_extensions_when_resolving_then_maps_each_format() {
    assert_eq!(DocumentFormat::from_filename("scan.png"), Some(DocumentFormat::Png));
    assert_eq!(DocumentFormat::from_filename("scan.jpg"), Some(DocumentFormat::Jpeg));
    assert_eq!(DocumentFormat::from_filename("scan.jpeg"), Some(DocumentFormat::Jpeg));
    assert_eq!(DocumentFormat::from_filename("report.pdf"), Some(DocumentFormat::Pdf));
    assert_eq!(DocumentFormat::from_filename("ledger.csv"), Some(DocumentFormat::Csv));
    assert_eq!(DocumentFormat::from_filename("ledger.xls"), Some(DocumentFormat::Xls));
    assert_eq!(DocumentFormat::from_filename("ledger.xlsx"), Some(DocumentFormat::Xlsx));
}

#[test]
fn given_uppercase_extension_when_resolving_then_ignores_case() {
    assert_eq!(DocumentFormat::from_filename("Q3 REPORT.PDF"), Some(DocumentFormat::Pdf));
    assert_eq!(DocumentFormat::from_filename("receipt.JpEg"), Some(DocumentFormat::Jpeg));
}

#[test]
fn given_unknown_or_missing_extension_when_resolving_then_returns_none() {
    assert_eq!(DocumentFormat::from_filename("report.xyz"), None);
    assert_eq!(DocumentFormat::from_filename("report"), None);
    assert_eq!(DocumentFormat::from_filename("archive.tar.gz"), None);
}

#[test]
fn given_double_extension_when_resolving_then_uses_last_one() {
    assert_eq!(DocumentFormat::from_filename("export.pdf.csv"), Some(DocumentFormat::Csv));
}

#[test]
fn given_formats_when_classified_then_only_tables_are_tabular() {
    assert_eq!(DocumentFormat::Png.kind(), DocumentKind::Image);
    assert_eq!(DocumentFormat::Pdf.kind(), DocumentKind::Pdf);
    assert!(DocumentFormat::Csv.kind().is_tabular());
    assert!(DocumentFormat::Xlsx.kind().is_tabular());
    assert!(!DocumentFormat::Jpeg.kind().is_tabular());
    assert!(!DocumentFormat::Pdf.kind().is_tabular());
}

#[test]
fn given_workbook_formats_when_asking_dialect_then_returns_engine() {
    assert_eq!(DocumentFormat::Xlsx.spreadsheet_dialect(), Some(SpreadsheetDialect::Xlsx));
    assert_eq!(DocumentFormat::Xls.spreadsheet_dialect(), Some(SpreadsheetDialect::Xls));
    assert_eq!(DocumentFormat::Csv.spreadsheet_dialect(), None);
}

#[test]
fn given_two_documents_when_created_then_ids_differ() {
    let first = Document::new("a.csv".to_string(), DocumentFormat::Csv, 10);
    let second = Document::new("a.csv".to_string(), DocumentFormat::Csv, 10);
    assert_ne!(first.id, second.id);
    assert_eq!(first.size_bytes, 10);
}

#[test]
fn given_multibyte_text_when_truncated_then_keeps_whole_characters() {
    let result = ExtractionResult::new("€".repeat(10), DocumentKind::Image).truncated(4);
    assert_eq!(result.text, "€€€€");
}

#[test]
fn given_short_text_when_truncated_then_unchanged() {
    let result = ExtractionResult::new("Total 42".to_string(), DocumentKind::Image).truncated(2000);
    assert_eq!(result.text, "Total 42");
}

#[test]
fn given_whitespace_text_when_checked_then_is_blank() {
    assert!(ExtractionResult::new(" \n\t".to_string(), DocumentKind::Pdf).is_blank());
    assert!(!ExtractionResult::new(" x ".to_string(), DocumentKind::Pdf).is_blank());
}
