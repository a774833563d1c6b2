use super::document_id::DocumentId;

/// Raw upload as received at the request boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Metadata handed to loaders once the upload format is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub format: DocumentFormat,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(filename: String, format: DocumentFormat, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            format,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Png,
    Jpeg,
    Pdf,
    Csv,
    Xls,
    Xlsx,
}

impl DocumentFormat {
    /// Resolves the format from the filename extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "pdf" => Some(Self::Pdf),
            "csv" => Some(Self::Csv),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Png | Self::Jpeg => DocumentKind::Image,
            Self::Pdf => DocumentKind::Pdf,
            Self::Csv => DocumentKind::Delimited,
            Self::Xls | Self::Xlsx => DocumentKind::Spreadsheet,
        }
    }

    pub fn spreadsheet_dialect(&self) -> Option<SpreadsheetDialect> {
        match self {
            Self::Xls => Some(SpreadsheetDialect::Xls),
            Self::Xlsx => Some(SpreadsheetDialect::Xlsx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Image,
    Pdf,
    Delimited,
    Spreadsheet,
}

impl DocumentKind {
    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Delimited | Self::Spreadsheet)
    }
}

/// Binary workbook sub-format; each one is read by its own engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetDialect {
    Xlsx,
    Xls,
}
