use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::application::ports::FileLoaderError;

/// Upload bytes written to a private temporary file.
///
/// The file is removed when the value is dropped, whichever way the
/// extraction that owns it ends.
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    pub fn stage(data: &[u8], extension: &str) -> Result<Self, FileLoaderError> {
        let suffix = format!(".{extension}");
        let mut file = tempfile::Builder::new()
            .prefix("finsight-upload-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| FileLoaderError::Staging(format!("failed to create temp file: {e}")))?;

        file.write_all(data)
            .and_then(|_| file.flush())
            .map_err(|e| FileLoaderError::Staging(format!("failed to write temp file: {e}")))?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub(super) async fn read_staged(path: &Path) -> Result<Vec<u8>, FileLoaderError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| FileLoaderError::Staging(format!("failed to read staged upload: {e}")))
}
