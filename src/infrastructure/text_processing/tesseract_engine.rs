use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{OcrEngine, OcrError};

pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the `tesseract` CLI, feeding the image on stdin and reading text from stdout.
pub struct TesseractEngine {
    command: String,
    language: String,
    timeout: Duration,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
            timeout,
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_CMD, DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l"])
            .arg(&self.language)
            .args(["-c", "page_separator="])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::EngineUnavailable(format!("{} is not installed: {e}", self.command))
                } else {
                    OcrError::RecognitionFailed(format!("failed to start {}: {e}", self.command))
                }
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::RecognitionFailed("tesseract stdin unavailable".to_string()))?;

        // Fed from a separate task so a full stdout pipe cannot stall the write.
        let input = image.to_vec();
        let feeder = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                OcrError::RecognitionFailed(format!(
                    "tesseract timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| OcrError::RecognitionFailed(format!("failed to wait for tesseract: {e}")))?;

        if let Ok(Err(e)) = feeder.await {
            tracing::debug!(error = %e, "tesseract closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::RecognitionFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
