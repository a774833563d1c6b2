use super::document::DocumentKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub kind: DocumentKind,
}

impl ExtractionResult {
    pub fn new(text: String, kind: DocumentKind) -> Self {
        Self { text, kind }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Keeps at most `max_chars` characters, never splitting a code point.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if let Some((byte_index, _)) = self.text.char_indices().nth(max_chars) {
            self.text.truncate(byte_index);
        }
        self
    }
}
