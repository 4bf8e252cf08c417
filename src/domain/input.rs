use crate::error::ClassifyError;

/// Source label reported when the email body was typed rather than uploaded.
pub const DIRECT_TEXT_LABEL: &str = "Texto Direto";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The one input channel a caller used, resolved at the HTTP boundary.
#[derive(Debug, Clone)]
pub enum EmailInput {
    InlineText(String),
    FileUpload(UploadedFile),
}

/// Normalized email body plus where it came from. `raw_text` is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub raw_text: String,
    pub source_label: String,
}

impl ClassificationRequest {
    pub fn new(
        raw_text: impl Into<String>,
        source_label: impl Into<String>,
    ) -> Result<Self, ClassifyError> {
        let raw_text = raw_text.into();
        if raw_text.trim().is_empty() {
            return Err(ClassifyError::EmptyContent);
        }
        Ok(Self {
            raw_text,
            source_label: source_label.into(),
        })
    }
}
