use axum::extract::{multipart::MultipartError, Multipart};

use crate::{
    domain::{EmailInput, UploadedFile},
    error::ClassifyError,
};

const TEXT_FIELDS: [&str; 2] = ["text", "texto_direto"];
const FILE_FIELDS: [&str; 2] = ["file", "arquivo"];

/// Raw multipart fields before the input channel is decided.
#[derive(Debug, Default)]
pub struct EmailSubmission {
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
}

impl EmailSubmission {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ClassifyError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if TEXT_FIELDS.contains(&name.as_str()) {
                submission.text = Some(field.text().await.map_err(form_error)?);
            } else if FILE_FIELDS.contains(&name.as_str()) {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                // browsers send an empty part when no file was picked
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                submission.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            } else {
                tracing::debug!(target: "http", field = %name, "ignoring unknown form field");
            }
        }

        Ok(submission)
    }

    /// Non-blank inline text wins; otherwise the upload; otherwise nothing usable.
    pub fn into_input(self) -> Result<EmailInput, ClassifyError> {
        match (self.text, self.file) {
            (Some(text), _) if !text.trim().is_empty() => Ok(EmailInput::InlineText(text)),
            (_, Some(file)) => Ok(EmailInput::FileUpload(file)),
            _ => Err(ClassifyError::EmptyContent),
        }
    }
}

fn form_error(err: MultipartError) -> ClassifyError {
    ClassifyError::InvalidForm(err.body_text())
}
