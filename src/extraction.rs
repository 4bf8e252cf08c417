use crate::{
    domain::{ClassificationRequest, EmailInput, UploadedFile, DIRECT_TEXT_LABEL},
    error::ClassifyError,
};

/// Resolves whichever channel the caller used into a single plain-text body.
pub async fn normalize(input: EmailInput) -> Result<ClassificationRequest, ClassifyError> {
    match input {
        EmailInput::InlineText(text) => ClassificationRequest::new(text, DIRECT_TEXT_LABEL),
        EmailInput::FileUpload(file) => {
            let text = extract_file_text(&file).await?;
            tracing::debug!(
                target: "extract",
                filename = %file.filename,
                bytes = file.bytes.len(),
                chars = text.chars().count(),
                "extracted upload text"
            );
            ClassificationRequest::new(text, file.filename)
        }
    }
}

async fn extract_file_text(file: &UploadedFile) -> Result<String, ClassifyError> {
    let extension = file_extension(&file.filename);
    match extension.as_str() {
        "txt" => Ok(decode_text_lossy(&file.bytes)),
        "pdf" => {
            let bytes = file.bytes.clone();
            tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|err| {
                    if err.is_panic() {
                        ClassifyError::UnreadableDocument("PDF decoder panicked".into())
                    } else {
                        ClassifyError::Internal(err.to_string())
                    }
                })?
        }
        _ => Err(ClassifyError::UnsupportedFile { extension }),
    }
}

/// Lowercased last dot-separated segment of the filename.
fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Concatenates each page's text layer in page order.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ClassifyError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|err| ClassifyError::UnreadableDocument(err.to_string()))?;
    Ok(pages.concat())
}
