pub mod input;
pub mod types;

pub use input::{ClassificationRequest, EmailInput, UploadedFile, DIRECT_TEXT_LABEL};
pub use types::{Category, ClassificationResult, ModelVerdict};
