use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Everything that can stop a classification request.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Conteúdo vazio.")]
    EmptyContent,
    #[error("unsupported file type `.{extension}`; upload a .pdf or .txt file")]
    UnsupportedFile { extension: String },
    #[error("could not read PDF: {0}")]
    UnreadableDocument(String),
    #[error("invalid form data: {0}")]
    InvalidForm(String),
    #[error("LLM call failed: {0}")]
    UpstreamCall(String),
    #[error("LLM returned a malformed reply: {0}")]
    UpstreamFormat(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClassifyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyContent
            | Self::UnsupportedFile { .. }
            | Self::UnreadableDocument(_)
            | Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamCall(_) | Self::UpstreamFormat(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyContent => "empty_content",
            Self::UnsupportedFile { .. } => "unsupported_file",
            Self::UnreadableDocument(_) => "unreadable_document",
            Self::InvalidForm(_) => "invalid_form",
            Self::UpstreamCall(_) => "upstream_call",
            Self::UpstreamFormat(_) => "upstream_format",
            Self::Internal(_) => "internal",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "http", kind = self.kind(), error = %self, "request failed");
        } else {
            tracing::warn!(target: "http", kind = self.kind(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
