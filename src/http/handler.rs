use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderMap},
    response::Html,
    Json,
};
use serde_json::{json, Value};

use crate::{domain::ClassificationResult, error::ClassifyError, extraction};

use super::{form::EmailSubmission, state::ServerState};

pub async fn index(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Html<String>, ClassifyError> {
    let path = server_state.index_path();
    let page = tokio::fs::read_to_string(path).await.map_err(|err| {
        ClassifyError::Internal(format!("failed to read {}: {err}", path.display()))
    })?;
    Ok(Html(page))
}

#[axum::debug_handler]
pub async fn classify(
    State(server_state): State<Arc<ServerState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassificationResult>, ClassifyError> {
    let multipart = multipart.map_err(|rejection| form_rejection(&headers, rejection))?;
    let input = EmailSubmission::from_multipart(multipart).await?.into_input()?;
    let request = extraction::normalize(input).await?;
    tracing::info!(
        target: "http",
        source = %request.source_label,
        chars = request.raw_text.chars().count(),
        "classification requested"
    );
    let result = server_state.classifier().classify(request).await?;
    Ok(Json(result))
}

/// A request that carries no form at all submitted nothing to classify.
fn form_rejection(headers: &HeaderMap, rejection: MultipartRejection) -> ClassifyError {
    let has_content_type = headers.contains_key(header::CONTENT_TYPE);
    let has_body = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .is_some_and(|len| len > 0);

    if !has_content_type && !has_body {
        ClassifyError::EmptyContent
    } else {
        ClassifyError::InvalidForm(rejection.body_text())
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
