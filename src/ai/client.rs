use std::time::Instant;

use reqwest::Client;

use crate::{config::GroqConfig, domain::ModelVerdict, error::ClassifyError};

use super::{
    inference::{build_request, completion_content, parse_verdict, ChatCompletionResponse},
    prompt::PromptPair,
};

/// Chat-completion client bound to one Groq (OpenAI-compatible) endpoint.
pub struct GroqClient {
    http: Client,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(http: Client, config: GroqConfig) -> Self {
        Self { http, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Single attempt; transport and provider failures become `UpstreamCall`,
    /// a reply that is not the expected JSON becomes `UpstreamFormat`.
    pub async fn classify(&self, prompt: &PromptPair) -> Result<ModelVerdict, ClassifyError> {
        let request = build_request(&self.config, prompt);
        let started = Instant::now();
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(
                    target: "ai",
                    model = %self.config.model,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "completion request failed"
                );
                ClassifyError::UpstreamCall(describe_transport_error(&err))
            })?;

        let status = response.status();
        tracing::debug!(
            target: "ai",
            model = %self.config.model,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "completion response received"
        );
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::UpstreamCall(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(body.trim(), 300)
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ClassifyError::UpstreamCall(format!("unreadable completion: {err}")))?;
        let content = completion_content(completion)?;
        parse_verdict(&content)
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("could not connect: {err}")
    } else {
        err.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
