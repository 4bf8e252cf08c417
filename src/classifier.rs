use std::{sync::Arc, time::Instant};

use crate::{
    ai::{build_prompt, GroqClient},
    domain::{ClassificationRequest, ClassificationResult},
    error::ClassifyError,
};

/// Turns a normalized request into a classification via the LLM.
pub struct EmailClassifier {
    client: Arc<GroqClient>,
}

impl EmailClassifier {
    pub fn new(client: Arc<GroqClient>) -> Self {
        Self { client }
    }

    pub async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyError> {
        let prompt = build_prompt(&request);
        let started = Instant::now();

        let verdict = self.client.classify(&prompt).await.inspect_err(|err| {
            tracing::warn!(
                target: "classifier",
                source = %request.source_label,
                model = self.client.model(),
                kind = err.kind(),
                "classification failed"
            );
        })?;

        tracing::info!(
            target: "classifier",
            source = %request.source_label,
            model = self.client.model(),
            category = verdict.category.as_str(),
            confidence = verdict.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "email classified"
        );

        Ok(ClassificationResult {
            origin: request.source_label,
            original_content: request.raw_text,
            verdict,
        })
    }
}
