use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::GroqConfig,
    domain::{Category, ModelVerdict},
    error::ClassifyError,
};

use super::prompt::PromptPair;

pub fn build_request(config: &GroqConfig, prompt: &PromptPair) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: prompt.system.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: prompt.user.clone(),
            },
        ],
        temperature: config.temperature,
        top_p: 1.0,
        max_tokens: config.max_tokens,
        response_format: ResponseFormat {
            r#type: "json_object".into(),
        },
    }
}

/// Pulls the first choice's content out of a completion envelope.
pub fn completion_content(completion: ChatCompletionResponse) -> Result<String, ClassifyError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ClassifyError::UpstreamFormat("response contained no choices".into()))?;

    choice
        .message
        .and_then(|msg| msg.content)
        .ok_or_else(|| ClassifyError::UpstreamFormat("response missing message content".into()))
}

/// Parses the model's JSON reply and checks it against the expected shape.
pub fn parse_verdict(content: &str) -> Result<ModelVerdict, ClassifyError> {
    let raw: RawVerdict = serde_json::from_str(content)
        .map_err(|err| ClassifyError::UpstreamFormat(err.to_string()))?;
    raw.validate()
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    categoria: String,
    confianca: Value,
    remetente: String,
    destinatario: String,
    assunto_resumo: String,
    resposta_sugerida: String,
}

impl RawVerdict {
    fn validate(self) -> Result<ModelVerdict, ClassifyError> {
        let category = Category::parse(&self.categoria).ok_or_else(|| {
            ClassifyError::UpstreamFormat(format!("unknown categoria `{}`", self.categoria))
        })?;
        let confidence = parse_confidence(&self.confianca)?;

        Ok(ModelVerdict {
            category,
            confidence,
            sender: self.remetente,
            recipient: self.destinatario,
            summary: self.assunto_resumo,
            suggested_reply: self.resposta_sugerida,
        })
    }
}

fn parse_confidence(value: &Value) -> Result<u8, ClassifyError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if (0.0..=100.0).contains(&n) => Ok(n.round() as u8),
        _ => Err(ClassifyError::UpstreamFormat(format!(
            "confianca must be a number between 0 and 100, got {value}"
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}
