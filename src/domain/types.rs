use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "PRODUTIVO")]
    Productive,
    #[serde(rename = "IMPRODUTIVO")]
    Unproductive,
}

impl Category {
    /// Accepts the Portuguese labels the prompt asks for and their English
    /// equivalents, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PRODUTIVO" | "PRODUCTIVE" => Some(Self::Productive),
            "IMPRODUTIVO" | "UNPRODUCTIVE" => Some(Self::Unproductive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "PRODUTIVO",
            Self::Unproductive => "IMPRODUTIVO",
        }
    }
}

/// The six fields the model is asked to produce, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelVerdict {
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "confianca")]
    pub confidence: u8,
    #[serde(rename = "remetente")]
    pub sender: String,
    #[serde(rename = "destinatario")]
    pub recipient: String,
    #[serde(rename = "assunto_resumo")]
    pub summary: String,
    #[serde(rename = "resposta_sugerida")]
    pub suggested_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "conteudo_original")]
    pub original_content: String,
    #[serde(flatten)]
    pub verdict: ModelVerdict,
}
