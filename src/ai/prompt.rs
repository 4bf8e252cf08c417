use crate::domain::ClassificationRequest;

pub const SYSTEM_PROMPT: &str = r#"Você é um Analista de Operações Financeiras especializado em triagem de e-mails.

SUA TAREFA PRINCIPAL: Extrair metadados técnicos com precisão absoluta.

REGRAS PARA REMETENTE E DESTINATÁRIO:
1. Extraia o endereço de e-mail COMPLETO (ex: nome@empresa.com.br).
2. NUNCA remova o símbolo '@' ou os pontos do domínio.
3. Remetente: é quem enviou a mensagem (procure por 'De:', 'From:', ou na assinatura final).
4. Destinatário: é o alvo da mensagem (procure por 'Para:', 'To:', ou no corpo da saudação).
5. Se houver um histórico de mensagens abaixo, foque APENAS na mensagem mais recente (a do topo).

CRITÉRIOS DE CLASSIFICAÇÃO:
- PRODUTIVO: Demandas de trabalho, solicitações, envio de documentos, dúvidas técnicas.
- IMPRODUTIVO: "Obrigado", "Recebido", avisos de férias (Out of Office), propagandas ou saudações vazias."#;

const OUTPUT_SCHEMA: &str = r#"{
    "categoria": "PRODUTIVO ou IMPRODUTIVO",
    "confianca": 0-100,
    "remetente": "email@exemplo.com",
    "destinatario": "email@exemplo.com",
    "assunto_resumo": "Resumo em 10 palavras",
    "resposta_sugerida": "Texto da resposta formal"
}"#;

/// System instruction and user message for one classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: &'static str,
    pub user: String,
}

pub fn build_prompt(request: &ClassificationRequest) -> PromptPair {
    let user = format!(
        "Analise o e-mail abaixo e extraia as informações em JSON.\n\
         Mantenha os endereços de e-mail intactos.\n\n\
         ### CONTEÚDO DO E-MAIL ###\n\
         {}\n\n\
         ### FORMATO DE SAÍDA (JSON APENAS) ###\n\
         {}\n",
        request.raw_text, OUTPUT_SCHEMA
    );
    PromptPair {
        system: SYSTEM_PROMPT,
        user,
    }
}
