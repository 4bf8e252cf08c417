use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;

use super::{
    handler::{classify, health, index},
    state::ServerState,
};

pub fn router(state: ServerState, server: &ServerConfig) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/classify", post(classify))
        .route("/classificar", post(classify))
        .nest_service("/static", ServeDir::new(&server.static_dir))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::{fs, net::SocketAddr, path::Path, time::Duration};

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use reqwest::Client;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{ai::GroqClient, classifier::EmailClassifier, config::GroqConfig};

    const BOUNDARY: &str = "----triage-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart(parts: &[Part]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/classify")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    struct Harness {
        app: Router,
        upstream: MockServer,
        _assets: tempfile::TempDir,
    }

    async fn harness() -> Harness {
        let upstream = MockServer::start().await;
        let assets = tempfile::tempdir().unwrap();
        let static_dir = assets.path().join("static");
        fs::create_dir_all(static_dir.join("js")).unwrap();
        fs::write(static_dir.join("js/script.js"), "console.log('ok');").unwrap();
        let index_path = assets.path().join("index.html");
        fs::write(&index_path, "<html><body>Triagem</body></html>").unwrap();

        let groq = GroqConfig {
            api_key: "gsk_test".into(),
            api_url: format!("{}/openai/v1/chat/completions", upstream.uri()),
            model: "llama-3.3-70b-versatile".into(),
            temperature: 0.1,
            max_tokens: 1024,
            timeout: Duration::from_secs(2),
        };
        let classifier = Arc::new(EmailClassifier::new(Arc::new(GroqClient::new(
            Client::new(),
            groq,
        ))));
        let server = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            static_dir: static_dir.clone(),
            index_path: index_path.clone(),
            max_upload_bytes: 1024 * 1024,
        };

        Harness {
            app: router(ServerState::from((classifier, index_path)), &server),
            upstream,
            _assets: assets,
        }
    }

    async fn reply_with(upstream: &MockServer, content: Value, calls: u64) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": content.to_string() } }]
            })))
            .expect(calls)
            .mount(upstream)
            .await;
    }

    fn verdict() -> Value {
        json!({
            "categoria": "IMPRODUTIVO",
            "confianca": 97,
            "remetente": "cliente@empresa.com.br",
            "destinatario": "atendimento@banco.com",
            "assunto_resumo": "Agradecimento pelo retorno",
            "resposta_sugerida": "Agradecemos o contato."
        })
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn read_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn inline_text_round_trips_model_fields() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 1).await;

        let response = h
            .app
            .oneshot(multipart(&[Part::Text(
                "text",
                "Obrigado pelo retorno, tudo certo!",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["origem"], "Texto Direto");
        assert_eq!(body["conteudo_original"], "Obrigado pelo retorno, tudo certo!");
        assert_eq!(body["categoria"], "IMPRODUTIVO");
        assert_eq!(body["confianca"], 97);
        assert_eq!(body["remetente"], "cliente@empresa.com.br");
        assert_eq!(body["destinatario"], "atendimento@banco.com");
        assert_eq!(body["assunto_resumo"], "Agradecimento pelo retorno");
        assert_eq!(body["resposta_sugerida"], "Agradecemos o contato.");
    }

    #[tokio::test]
    async fn legacy_path_and_field_names_are_accepted() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 1).await;

        let mut request = multipart(&[Part::File(
            "arquivo",
            "resposta.txt",
            b"De: cliente@empresa.com.br\nRecebido, obrigado.",
        )]);
        *request.uri_mut() = "/classificar".parse().unwrap();

        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["origem"], "resposta.txt");
        assert_eq!(
            body["conteudo_original"],
            "De: cliente@empresa.com.br\nRecebido, obrigado."
        );
    }

    #[tokio::test]
    async fn empty_submission_is_400_and_never_reaches_the_model() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 0).await;

        let response = h
            .app
            .oneshot(multipart(&[
                Part::Text("text", ""),
                Part::File("file", "", b""),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, json!({ "detail": "Conteúdo vazio." }));
    }

    #[tokio::test]
    async fn unsupported_upload_is_400() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 0).await;

        let response = h
            .app
            .oneshot(multipart(&[Part::File("file", "email.eml", b"Subject: oi")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains(".eml"));
    }

    #[tokio::test]
    async fn bodyless_post_is_400_empty_content_as_json() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 0).await;

        let request = Request::builder()
            .method("POST")
            .uri("/classify")
            .body(Body::empty())
            .unwrap();
        let response = h.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, json!({ "detail": "Conteúdo vazio." }));
    }

    #[tokio::test]
    async fn non_multipart_body_is_400_invalid_form_as_json() {
        let h = harness().await;
        reply_with(&h.upstream, verdict(), 0).await;

        let request = Request::builder()
            .method("POST")
            .uri("/classify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"Pode revisar a planilha?"}"#))
            .unwrap();
        let response = h.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let detail = read_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("invalid form data"), "{detail}");
    }

    #[tokio::test]
    async fn malformed_model_reply_is_500_distinct_from_call_failure() {
        let h = harness().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "não sei responder em JSON" } }]
            })))
            .mount(&h.upstream)
            .await;

        let response = h
            .app
            .oneshot(multipart(&[Part::Text("text", "Pode revisar a planilha?")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = read_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("LLM returned a malformed reply"), "{detail}");
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_message() {
        let h = harness().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": { "message": "Invalid API Key" } })),
            )
            .mount(&h.upstream)
            .await;

        let response = h
            .app
            .oneshot(multipart(&[Part::Text("text", "Pode revisar a planilha?")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = read_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("LLM call failed"), "{detail}");
        assert!(detail.contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn serves_index_and_static_assets() {
        let h = harness().await;

        let response = h.app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_text(response).await.contains("Triagem"));

        let response = h.app.clone().oneshot(get("/static/js/script.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "console.log('ok');");

        let response = h.app.oneshot(get("/health")).await.unwrap();
        assert_eq!(read_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn missing_index_is_500() {
        let h = harness().await;
        let state = ServerState::from((
            Arc::new(EmailClassifier::new(Arc::new(GroqClient::new(
                Client::new(),
                GroqConfig {
                    api_key: "k".into(),
                    api_url: h.upstream.uri(),
                    model: "m".into(),
                    temperature: 0.1,
                    max_tokens: 16,
                    timeout: Duration::from_secs(1),
                },
            )))),
            Path::new("/nonexistent/index.html").to_path_buf(),
        ));
        let server = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            static_dir: Path::new("/nonexistent").to_path_buf(),
            index_path: Path::new("/nonexistent/index.html").to_path_buf(),
            max_upload_bytes: 1024,
        };

        let response = router(state, &server).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
