use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    ai::GroqClient,
    classifier::EmailClassifier,
    config::AppConfig,
    http::{self, ServerState},
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
};

pub struct TriageApp {
    _paths: ResolvedPaths,
    router: Router,
    shutdown: Shutdown,
    config: Arc<AppConfig>,
}

impl TriageApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("mail-triage-rust/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        let groq = Arc::new(GroqClient::new(http_client, config.groq.clone()));
        let classifier = Arc::new(EmailClassifier::new(groq));

        if !config.server.index_path.is_file() {
            tracing::warn!(
                target: "server",
                path = %config.server.index_path.display(),
                "index page not found; GET / will fail until it exists"
            );
        }

        let state = ServerState::from((classifier, config.server.index_path.clone()));
        let router = http::router(state, &config.server);

        Ok(Self {
            _paths: paths,
            router,
            shutdown,
            config,
        })
    }

    pub async fn run(self) -> Result<()> {
        let TriageApp {
            _paths: _,
            router,
            shutdown,
            config,
        } = self;

        let listener = TcpListener::bind(config.server.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;

        tracing::info!(
            target: "server",
            addr = %config.server.bind_addr,
            model = %config.groq.model,
            "email triage server listening"
        );

        let mut shutdown_listener = shutdown.subscribe();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_listener.notified().await;
                tracing::info!(target: "server", "shutdown signal received; draining connections");
            })
            .await
            .context("HTTP server error")?;

        tracing::info!(target: "server", "server stopped");
        Ok(())
    }
}
