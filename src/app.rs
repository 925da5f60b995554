use crate::anilist::{AniListApi, AniListClient};
use crate::config::Settings;
use crate::franchise::{analyze_user, FranchiseReport, Vocabulary};
use crate::page;
use anyhow::Result;
use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info};

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub anilist: Arc<dyn AniListApi>,
    pub vocabulary: Arc<Vocabulary>,
}

#[derive(Debug, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub username: String,
}

pub async fn run_server(settings: Settings) -> Result<()> {
    let anilist: Arc<dyn AniListApi> = Arc::new(AniListClient::with_endpoint(
        settings.anilist_endpoint.clone(),
        settings.anilist_timeout,
    )?);
    info!("Using AniList endpoint {}", settings.anilist_endpoint);

    let state = AppState {
        anilist,
        vocabulary: Arc::new(settings.vocabulary),
    };

    let app = build_router(state);

    info!("Listening on {}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(lookup))
        .route("/api/users/:username/franchises", get(franchises_json))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn index() -> Html<String> {
    Html(page::render(None, None))
}

async fn lookup(State(state): State<AppState>, Form(form): Form<LookupForm>) -> Html<String> {
    let username = form.username.trim();
    if username.is_empty() {
        debug!("Empty username submitted, rendering form only");
        return Html(page::render(None, None));
    }

    let report = analyze_user(state.anilist.as_ref(), &state.vocabulary, username).await;
    Html(page::render(Some(username), Some(&report)))
}

async fn franchises_json(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<FranchiseReport> {
    Json(analyze_user(state.anilist.as_ref(), &state.vocabulary, username.trim()).await)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
