use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::Response;
use axum::{extract::FromRef, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router, users_router};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, static_dir: PathBuf) -> Self {
        Self { pool, static_dir }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state.clone()))
        .merge(users_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::RouteNotFound
        })
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder
        .encode(&metrics, &mut buf)
        .map_err(|e| ApiError::Io(std::io::Error::other(e)))?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|e| ApiError::Io(std::io::Error::other(e)))
}
