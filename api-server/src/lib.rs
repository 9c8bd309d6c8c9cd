//! HTTP service exposing user lookup and repository creation.
//!
//! Routes:
//! - `GET /health`
//! - `GET /users/{user_id}`
//! - `POST /repositories`
//!
//! Every error leaves the service as `{"message", "status", "code"}` with the
//! matching HTTP status.

pub mod config;
pub mod error;
pub mod repositories;
pub mod telemetry;
pub mod users;

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use repo_core::{ApplicationError, GithubClient, Transport, UreqTransport};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use error::ApiError;
use repositories::{CreateRepoInput, CreateRepoOutput, RepositoryService};
use users::{InMemoryUserRepository, User, UserRepository, UsersService};

/// Load a `.env` file into the process environment if one exists.
pub fn init_env() {
    dotenvy::dotenv().ok();
}

#[derive(Clone)]
pub struct AppState {
    pub users: UsersService,
    pub repositories: RepositoryService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        transport: Arc<dyn Transport>,
        cfg: &ServerConfig,
    ) -> Self {
        let client = GithubClient::with_base_url(transport, &cfg.github_api_url);
        Self {
            users: UsersService::new(users),
            repositories: RepositoryService::new(client, &cfg.github_access_token),
        }
    }

    /// Seeded in-memory users and a real HTTP transport.
    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::seeded()),
            Arc::new(UreqTransport::new()),
            cfg,
        )
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users/{user_id}", get(get_user))
        .route("/repositories", post(create_repository))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "api-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: i64 = user_id
        .parse()
        .map_err(|_| ApplicationError::bad_request("User ID must be a number"))?;
    let user = state.users.get_user(id)?;
    Ok(Json(user))
}

async fn create_repository(
    State(state): State<AppState>,
    input: Result<Json<CreateRepoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRepoOutput>), ApiError> {
    let Json(input) =
        input.map_err(|e| ApplicationError::with_status(e.status().as_u16(), e.body_text()))?;
    let created = state.repositories.create_repo(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

