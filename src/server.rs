use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::config::Config;
use crate::github_api_utils::{error::SearchError, github_api_helper::GitHubClient};
use crate::search_utils::{
    csv_dump::{append_repositories_to_file, dump_file_path},
    query_params::SearchQueryParams,
};

#[derive(Clone)]
pub struct AppState {
    client: GitHubClient,
    output_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(client: GitHubClient, output_dir: PathBuf) -> Self {
        Self {
            client,
            output_dir: Arc::new(output_dir),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    file: String,
    count: usize,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            SearchError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SearchError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            SearchError::Upstream { .. }
            | SearchError::MalformedResponse(_)
            | SearchError::Http(_) => StatusCode::BAD_GATEWAY,
            SearchError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut response = (status, self.to_string()).into_response();
        if let Some(reset_at) = self.reset_at() {
            let wait_secs = (reset_at - Utc::now()).num_seconds().max(0);
            if let Ok(value) = HeaderValue::from_str(&wait_secs.to_string()) {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }
        response
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search))
        .with_state(state)
}

pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = GitHubClient::new(config)?;
    let app = router(AppState::new(client, config.output_dir.clone()));

    let addr = config.socket_address();
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for shutdown signal: {err}");
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Searches github with the given parameters and dumps the results to the output directory.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, SearchError> {
    let search = params
        .validate()
        .inspect_err(|err| warn!("Rejected search: {err}"))?;

    let repos = state
        .client
        .search_repositories(&search)
        .await
        .inspect_err(|err| error!("Search for {:?} failed: {err}", search.language))?;

    let path = dump_file_path(&state.output_dir, &search);
    append_repositories_to_file(&path, &repos).await?;

    Ok(Json(SearchResponse {
        file: path.display().to_string(),
        count: repos.len(),
    }))
}
