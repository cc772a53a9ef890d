use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::query::{HealthResponse, QueryRequest, QueryResponse, ServiceInfo};
use crate::state::AppState;
use crate::tools;
use crate::tools::definition::ToolDefinition;

const MAX_QUERY_LENGTH: usize = 1000;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/agent/query", post(process_query))
        .route("/api/v1/agent/tools", get(list_tools))
        .with_state(state)
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(tools::definitions())
}

async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    validate_query(&request.query)?;

    // The pipeline is synchronous end to end (classifier plus SQLite), so it
    // runs on the blocking pool.
    let agent = state.agent.clone();
    let response = tokio::task::spawn_blocking(move || agent.process(&request.query))
        .await
        .map_err(|e| AppError::Message(e.to_string()))?;

    Ok(Json(response))
}

fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::Invalid("query must not be empty".to_string()));
    }
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(AppError::Invalid(format!(
            "query must be at most {MAX_QUERY_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_rejects_empty() {
        assert!(validate_query("").is_err());
        assert!(validate_query("   ").is_err());
    }

    #[test]
    fn test_validate_query_rejects_oversized() {
        let long = "a".repeat(MAX_QUERY_LENGTH + 1);
        assert!(validate_query(&long).is_err());
        let max = "a".repeat(MAX_QUERY_LENGTH);
        assert!(validate_query(&max).is_ok());
    }

    #[test]
    fn test_validate_query_accepts_normal_input() {
        assert!(validate_query("Show all products").is_ok());
    }
}
