use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use serde_json::json;
use crate::{ApiError, AppState};

pub const ATTACHMENT_NAME: &str = "newsletter.md";

pub async fn generate_newsletter(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let _guard = state.generation.lock().await;

    let newsletter = state.builder.generate().await.map_err(|e| {
        tracing::error!("Error generating newsletter: {}", e);
        ApiError::Generation(e)
    })?;

    state.store.save(&newsletter.content).await.map_err(|e| {
        tracing::error!("Error saving newsletter to {}: {}", state.store.location(), e);
        ApiError::Save(e)
    })?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Newsletter generated successfully" })),
    ))
}

pub async fn download_newsletter(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .store
        .load()
        .await
        .map_err(|e| {
            tracing::error!("Error downloading newsletter: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or(ApiError::NotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ATTACHMENT_NAME),
            ),
        ],
        content,
    ))
}
