use crate::error::{AppError, Result};
use crate::model::{PublishSnippetRequest, ShareCodeResponse, SnippetResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use snipshare_core::{PublishParams, ShareCode};

pub async fn publish_snippet_handler(
    State(state): State<AppState>,
    Json(request): Json<PublishSnippetRequest>,
) -> Result<Json<ShareCodeResponse>> {
    let params = PublishParams {
        title: request.title,
        body: request.body,
        language: request.language.unwrap_or_default(),
    };

    let code = state.store().publish(params).await?;

    Ok(Json(ShareCodeResponse {
        share_code: code.to_string(),
    }))
}

pub async fn get_snippet_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SnippetResponse>> {
    // Malformed codes never reach storage.
    let code = ShareCode::new(code).map_err(|e| AppError::InvalidCode(e.to_string()))?;

    let record = state
        .store()
        .lookup(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(SnippetResponse::from_record(&code, record)))
}
