//! HTTP surface of the gateway.

use crate::blob::{Blob, BlobUpload};
use crate::storage::Storage;
use crate::Result;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use std::sync::Arc;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub storage: Storage,
}

/// Build the gateway router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/blobs", post(save_blob))
        .route("/v1/blobs/{id}", get(get_blob))
        .with_state(state)
}

async fn save_blob(
    State(state): State<Arc<AppState>>,
    Json(upload): Json<BlobUpload>,
) -> Result<impl IntoResponse> {
    let data = upload.validate()?;
    state.storage.save(&upload.id, &data).await?;
    info!("saved blob {} ({} bytes)", upload.id, data.len());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/v1/blobs/{}", upload.id))],
    ))
}

async fn get_blob(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Blob>> {
    let stored = state.storage.get(&id).await?;
    Ok(Json(Blob::new(id, &stored.data, stored.created_at)))
}
