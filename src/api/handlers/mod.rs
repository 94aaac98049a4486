use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::models::Sheet;
use crate::store::DocumentStore;

pub const LIVENESS_MESSAGE: &str = "Backend is running 🚀";
pub const UPDATED_MESSAGE: &str = "Sheet updated";

/// Body returned after a document replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================
// Health
// ============================================================

pub async fn liveness() -> impl IntoResponse {
    LIVENESS_MESSAGE
}

// ============================================================
// Sheet
// ============================================================

pub async fn get_sheet(State(store): State<DocumentStore>) -> Json<Sheet> {
    let sheet = store.get();
    tracing::debug!("Serving sheet with {} topics", sheet.topics.len());
    Json(sheet)
}

/// Replace the stored document with the request body verbatim.
///
/// Bodies that do not parse as a sheet are rejected by the `Json` extractor
/// before this runs, leaving the stored document untouched.
pub async fn replace_sheet(
    State(store): State<DocumentStore>,
    Json(sheet): Json<Sheet>,
) -> Json<MessageResponse> {
    tracing::info!("Replacing sheet: {} topics", sheet.topics.len());
    store.replace(sheet);
    Json(MessageResponse {
        message: UPDATED_MESSAGE.to_string(),
    })
}
