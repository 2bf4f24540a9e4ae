use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use notekeeper_core::{Error as StoreError, FileNoteStore, Note, NoteName, NoteStore};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::form::CreateNoteForm;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store = FileNoteStore::open(&config.cache_dir)?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Run a store operation on the blocking pool.
    async fn with_store<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn NoteStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || operation(store.as_ref()))
            .await
            .map_err(|error| StoreError::Io(std::io::Error::other(error)))?
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/notes", get(list_notes))
        .route(
            "/notes/{name}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/write", post(create_note))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

async fn get_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, AppError> {
    let name = NoteName::parse(name)?;
    let text = state.with_store(move |store| store.get(&name)).await?;
    Ok(text)
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state
        .with_store(|store| store.list())
        .await
        .map_err(|error| AppError::from_store(error, "Error listing notes"))?;
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<AppState>,
    form: CreateNoteForm,
) -> Result<(StatusCode, &'static str), AppError> {
    let name = form
        .note_name
        .ok_or_else(|| AppError::bad_request("Missing field: note_name"))?;
    let name = NoteName::parse(name)?;
    let text = form
        .note
        .ok_or_else(|| AppError::bad_request("Missing field: note"))?;
    let bytes = text.len();

    let created = name.clone();
    state
        .with_store(move |store| store.create(&created, &text))
        .await
        .map_err(|error| AppError::from_store(error, "Error creating note"))?;

    tracing::info!(endpoint = "create_note", note = %name, bytes, "Created note");
    Ok((StatusCode::CREATED, "Note created"))
}

async fn update_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let name = NoteName::parse(name)?;
    let body = has_body(&headers, &body).then_some(body);

    let updated = name.clone();
    let bytes = state
        .with_store(move |store| {
            // Existence is reported before body problems.
            if !store.contains(&updated)? {
                return Err(StoreError::NotFound(updated.to_string()));
            }
            let body = body.ok_or_else(|| StoreError::invalid_input("Enter text"))?;
            let text = String::from_utf8_lossy(&body);
            store.update(&updated, &text)?;
            Ok(text.len())
        })
        .await
        .map_err(|error| AppError::from_store(error, "Error updating note"))?;

    tracing::info!(endpoint = "update_note", note = %name, bytes, "Updated note");
    Ok("Note updated")
}

async fn delete_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<&'static str, AppError> {
    let name = NoteName::parse(name)?;

    let deleted = name.clone();
    state
        .with_store(move |store| store.delete(&deleted))
        .await
        .map_err(|error| AppError::from_store(error, "Error deleting note"))?;

    tracing::info!(endpoint = "delete_note", note = %name, "Deleted note");
    Ok("Note deleted")
}

/// A request without length framing and without payload carries no body at all,
/// as opposed to an explicitly empty one.
fn has_body(headers: &HeaderMap, body: &Bytes) -> bool {
    !body.is_empty()
        || headers.contains_key(CONTENT_LENGTH)
        || headers.contains_key(TRANSFER_ENCODING)
}
