//! HTTP API. Each resource exposes a `configure_routes()` scope that `main.rs`
//! mounts on the Actix application.
//!
//! Handlers never touch SQLite on the async runtime: the work is moved to the
//! blocking pool with `run_blocking`, and every write runs inside one store
//! transaction so a failed synchronization leaves no partial state behind.

pub mod collections;
pub mod connectors;

use crate::engine::SyncPolicy;
use crate::error::{Error, Result};
use crate::store::{SqliteStore, StoreError};
use actix_web::HttpResponse;
use common::model::locale::Locale;
use serde_json::json;

/// Shared application state injected as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub policy: SyncPolicy,
}

/// Runs blocking store work on the Tokio blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => Err(Error::Store(StoreError::Unavailable(format!(
            "Task join error: {}",
            e
        )))),
    }
}

/// Parses a locale taken from a URL path segment.
pub(crate) fn path_locale(raw: &str) -> Result<Locale> {
    Locale::parse(raw).map_err(|e| Error::Validation(e.to_string()))
}

/// Maps an engine error onto the status code the admin client sees.
///
/// - `Validation` → `400 Bad Request`
/// - `NotFound` → `404 Not Found`
/// - `Precondition` and duplicate keys → `409 Conflict`
/// - any other store failure → `503 Service Unavailable`
pub(crate) fn error_response(err: &Error) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        Error::Validation(_) => HttpResponse::BadRequest().json(body),
        Error::NotFound(_) => HttpResponse::NotFound().json(body),
        Error::Precondition(_) | Error::Store(StoreError::DuplicateKey { .. }) => {
            HttpResponse::Conflict().json(body)
        }
        Error::Store(_) => HttpResponse::ServiceUnavailable().json(body),
    }
}
