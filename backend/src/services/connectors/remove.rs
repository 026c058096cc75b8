use crate::engine::connectors::{delete_connector, delete_connector_everywhere};
use crate::services::{error_response, path_locale, run_blocking, AppState};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// Actix handler for `DELETE /api/connectors/{id}/{locale}`.
pub(crate) async fn process_one(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let (id, raw_locale) = path.into_inner();

    let result = run_blocking(move || {
        let locale = path_locale(&raw_locale)?;
        state
            .store
            .transaction(|conn| delete_connector(conn, &state.policy, &id, &locale))
    })
    .await;

    match result {
        Ok(deleted) => HttpResponse::Ok().json(json!({ "deleted": deleted })),
        Err(e) => error_response(&e),
    }
}

/// Actix handler for `DELETE /api/connectors/{id}`: removes every locale variant.
pub(crate) async fn process_all(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let id = id.into_inner();

    let result = run_blocking(move || {
        state
            .store
            .transaction(|conn| delete_connector_everywhere(conn, &id))
    })
    .await;

    match result {
        Ok(deleted) => HttpResponse::Ok().json(json!({ "deleted": deleted })),
        Err(e) => error_response(&e),
    }
}
