use crate::engine::sync::synchronize_collection;
use crate::services::{error_response, run_blocking, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::requests::SyncCollectionRequest;

/// Actix handler for `PUT /api/collections/{old_name}`.
///
/// The whole reconciliation runs in a single store transaction. On success the
/// resulting records and the created/updated/deleted counts are returned; any
/// failure is reported verbatim and nothing is persisted.
pub(crate) async fn process(
    state: web::Data<AppState>,
    old_name: web::Path<String>,
    payload: web::Json<SyncCollectionRequest>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let old_name = old_name.into_inner();
    let request = payload.into_inner();

    let result = run_blocking(move || {
        state
            .store
            .transaction(|conn| synchronize_collection(conn, &state.policy, &old_name, &request))
    })
    .await;

    match result {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}
