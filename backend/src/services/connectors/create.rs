use crate::engine::connectors::create_connector;
use crate::services::{error_response, run_blocking, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::requests::CreateConnectorRequest;

/// Actix handler for `POST /api/connectors`.
///
/// Returns `201 Created` with the stored record. A translation whose `id` has
/// no default-locale anchor is refused with `409 Conflict`.
pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CreateConnectorRequest>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let request = payload.into_inner();

    let result = run_blocking(move || {
        state
            .store
            .transaction(|conn| create_connector(conn, &state.policy, &request))
    })
    .await;

    match result {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(&e),
    }
}
