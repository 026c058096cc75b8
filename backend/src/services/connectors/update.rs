use crate::engine::connectors::update_connector;
use crate::services::{error_response, path_locale, run_blocking, AppState};
use actix_web::{web, HttpResponse, Responder};
use common::requests::UpdateConnectorRequest;

/// Actix handler for `PATCH /api/connectors/{id}/{locale}`: edits the title
/// and/or collection name of exactly one record.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateConnectorRequest>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let (id, raw_locale) = path.into_inner();
    let request = payload.into_inner();

    let result = run_blocking(move || {
        let locale = path_locale(&raw_locale)?;
        state
            .store
            .transaction(|conn| update_connector(conn, &id, &locale, &request))
    })
    .await;

    match result {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(&e),
    }
}
