use crate::engine::grouping::find_orphans;
use crate::services::{run_blocking, AppState};
use crate::store::ConnectorStore;
use actix_web::{web, HttpResponse, Responder};
use common::model::connector::Connector;
use log::{error, warn};

/// Actix handler for `GET /api/collections/orphans`: translations left behind
/// by deleted anchors.
pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    let state = state.get_ref().clone();
    let result = run_blocking(move || {
        let records = state.store.read(|conn| conn.list_all(None))?;
        Ok(find_orphans(&records, &state.policy.default_locale))
    })
    .await;

    match result {
        Ok(orphans) => {
            if !orphans.is_empty() {
                warn!("{} orphaned translations in store", orphans.len());
            }
            HttpResponse::Ok().json(orphans)
        }
        Err(e) => {
            error!("Error listing orphaned translations: {}", e);
            HttpResponse::Ok().json(Vec::<Connector>::new())
        }
    }
}
