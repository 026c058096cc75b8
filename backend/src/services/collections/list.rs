use crate::engine::grouping::resolve_collections;
use crate::error::Result;
use crate::services::{run_blocking, AppState};
use crate::store::ConnectorStore;
use actix_web::{web, HttpResponse, Responder};
use common::model::collection::{Collection, PublicCollection};
use common::model::locale::Locale;
use common::requests::CollectionQuery;
use log::error;

/// Actix handler for `GET /api/collections[?locale=L]`.
///
/// With `locale` the public shape (`name` plus `{id, title}` items) is served,
/// otherwise every locale variant grouped under its canonical collection.
/// Failures are logged and degrade to an empty list so pages keep rendering.
pub(crate) async fn process(
    state: web::Data<AppState>,
    query: web::Query<CollectionQuery>,
) -> impl Responder {
    let locale = query.into_inner().locale;
    match list_collections(state.get_ref().clone(), locale.clone()).await {
        Ok(collections) => match locale {
            Some(_) => HttpResponse::Ok().json(
                collections
                    .iter()
                    .map(PublicCollection::from)
                    .collect::<Vec<_>>(),
            ),
            None => HttpResponse::Ok().json(collections),
        },
        Err(e) => {
            error!("Error listing collections: {}", e);
            HttpResponse::Ok().json(Vec::<Collection>::new())
        }
    }
}

pub async fn list_collections(state: AppState, locale: Option<Locale>) -> Result<Vec<Collection>> {
    run_blocking(move || {
        let records = state.store.read(|conn| conn.list_all(None))?;
        resolve_collections(&records, locale.as_ref(), &state.policy.default_locale)
    })
    .await
}
