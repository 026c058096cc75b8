//! Single-connector routes under `/api/connectors`.
//!
//! - `POST /`: create one record (an anchor, or a translation of an existing one).
//! - `PATCH /{id}/{locale}`: edit the title or collection name of one record.
//! - `DELETE /{id}/{locale}`: delete one record; anchors follow the cascade policy.
//! - `DELETE /{id}`: delete the item in every locale.

use actix_web::web::{delete, patch, post, scope};
use actix_web::Scope;

mod create;
mod remove;
mod update;

const API_PATH: &str = "/api/connectors";

/// Configures and returns the Actix scope for connector routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{id}/{locale}", patch().to(update::process))
        .route("/{id}/{locale}", delete().to(remove::process_one))
        .route("/{id}", delete().to(remove::process_all))
}
