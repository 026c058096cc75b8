mod config;
mod engine;
mod error;
mod services;
mod store;

use crate::services::AppState;
use crate::store::SqliteStore;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = config::load().map_err(io::Error::other)?;

    let store = SqliteStore::open(&config.database_path).map_err(io::Error::other)?;
    store.init_schema().map_err(io::Error::other)?;

    let state = AppState {
        store,
        policy: config.sync_policy(),
    };
    let json_limit = config.json_limit_bytes;

    info!(
        "Server running at http://{}:{} (default locale '{}', {:?} on anchor deletion)",
        config.host, config.port, config.default_locale, config.cascade_policy
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .service(services::collections::configure_routes())
            .service(services::connectors::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
