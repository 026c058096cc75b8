//! # Collection Service Module
//!
//! Routes under `/api/collections`: the public and administrative slider
//! listings, slider synchronization, and the orphaned-translation report.
//!
//! ## Sub-modules:
//! - `list`: groups every stored connector into sliders for one locale, or for all.
//! - `sync`: reconciles a submitted slider against the store.
//! - `orphans`: lists translations whose default-locale anchor is gone.

mod list;
mod orphans;
mod sync;

use actix_web::web::{get, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/collections";

/// Configures and returns the Actix `Scope` for collection routes.
///
/// # Registered Routes:
///
/// *   **`GET ?locale=L`**: public view, one `{id, title}` per item with
///     default-locale fallback.
/// *   **`GET`** (no locale): admin view, every locale variant.
/// *   **`GET /orphans`**: translations with no default-locale anchor.
/// *   **`PUT /{old_name}`**: body `{ new_name, titles | items, locale }`,
///     returns the resulting records and change counts.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/orphans", get().to(orphans::process))
        .route("/{old_name}", put().to(sync::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::state;
    use crate::services::AppState;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(configure_routes()),
            )
            .await
        };
    }

    fn sync_body(new_name: &str, titles: &[&str], locale: &str) -> Value {
        json!({ "new_name": new_name, "titles": titles, "locale": locale })
    }

    #[actix_web::test]
    async fn synchronize_then_read_public_and_admin_views() {
        let app = app!(state());

        let req = test::TestRequest::put()
            .uri("/api/collections/Gateways")
            .set_json(sync_body("Gateways", &["Stripe", "PayPal"], "en"))
            .to_request();
        let outcome: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(outcome["created"], 2);

        let req = test::TestRequest::put()
            .uri("/api/collections/Gateways")
            .set_json(sync_body("Passerelles", &["PayPal FR"], "fr"))
            .to_request();
        let outcome: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(outcome["created"], 1);

        let req = test::TestRequest::get()
            .uri("/api/collections?locale=fr")
            .to_request();
        let public: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            public,
            json!([{
                "name": "Passerelles",
                "items": [
                    { "id": public[0]["items"][0]["id"], "title": "PayPal FR" },
                    { "id": public[0]["items"][1]["id"], "title": "Stripe" }
                ]
            }])
        );

        let req = test::TestRequest::get().uri("/api/collections").to_request();
        let admin: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(admin[0]["canonical_name"], "Gateways");
        assert_eq!(admin[0]["items"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn translating_unknown_collection_is_a_conflict() {
        let app = app!(state());

        let req = test::TestRequest::put()
            .uri("/api/collections/Gateways")
            .set_json(sync_body("Passerelles", &["PayPal FR"], "fr"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn malformed_locale_is_rejected() {
        let app = app!(state());

        let req = test::TestRequest::put()
            .uri("/api/collections/Gateways")
            .set_json(sync_body("Gateways", &["PayPal"], "!!"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn read_failures_degrade_to_an_empty_list() {
        let store = crate::store::SqliteStore::open_in_memory().unwrap();
        let app = app!(AppState {
            store,
            policy: Default::default(),
        });

        let req = test::TestRequest::get()
            .uri("/api/collections?locale=fr")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn orphans_are_listed_after_anchor_removal() {
        let app = app!(state());
        for body in [
            sync_body("Gateways", &["PayPal", "Stripe"], "en"),
            sync_body("Gateways", &["PayPal FR", "Stripe FR"], "fr"),
            sync_body("Gateways", &["PayPal"], "en"),
        ] {
            let req = test::TestRequest::put()
                .uri("/api/collections/Gateways")
                .set_json(body)
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get()
            .uri("/api/collections/orphans")
            .to_request();
        let orphans: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(orphans.as_array().unwrap().len(), 1);
        assert_eq!(orphans[0]["title"], "Stripe FR");
    }
}
