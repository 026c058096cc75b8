//! Single-record operations: create, edit, and delete one connector.
//!
//! A translation can only come into existence for an id that already has a
//! default-locale anchor; anchor deletion follows the configured cascade policy.

use crate::engine::sync::delete_anchor;
use crate::engine::validate::require_text;
use crate::engine::SyncPolicy;
use crate::error::{Error, Result};
use crate::store::{ConnectorPatch, ConnectorStore, MatchKey};
use chrono::Utc;
use common::model::connector::Connector;
use common::model::locale::Locale;
use common::requests::{CreateConnectorRequest, UpdateConnectorRequest};
use log::{info, warn};
use uuid::Uuid;

fn find_record<S: ConnectorStore + ?Sized>(
    store: &S,
    id: &str,
    locale: &Locale,
) -> Result<Option<Connector>> {
    Ok(store
        .list_all(Some(locale))?
        .into_iter()
        .find(|c| c.id == id))
}

pub fn create_connector<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    request: &CreateConnectorRequest,
) -> Result<Connector> {
    let collection_name = require_text("collection name", &request.collection_name)?;
    let title = require_text("title", &request.title)?;
    let requested_id = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let id = if request.locale == policy.default_locale {
        requested_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    } else {
        let id = requested_id.ok_or_else(|| {
            Error::Validation("a translation must name the id of its anchor".to_string())
        })?;
        if find_record(store, id, &policy.default_locale)?.is_none() {
            warn!(
                "Rejected {} translation of {}: no {} anchor",
                request.locale, id, policy.default_locale
            );
            return Err(Error::Precondition(format!(
                "connector {} does not exist in the default locale ({}) yet",
                id, policy.default_locale
            )));
        }
        id.to_string()
    };

    let record = Connector::new(id, collection_name, title, request.locale.clone(), Utc::now());
    store.create(&record)?;
    info!("Created connector {} ({})", record.id, record.locale);
    Ok(record)
}

pub fn update_connector<S: ConnectorStore + ?Sized>(
    store: &S,
    id: &str,
    locale: &Locale,
    request: &UpdateConnectorRequest,
) -> Result<Connector> {
    let title = request
        .title
        .as_deref()
        .map(|t| require_text("title", t))
        .transpose()?;
    let collection_name = request
        .collection_name
        .as_deref()
        .map(|n| require_text("collection name", n))
        .transpose()?;
    if title.is_none() && collection_name.is_none() {
        return Err(Error::Validation("nothing to update".to_string()));
    }

    let patch = ConnectorPatch {
        title: title.map(str::to_string),
        collection_name: collection_name.map(str::to_string),
        updated_at: Utc::now(),
    };
    let changed = store.update_many(&MatchKey::IdLocale(id.to_string(), locale.clone()), &patch)?;
    if changed == 0 {
        return Err(Error::NotFound(format!("connector {} ({})", id, locale)));
    }

    find_record(store, id, locale)?
        .ok_or_else(|| Error::NotFound(format!("connector {} ({})", id, locale)))
}

/// Deletes one `(id, locale)` record. Deleting an anchor applies the cascade
/// policy to its translations.
pub fn delete_connector<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    id: &str,
    locale: &Locale,
) -> Result<usize> {
    let removed = if locale == &policy.default_locale {
        delete_anchor(store, policy, id)?
    } else {
        store.delete_many(&MatchKey::IdLocale(id.to_string(), locale.clone()))?
    };
    if removed == 0 {
        return Err(Error::NotFound(format!("connector {} ({})", id, locale)));
    }
    info!("Deleted connector {} ({}), {} records removed", id, locale, removed);
    Ok(removed)
}

/// Deletes every locale variant of `id`.
pub fn delete_connector_everywhere<S: ConnectorStore + ?Sized>(store: &S, id: &str) -> Result<usize> {
    let removed = store.delete_many(&MatchKey::Id(id.to_string()))?;
    if removed == 0 {
        return Err(Error::NotFound(format!("connector {}", id)));
    }
    info!("Deleted connector {} in all locales ({} records)", id, removed);
    Ok(removed)
}
