use crate::model::locale::Locale;
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/collections`.
///
/// Without `locale` the admin view is returned (every locale variant); with it,
/// the public view (one record per item, falling back to the default locale).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollectionQuery {
    pub locale: Option<Locale>,
}

/// An explicit translation pairing: the anchor `id` and its translated title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationItem {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Request payload for `PUT /api/collections/{old_name}`.
///
/// Either `titles` (paired with anchors by position when `locale` is not the
/// default) or `items` (paired by id) must be provided. `old_name` always names
/// the collection as it is spelled in the default locale.
pub struct SyncCollectionRequest {
    pub new_name: String,
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub items: Option<Vec<TranslationItem>>,
    pub locale: Locale,
}

/// Request payload for `POST /api/connectors`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateConnectorRequest {
    /// Required for translations (must name an existing anchor), optional otherwise.
    #[serde(default)]
    pub id: Option<String>,
    pub collection_name: String,
    pub title: String,
    pub locale: Locale,
}

/// Request payload for `PATCH /api/connectors/{id}/{locale}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateConnectorRequest {
    pub title: Option<String>,
    pub collection_name: Option<String>,
}
