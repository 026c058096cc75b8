use crate::model::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single locale variant of a content item that belongs to a slider.
///
/// All variants of the "same" item share `id`; that shared id is the only link
/// between a default-locale anchor and its translations. The store keeps at most
/// one record per `(id, locale)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    /// Opaque identifier, stable across locales.
    pub id: String,
    /// Name of the slider this record belongs to, in this record's locale.
    pub collection_name: String,
    /// Display text of the item in this record's locale.
    pub title: String,
    pub locale: Locale,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connector {
    /// Builds a fresh record stamped with `now` for both timestamps.
    pub fn new(
        id: impl Into<String>,
        collection_name: impl Into<String>,
        title: impl Into<String>,
        locale: Locale,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            collection_name: collection_name.into(),
            title: title.into(),
            locale,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_default_locale(&self, default_locale: &Locale) -> bool {
        &self.locale == default_locale
    }
}
