//! Slider engines: read-side grouping with locale fallback, and the write-side
//! reconciliation of submitted slider contents against the store.

pub mod connectors;
pub mod grouping;
pub mod sync;
mod collation;
mod validate;

use common::model::locale::Locale;
use serde::{Deserialize, Serialize};

/// What happens to translations when their default-locale anchor is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadePolicy {
    /// Translations stay behind as orphans and can be found with
    /// `grouping::find_orphans`.
    #[default]
    Orphan,
    /// Translations are deleted together with their anchor.
    Cascade,
}

#[derive(Debug, Clone)]
pub struct SyncPolicy {
    pub default_locale: Locale,
    pub cascade: CascadePolicy,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            default_locale: Locale::default_locale(),
            cascade: CascadePolicy::Orphan,
        }
    }
}
