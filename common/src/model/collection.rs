use crate::model::connector::Connector;
use serde::{Deserialize, Serialize};

/// A slider as resolved from the flat connector records.
///
/// Collections are never stored. They are derived on every read by grouping
/// records under the collection name of their default-locale anchor, which is
/// kept in `canonical_name`. `name` is what gets displayed and may be a
/// translation of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub canonical_name: String,
    pub items: Vec<Connector>,
}

/// One entry of a public collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: String,
    pub title: String,
}

/// Shape served to page templates: the display name and one item per anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCollection {
    pub name: String,
    pub items: Vec<CollectionItem>,
}

impl From<&Collection> for PublicCollection {
    fn from(collection: &Collection) -> Self {
        Self {
            name: collection.name.clone(),
            items: collection
                .items
                .iter()
                .map(|c| CollectionItem {
                    id: c.id.clone(),
                    title: c.title.clone(),
                })
                .collect(),
        }
    }
}
