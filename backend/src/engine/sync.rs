//! Reconciles a submitted slider (a name plus an ordered list of titles for one
//! locale) against the stored connector records.
//!
//! Default-locale synchronization defines membership: it creates, renames, and
//! deletes anchors. Synchronization in any other locale only attaches, edits,
//! or detaches translations of the anchors that already exist, reusing their
//! ids. It never creates a new id.
//!
//! Every step goes through `ConnectorStore`; callers that need the pass to be
//! atomic run it inside `SqliteStore::transaction`.

use crate::engine::collation::TitleCollator;
use crate::engine::validate::{fold, normalize_titles, require_text, trim_titles};
use crate::engine::{CascadePolicy, SyncPolicy};
use crate::error::{Error, Result};
use crate::store::{ConnectorPatch, ConnectorStore, MatchKey};
use chrono::Utc;
use common::model::connector::Connector;
use common::model::locale::Locale;
use common::requests::{SyncCollectionRequest, TranslationItem};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Result of one synchronization pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    /// Every record of the collection in the synchronized locale, by title.
    pub records: Vec<Connector>,
    pub created: usize,
    /// Records whose title or collection name changed.
    pub updated: usize,
    /// Records removed, including cascaded translations.
    pub deleted: usize,
}

impl SyncOutcome {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            created: 0,
            updated: 0,
            deleted: 0,
        }
    }
}

/// How submitted translations are matched with anchors.
enum Pairing {
    /// `titles[i]` belongs to the i-th anchor by title order; surplus titles go
    /// to the last anchor.
    Positional(Vec<String>),
    /// Each title names its anchor explicitly.
    Explicit(Vec<TranslationItem>),
}

impl Pairing {
    fn is_empty(&self) -> bool {
        match self {
            Pairing::Positional(titles) => titles.is_empty(),
            Pairing::Explicit(items) => items.is_empty(),
        }
    }

    fn folded_titles(&self) -> HashSet<String> {
        match self {
            Pairing::Positional(titles) => titles.iter().map(|t| fold(t)).collect(),
            Pairing::Explicit(items) => items.iter().map(|i| fold(&i.title)).collect(),
        }
    }
}

pub fn synchronize_collection<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    old_name: &str,
    request: &SyncCollectionRequest,
) -> Result<SyncOutcome> {
    let old_name = require_text("collection name", old_name)?;
    let new_name = require_text("new collection name", &request.new_name)?;

    if request.locale == policy.default_locale {
        if request.items.is_some() {
            return Err(Error::Validation(
                "explicit items only apply to translations; use titles for the default locale"
                    .to_string(),
            ));
        }
        let titles = normalize_titles(&request.titles);
        return sync_default_locale(store, policy, old_name, new_name, &titles);
    }

    let pairing = match &request.items {
        Some(items) => Pairing::Explicit(
            items
                .iter()
                .filter(|i| !i.title.trim().is_empty())
                .map(|i| TranslationItem {
                    id: i.id.trim().to_string(),
                    title: i.title.trim().to_string(),
                })
                .collect(),
        ),
        None => Pairing::Positional(trim_titles(&request.titles)),
    };
    sync_translation(store, policy, old_name, new_name, &request.locale, pairing)
}

/// Deletes an anchor, and with `CascadePolicy::Cascade` every translation of it.
pub(crate) fn delete_anchor<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    id: &str,
) -> Result<usize> {
    let key = match policy.cascade {
        CascadePolicy::Orphan => MatchKey::IdLocale(id.to_string(), policy.default_locale.clone()),
        CascadePolicy::Cascade => MatchKey::Id(id.to_string()),
    };
    Ok(store.delete_many(&key)?)
}

fn load_collection<S: ConnectorStore + ?Sized>(
    store: &S,
    locale: &Locale,
    name: &str,
) -> Result<Vec<Connector>> {
    let mut records: Vec<Connector> = store
        .list_all(Some(locale))?
        .into_iter()
        .filter(|c| c.collection_name == name)
        .collect();
    let collator = TitleCollator::for_locale(locale);
    records.sort_by(|a, b| collator.compare(&a.title, &b.title));
    Ok(records)
}

fn load_translations<S: ConnectorStore + ?Sized>(
    store: &S,
    locale: &Locale,
    anchor_ids: &HashSet<&str>,
) -> Result<Vec<Connector>> {
    let mut records: Vec<Connector> = store
        .list_all(Some(locale))?
        .into_iter()
        .filter(|c| anchor_ids.contains(c.id.as_str()))
        .collect();
    let collator = TitleCollator::for_locale(locale);
    records.sort_by(|a, b| collator.compare(&a.title, &b.title));
    Ok(records)
}

fn sync_default_locale<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    old_name: &str,
    new_name: &str,
    titles: &[String],
) -> Result<SyncOutcome> {
    let default_locale = &policy.default_locale;
    let existing = load_collection(store, default_locale, old_name)?;

    if titles.is_empty() {
        let mut outcome = SyncOutcome::empty();
        for record in &existing {
            outcome.deleted += delete_anchor(store, policy, &record.id)?;
        }
        info!(
            "Cleared collection '{}' ({}): {} records deleted",
            old_name, default_locale, outcome.deleted
        );
        return Ok(outcome);
    }

    let wanted: HashSet<String> = titles.iter().map(|t| fold(t)).collect();
    let present: HashSet<String> = existing.iter().map(|c| fold(&c.title)).collect();

    let (to_update, to_delete): (Vec<&Connector>, Vec<&Connector>) = existing
        .iter()
        .partition(|c| wanted.contains(&fold(&c.title)));
    let to_create: Vec<&String> = titles
        .iter()
        .filter(|t| !present.contains(&fold(t)))
        .collect();

    debug!(
        "Sync '{}' -> '{}' ({}): {} to create, {} to update, {} to delete",
        old_name,
        new_name,
        default_locale,
        to_create.len(),
        to_update.len(),
        to_delete.len()
    );

    let mut outcome = SyncOutcome::empty();
    for record in to_delete {
        outcome.deleted += delete_anchor(store, policy, &record.id)?;
    }

    let now = Utc::now();
    let renamed = new_name != old_name;
    for record in to_update {
        let patch = if renamed {
            ConnectorPatch {
                collection_name: Some(new_name.to_string()),
                ..ConnectorPatch::touch(now)
            }
        } else {
            ConnectorPatch::touch(now)
        };
        store.update_many(
            &MatchKey::IdLocale(record.id.clone(), default_locale.clone()),
            &patch,
        )?;
        if renamed {
            outcome.updated += 1;
        }
    }

    for title in to_create {
        let record = Connector::new(
            Uuid::new_v4().to_string(),
            new_name,
            title.as_str(),
            default_locale.clone(),
            now,
        );
        store.create(&record)?;
        outcome.created += 1;
    }

    outcome.records = load_collection(store, default_locale, new_name)?;
    info!(
        "Synchronized collection '{}' ({}): {} created, {} updated, {} deleted",
        new_name, default_locale, outcome.created, outcome.updated, outcome.deleted
    );
    Ok(outcome)
}

fn sync_translation<S: ConnectorStore + ?Sized>(
    store: &S,
    policy: &SyncPolicy,
    old_name: &str,
    new_name: &str,
    locale: &Locale,
    pairing: Pairing,
) -> Result<SyncOutcome> {
    let anchors = load_collection(store, &policy.default_locale, old_name)?;
    let anchor_ids: HashSet<&str> = anchors.iter().map(|a| a.id.as_str()).collect();
    let existing = load_translations(store, locale, &anchor_ids)?;

    if pairing.is_empty() {
        let mut outcome = SyncOutcome::empty();
        for record in &existing {
            outcome.deleted +=
                store.delete_many(&MatchKey::IdLocale(record.id.clone(), locale.clone()))?;
        }
        info!(
            "Cleared translations of '{}' ({}): {} records deleted",
            old_name, locale, outcome.deleted
        );
        return Ok(outcome);
    }

    if anchors.is_empty() {
        warn!(
            "Rejected {} synchronization of '{}': no {} anchors",
            locale, old_name, policy.default_locale
        );
        return Err(Error::Precondition(format!(
            "cannot translate collection '{}': it does not exist in the default locale ({}) yet",
            old_name, policy.default_locale
        )));
    }

    let pairs: Vec<(&Connector, &str)> = match &pairing {
        Pairing::Positional(titles) => titles
            .iter()
            .enumerate()
            .map(|(i, title)| (&anchors[i.min(anchors.len() - 1)], title.as_str()))
            .collect(),
        Pairing::Explicit(items) => items
            .iter()
            .map(|item| {
                anchors
                    .iter()
                    .find(|a| a.id == item.id)
                    .map(|anchor| (anchor, item.title.as_str()))
                    .ok_or_else(|| {
                        Error::Precondition(format!(
                            "connector {} is not part of collection '{}' in the default locale",
                            item.id, old_name
                        ))
                    })
            })
            .collect::<Result<_>>()?,
    };

    let mut current: HashMap<String, Connector> = existing
        .iter()
        .map(|c| (c.id.clone(), c.clone()))
        .collect();
    let mut paired: HashSet<&str> = HashSet::new();
    let mut outcome = SyncOutcome::empty();
    let now = Utc::now();

    for (anchor, title) in pairs {
        paired.insert(anchor.id.as_str());
        match current.get_mut(&anchor.id) {
            Some(translation) => {
                if translation.title == title && translation.collection_name == new_name {
                    continue;
                }
                store.update_many(
                    &MatchKey::IdLocale(anchor.id.clone(), locale.clone()),
                    &ConnectorPatch {
                        title: Some(title.to_string()),
                        collection_name: Some(new_name.to_string()),
                        updated_at: now,
                    },
                )?;
                translation.title = title.to_string();
                translation.collection_name = new_name.to_string();
                outcome.updated += 1;
            }
            None => {
                let record = Connector::new(anchor.id.as_str(), new_name, title, locale.clone(), now);
                store.create(&record)?;
                current.insert(anchor.id.clone(), record);
                outcome.created += 1;
            }
        }
    }

    let wanted = pairing.folded_titles();
    for record in &existing {
        if paired.contains(record.id.as_str()) || wanted.contains(&fold(&record.title)) {
            continue;
        }
        outcome.deleted +=
            store.delete_many(&MatchKey::IdLocale(record.id.clone(), locale.clone()))?;
    }

    outcome.records = load_translations(store, locale, &anchor_ids)?;
    info!(
        "Synchronized translations of '{}' as '{}' ({}): {} created, {} updated, {} deleted",
        old_name, new_name, locale, outcome.created, outcome.updated, outcome.deleted
    );
    Ok(outcome)
}
