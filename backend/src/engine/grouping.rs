//! Derives sliders from the flat connector records.
//!
//! Only default-locale records ("anchors") define collections. Every other
//! record is attached to the collection of the anchor that shares its `id`,
//! whatever its own `collection_name` says, so a translated slider name can
//! differ freely from the canonical one. Translations without an anchor never
//! show up in a collection; `find_orphans` reports them instead.

use crate::engine::collation::TitleCollator;
use crate::engine::validate::validate_record;
use crate::error::Result;
use common::model::collection::Collection;
use common::model::connector::Connector;
use common::model::locale::Locale;
use std::collections::{BTreeMap, HashMap, HashSet};

enum View<'a> {
    /// Every locale variant of every anchor.
    Admin,
    /// Anchors only.
    Default,
    /// One record per anchor: its translation, else the anchor itself.
    Translated(&'a Locale),
}

/// Groups `records` into collections.
///
/// With no `target_locale` the administrative view is built. With a target,
/// each anchor contributes exactly one item, falling back to the anchor when
/// no translation exists in that locale.
pub fn resolve_collections(
    records: &[Connector],
    target_locale: Option<&Locale>,
    default_locale: &Locale,
) -> Result<Vec<Collection>> {
    for record in records {
        validate_record(record)?;
    }

    let view = match target_locale {
        None => View::Admin,
        Some(locale) if locale == default_locale => View::Default,
        Some(locale) => View::Translated(locale),
    };

    let mut by_id: HashMap<&str, Vec<&Connector>> = HashMap::new();
    for record in records {
        by_id.entry(record.id.as_str()).or_default().push(record);
    }

    let mut anchors_by_name: BTreeMap<&str, Vec<&Connector>> = BTreeMap::new();
    for anchor in records.iter().filter(|r| r.is_default_locale(default_locale)) {
        anchors_by_name
            .entry(anchor.collection_name.as_str())
            .or_default()
            .push(anchor);
    }

    let view_locale = match view {
        View::Translated(locale) => locale,
        View::Admin | View::Default => default_locale,
    };
    let mut collators: HashMap<&Locale, TitleCollator> = HashMap::new();
    collators.insert(view_locale, TitleCollator::for_locale(view_locale));
    if let View::Admin = view {
        for record in records {
            collators
                .entry(&record.locale)
                .or_insert_with(|| TitleCollator::for_locale(&record.locale));
        }
    }

    let mut collections: Vec<Collection> = anchors_by_name
        .into_iter()
        .map(|(canonical_name, anchors)| {
            let members = collect_members(&view, &anchors, &by_id);
            build_collection(&view, canonical_name, members, default_locale, &collators)
        })
        .filter(|c| !c.items.is_empty())
        .collect();

    let name_order = &collators[view_locale];
    collections.sort_by(|a, b| name_order.compare(&a.name, &b.name));
    Ok(collections)
}

fn collect_members<'a>(
    view: &View<'_>,
    anchors: &[&'a Connector],
    by_id: &HashMap<&str, Vec<&'a Connector>>,
) -> Vec<&'a Connector> {
    // Public views dedup by id alone; the admin view legitimately holds several
    // locales per id.
    let mut seen: HashSet<(&str, Option<&Locale>)> = HashSet::new();
    let mut members = Vec::with_capacity(anchors.len());

    for &anchor in anchors {
        let variants = by_id
            .get(anchor.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        match view {
            View::Admin => {
                for &variant in variants {
                    if seen.insert((variant.id.as_str(), Some(&variant.locale))) {
                        members.push(variant);
                    }
                }
            }
            View::Default => {
                if seen.insert((anchor.id.as_str(), None)) {
                    members.push(anchor);
                }
            }
            View::Translated(locale) => {
                let picked = variants
                    .iter()
                    .copied()
                    .find(|v| &v.locale == *locale)
                    .unwrap_or(anchor);
                if seen.insert((anchor.id.as_str(), None)) {
                    members.push(picked);
                }
            }
        }
    }
    members
}

fn build_collection(
    view: &View<'_>,
    canonical_name: &str,
    mut members: Vec<&Connector>,
    default_locale: &Locale,
    collators: &HashMap<&Locale, TitleCollator>,
) -> Collection {
    match view {
        View::Admin => members.sort_by(|a, b| {
            let a_default = a.is_default_locale(default_locale);
            let b_default = b.is_default_locale(default_locale);
            // Titles are only compared within one locale.
            b_default
                .cmp(&a_default)
                .then_with(|| a.locale.cmp(&b.locale))
                .then_with(|| collators[&a.locale].compare(&a.title, &b.title))
        }),
        View::Default | View::Translated(_) => {
            let locale = match view {
                View::Translated(locale) => *locale,
                _ => default_locale,
            };
            let collator = &collators[locale];
            members.sort_by(|a, b| collator.compare(&a.title, &b.title))
        }
    }

    let name = match (view, members.first()) {
        (View::Translated(locale), Some(first)) if &first.locale == *locale => {
            first.collection_name.clone()
        }
        _ => canonical_name.to_string(),
    };

    Collection {
        name,
        canonical_name: canonical_name.to_string(),
        items: members.into_iter().cloned().collect(),
    }
}

/// Translations whose `id` has no default-locale anchor, ordered by `(id, locale)`.
pub fn find_orphans(records: &[Connector], default_locale: &Locale) -> Vec<Connector> {
    let anchor_ids: HashSet<&str> = records
        .iter()
        .filter(|r| r.is_default_locale(default_locale))
        .map(|r| r.id.as_str())
        .collect();

    let mut orphans: Vec<Connector> = records
        .iter()
        .filter(|r| !r.is_default_locale(default_locale) && !anchor_ids.contains(r.id.as_str()))
        .cloned()
        .collect();
    orphans.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.locale.cmp(&b.locale)));
    orphans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::Utc;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn record(id: &str, name: &str, title: &str, tag: &str) -> Connector {
        Connector::new(id, name, title, locale(tag), Utc::now())
    }

    fn titles(collection: &Collection) -> Vec<&str> {
        collection.items.iter().map(|c| c.title.as_str()).collect()
    }

    fn fixture() -> Vec<Connector> {
        vec![
            record("1", "Gateways", "Stripe", "en"),
            record("2", "Gateways", "PayPal", "en"),
            record("3", "Gateways", "Adyen", "en"),
            record("2", "Passerelles", "PayPal FR", "fr"),
            record("1", "Passerelles", "Stripe FR", "fr"),
            record("4", "Features", "Invoices", "en"),
        ]
    }

    #[test]
    fn translated_view_falls_back_per_item() {
        let collections = resolve_collections(&fixture(), Some(&locale("fr")), &locale("en")).unwrap();

        assert_eq!(collections.len(), 2);
        let gateways = collections
            .iter()
            .find(|c| c.canonical_name == "Gateways")
            .unwrap();
        assert_eq!(titles(gateways), vec!["Adyen", "PayPal FR", "Stripe FR"]);

        let features = collections
            .iter()
            .find(|c| c.canonical_name == "Features")
            .unwrap();
        assert_eq!(titles(features), vec!["Invoices"]);
        assert_eq!(features.name, "Features");
    }

    #[test]
    fn every_anchor_emits_exactly_one_item_in_every_locale() {
        let records = fixture();
        for tag in ["en", "fr", "de"] {
            let collections = resolve_collections(&records, Some(&locale(tag)), &locale("en")).unwrap();
            let emitted: usize = collections.iter().map(|c| c.items.len()).sum();
            assert_eq!(emitted, 4, "locale {}", tag);
        }
    }

    #[test]
    fn display_name_comes_from_first_member_translation() {
        let mut records = fixture();
        records.retain(|r| r.id != "3");

        let collections = resolve_collections(&records, Some(&locale("fr")), &locale("en")).unwrap();
        let gateways = collections
            .iter()
            .find(|c| c.canonical_name == "Gateways")
            .unwrap();

        assert_eq!(gateways.name, "Passerelles");
    }

    #[test]
    fn untranslated_first_member_keeps_canonical_name() {
        let collections = resolve_collections(&fixture(), Some(&locale("fr")), &locale("en")).unwrap();
        let gateways = collections
            .iter()
            .find(|c| c.canonical_name == "Gateways")
            .unwrap();

        // "Adyen" sorts first and has no French record.
        assert_eq!(gateways.name, "Gateways");
    }

    #[test]
    fn default_view_lists_anchors_only() {
        let collections = resolve_collections(&fixture(), Some(&locale("en")), &locale("en")).unwrap();

        assert_eq!(collections[0].name, "Features");
        assert_eq!(titles(&collections[1]), vec!["Adyen", "PayPal", "Stripe"]);
        assert!(collections
            .iter()
            .flat_map(|c| &c.items)
            .all(|c| c.locale == locale("en")));
    }

    #[test]
    fn admin_view_puts_default_locale_first() {
        let collections = resolve_collections(&fixture(), None, &locale("en")).unwrap();
        let gateways = collections
            .iter()
            .find(|c| c.canonical_name == "Gateways")
            .unwrap();

        assert_eq!(
            titles(gateways),
            vec!["Adyen", "PayPal", "Stripe", "PayPal FR", "Stripe FR"]
        );
    }

    #[test]
    fn duplicated_records_are_emitted_once() {
        let mut records = fixture();
        records.push(record("2", "Gateways", "PayPal", "en"));
        records.push(record("2", "Passerelles", "PayPal FR", "fr"));

        let public = resolve_collections(&records, Some(&locale("fr")), &locale("en")).unwrap();
        for collection in &public {
            let ids: HashSet<&str> = collection.items.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), collection.items.len());
        }

        let admin = resolve_collections(&records, None, &locale("en")).unwrap();
        for collection in &admin {
            let keys: HashSet<(&str, &Locale)> = collection
                .items
                .iter()
                .map(|c| (c.id.as_str(), &c.locale))
                .collect();
            assert_eq!(keys.len(), collection.items.len());
        }
    }

    #[test]
    fn translated_names_never_create_collections() {
        let records = vec![
            record("1", "Gateways", "Stripe", "en"),
            record("9", "Fantôme", "Orphelin", "fr"),
        ];

        for target in [None, Some(locale("fr"))] {
            let collections = resolve_collections(&records, target.as_ref(), &locale("en")).unwrap();
            assert_eq!(collections.len(), 1);
            assert_eq!(collections[0].canonical_name, "Gateways");
        }
    }

    #[test]
    fn orphans_are_reported() {
        let records = vec![
            record("1", "Gateways", "Stripe", "en"),
            record("1", "Passerelles", "Stripe FR", "fr"),
            record("9", "Passerelles", "Orphelin", "fr"),
            record("9", "Gateways", "Waise", "de"),
        ];

        let orphans = find_orphans(&records, &locale("en"));

        assert_eq!(orphans.len(), 2);
        assert!(orphans.iter().all(|c| c.id == "9"));
        assert_eq!(orphans[0].locale, locale("de"));
    }

    #[test]
    fn accented_titles_follow_locale_collation() {
        let records = vec![
            record("1", "Cartes", "Zebra", "en"),
            record("2", "Cartes", "Lightning", "en"),
            record("3", "Cartes", "Plane", "en"),
            record("1", "Cartes", "Zèbre", "fr"),
            record("2", "Cartes", "Éclair", "fr"),
            record("3", "Cartes", "Avion", "fr"),
        ];

        let public = resolve_collections(&records, Some(&locale("fr")), &locale("en")).unwrap();
        assert_eq!(titles(&public[0]), vec!["Avion", "Éclair", "Zèbre"]);

        let admin = resolve_collections(&records, None, &locale("en")).unwrap();
        assert_eq!(
            titles(&admin[0]),
            vec!["Lightning", "Plane", "Zebra", "Avion", "Éclair", "Zèbre"]
        );
    }

    #[test]
    fn collection_names_follow_locale_collation() {
        let records = vec![
            record("1", "Zoo", "Lion", "en"),
            record("2", "Apps", "Mail", "en"),
            record("3", "Cars", "Sedan", "en"),
            record("1", "Zoo", "Lion", "fr"),
            record("2", "Applis", "Courriel", "fr"),
            record("3", "Écurie", "Berline", "fr"),
        ];

        let public = resolve_collections(&records, Some(&locale("fr")), &locale("en")).unwrap();
        let names: Vec<&str> = public.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Applis", "Écurie", "Zoo"]);
    }

    #[test]
    fn blank_title_is_a_validation_error() {
        let records = vec![record("1", "Gateways", "  ", "en")];

        let result = resolve_collections(&records, None, &locale("en"));

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn empty_input_yields_no_collections() {
        assert!(resolve_collections(&[], Some(&locale("fr")), &locale("en"))
            .unwrap()
            .is_empty());
    }
}
