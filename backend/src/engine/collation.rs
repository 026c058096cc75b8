//! Locale-aware title ordering backed by ICU collation data.

use crate::engine::validate::fold;
use common::model::locale::Locale;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use log::warn;
use std::cmp::Ordering;

/// Orders titles the way a reader of one locale expects: accents sort next to
/// their base letter and case only breaks ties.
pub(crate) struct TitleCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl TitleCollator {
    pub(crate) fn for_locale(locale: &Locale) -> Self {
        let prefs = match locale.as_str().parse::<icu_locale_core::Locale>() {
            Ok(icu_locale) => CollatorPreferences::from(icu_locale),
            Err(e) => {
                warn!("Locale '{}' unknown to the collator ({}), using root order", locale, e);
                CollatorPreferences::default()
            }
        };
        let collator = match Collator::try_new(prefs, CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!("No collation data for '{}' ({}), ordering by folded case", locale, e);
                None
            }
        };
        Self { collator }
    }

    /// Total order: titles the collator considers equal fall back to the raw
    /// string so sorting stays deterministic.
    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a.trim(), b.trim()),
            None => fold(a).cmp(&fold(b)),
        };
        primary.then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tag: &str, titles: &[&'static str]) -> Vec<&'static str> {
        let collator = TitleCollator::for_locale(&Locale::parse(tag).unwrap());
        let mut titles = titles.to_vec();
        titles.sort_by(|a, b| collator.compare(a, b));
        titles
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(
            sorted("fr", &["Zèbre", "Éclair", "Avion"]),
            vec!["Avion", "Éclair", "Zèbre"]
        );
    }

    #[test]
    fn case_does_not_decide_the_order() {
        assert_eq!(
            sorted("en", &["stripe", "Adyen", "PayPal"]),
            vec!["Adyen", "PayPal", "stripe"]
        );
    }

    #[test]
    fn locale_tailoring_applies() {
        // Swedish sorts "ö" after "z"; German keeps it with "o".
        assert_eq!(sorted("sv", &["Öl", "Zon"]), vec!["Zon", "Öl"]);
        assert_eq!(sorted("de", &["Öl", "Zon"]), vec!["Öl", "Zon"]);
    }

    #[test]
    fn equal_titles_are_ordered_deterministically() {
        let collator = TitleCollator::for_locale(&Locale::parse("en").unwrap());

        assert_eq!(collator.compare("PayPal", "PayPal"), Ordering::Equal);
        assert_ne!(collator.compare("PayPal", "PayPal "), Ordering::Equal);
    }
}
