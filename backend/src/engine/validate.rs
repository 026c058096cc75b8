use crate::error::{Error, Result};
use common::model::connector::Connector;
use std::collections::HashSet;

/// Case-folded form used for every title comparison.
pub(crate) fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Trims submitted titles and drops blank ones, keeping every position.
pub(crate) fn trim_titles(titles: &[String]) -> Vec<String> {
    titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims submitted titles, drops blank ones and collapses case-insensitive
/// duplicates. The first spelling of a duplicate wins.
pub(crate) fn normalize_titles(titles: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(fold(t)))
        .map(str::to_string)
        .collect()
}

pub(crate) fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

/// Rejects records the engines cannot reason about.
pub(crate) fn validate_record(record: &Connector) -> Result<()> {
    if record.id.trim().is_empty() {
        return Err(Error::Validation(format!(
            "connector '{}' ({}) has no id",
            record.title, record.locale
        )));
    }
    if record.title.trim().is_empty() {
        return Err(Error::Validation(format!(
            "connector {} ({}) has no title",
            record.id, record.locale
        )));
    }
    if record.collection_name.trim().is_empty() {
        return Err(Error::Validation(format!(
            "connector {} ({}) has no collection name",
            record.id, record.locale
        )));
    }
    Ok(())
}
