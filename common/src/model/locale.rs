use serde::{Deserialize, Serialize};
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Locale treated as authoritative for identity and fallback when no other
/// default is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// A validated, canonicalized BCP-47 language tag (`en`, `fr`, `pt-BR`).
///
/// Every connector record carries one. Two records for the same item are
/// linked by sharing an `id`, and are told apart by their `Locale`, so the
/// canonical form matters: `"EN"` and `"en"` must never produce two rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    Empty,
    Malformed(String),
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::Empty => write!(f, "locale must not be empty"),
            LocaleError::Malformed(raw) => write!(f, "malformed locale tag: {}", raw),
        }
    }
}

impl std::error::Error for LocaleError {}

impl Locale {
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }
        let langid: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| LocaleError::Malformed(trimmed.to_string()))?;
        Ok(Locale(langid.to_string()))
    }

    pub fn default_locale() -> Self {
        Locale(DEFAULT_LOCALE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonicalizes_case() {
        assert_eq!(Locale::parse(" EN ").unwrap().as_str(), "en");
        assert_eq!(Locale::parse("pt-br").unwrap().as_str(), "pt-BR");
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(Locale::parse("   "), Err(LocaleError::Empty));
        assert!(matches!(
            Locale::parse("not a locale!"),
            Err(LocaleError::Malformed(_))
        ));
    }

    #[test]
    fn deserializing_goes_through_validation() {
        let ok: Locale = serde_json::from_str("\"FR\"").unwrap();
        assert_eq!(ok.as_str(), "fr");
        assert!(serde_json::from_str::<Locale>("\"\"").is_err());
    }
}
