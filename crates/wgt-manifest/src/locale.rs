//! Locale-aware selection of localized manifest text

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::xml::Element;

const DEFAULT_LOCALE: &str = "en_US";
const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// A locale name such as `en_US` or `fr`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(name: impl Into<String>) -> Self {
        Locale(name.into())
    }

    /// Locale from the POSIX environment, defaulting to `en_US`
    ///
    /// `LANG=fr_FR.UTF-8@euro` yields `fr_FR`; the `C` and `POSIX` locales
    /// are treated as unset.
    pub fn from_env() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::from_posix(&value))
            .unwrap_or_else(|| Locale::new(DEFAULT_LOCALE))
    }

    fn from_posix(value: &str) -> Option<Self> {
        let name = value
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() || name == "C" || name == "POSIX" {
            return None;
        }
        Some(Locale::new(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// BCP-47 style tag: the third character becomes a hyphen (`en_US` -> `en-US`)
    pub fn language_tag(&self) -> String {
        if self.0.chars().count() <= 2 {
            return self.0.clone();
        }
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| if i == 2 { '-' } else { c })
            .collect()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new(DEFAULT_LOCALE)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text of the `child_tag` descendant of `parent` best matching `locale`
///
/// With several candidates, the first whose `xml:lang` equals the language
/// tag, or is a two-letter code equal to the tag's language, wins. Otherwise
/// the first candidate is used regardless of its language. Returns an empty
/// string when there is no candidate at all.
pub fn resolve_localized_text(parent: &Element, child_tag: &str, locale: &Locale) -> String {
    let candidates = parent.descendants(child_tag);
    let tag = locale.language_tag();
    let language: String = tag.chars().take(2).collect();

    if candidates.len() > 1 {
        let matched = candidates.iter().find(|element| {
            let lang = element.attribute_or("xml:lang", "");
            lang == tag || (lang.chars().count() == 2 && lang == language)
        });
        if let Some(element) = matched {
            return element.text();
        }
    }

    candidates
        .first()
        .map(|element| element.text())
        .unwrap_or_default()
}
