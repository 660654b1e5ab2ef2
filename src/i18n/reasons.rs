//! Reason store: the per-locale rejection reasons served by `/no`.
//!
//! Lists are loaded once at startup and never change afterwards, so the
//! store is shared between requests behind an `Arc` without locking.
//!
//! Cross-locale parity (every list as long as the default's) is checked by
//! the `validate-locales` tool before release, not here.

use crate::i18n::catalog::{self, reasons_path};
use crate::i18n::{Locale, LocaleRegistry};
use anyhow::{bail, Context, Result};
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Reason lists compiled into the binary, keyed by locale code.
const EMBEDDED_REASONS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en/reasons.json")),
    ("es", include_str!("../../locales/es/reasons.json")),
    ("fr", include_str!("../../locales/fr/reasons.json")),
    ("ar", include_str!("../../locales/ar/reasons.json")),
];

#[derive(Debug, Clone)]
pub struct ReasonStore {
    reasons: HashMap<&'static str, Vec<String>>,
}

impl ReasonStore {
    /// Build a store from explicit lists.
    ///
    /// Every enabled locale must be present with at least one reason.
    /// Lists for codes outside the registry are ignored.
    pub fn from_lists<I>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut provided: HashMap<String, Vec<String>> = lists.into_iter().collect();
        let mut reasons = HashMap::new();

        for locale in LocaleRegistry::get().list_enabled() {
            let Some(list) = provided.remove(locale.code()) else {
                bail!("No reasons provided for locale '{}'", locale.code());
            };
            if list.is_empty() {
                bail!("Reason list for locale '{}' is empty", locale.code());
            }
            reasons.insert(locale.code(), list);
        }

        Ok(Self { reasons })
    }

    /// Parse the reason lists embedded at build time.
    pub fn embedded() -> Result<Self> {
        let lists = EMBEDDED_REASONS
            .iter()
            .map(|(code, json)| -> Result<(String, Vec<String>)> {
                let list: Vec<String> = serde_json::from_str(json)
                    .with_context(|| format!("Embedded reasons for '{}' are not valid", code))?;
                Ok((code.to_string(), list))
            })
            .collect::<Result<Vec<_>>>()?;

        let store = Self::from_lists(lists)?;
        info!(
            "Loaded embedded reasons for {} locales ({} entries in default)",
            store.reasons.len(),
            store.reasons_for(Locale::default_locale()).len()
        );
        Ok(store)
    }

    /// Load `<dir>/<code>/reasons.json` for every enabled locale.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let lists = LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|locale| -> Result<(String, Vec<String>)> {
                let list = catalog::read_reasons(&reasons_path(dir, locale.code()))?;
                Ok((locale.code().to_string(), list))
            })
            .collect::<Result<Vec<_>>>()?;

        let store = Self::from_lists(lists)?;
        info!(
            "Loaded reasons for {} locales from {}",
            store.reasons.len(),
            dir.display()
        );
        Ok(store)
    }

    /// All reasons for a locale, in file order.
    pub fn reasons_for(&self, locale: Locale) -> &[String] {
        self.reasons
            .get(locale.code())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A uniformly random reason for a locale.
    ///
    /// `None` only if the store holds no list for the locale, which the
    /// constructors rule out for every enabled locale.
    pub fn random_reason(&self, locale: Locale) -> Option<&str> {
        let reasons = self.reasons_for(locale);
        if reasons.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..reasons.len());
        reasons.get(index).map(String::as_str)
    }
}
