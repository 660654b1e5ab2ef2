//! Locale registry: Single source of truth for all supported locales.
//!
//! Every locale the service can answer in is declared here, together with
//! its text direction. The registry is a singleton built
//! once with `OnceLock` and never mutated afterwards, so request handlers
//! read it without locking.

use crate::i18n::Locale;
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleConfig {
    /// ISO 639-1 language code (e.g., "en", "es", "ar")
    pub code: &'static str,

    /// Whether this is the default locale (exactly one should be true)
    pub is_default: bool,

    /// Whether text in this locale is written right-to-left
    pub rtl: bool,

    /// Whether this locale is served
    pub enabled: bool,
}

pub(crate) const ENGLISH: LocaleConfig = LocaleConfig {
    code: "en",
    is_default: true,
    rtl: false,
    enabled: true,
};

pub(crate) const SPANISH: LocaleConfig = LocaleConfig {
    code: "es",
    is_default: false,
    rtl: false,
    enabled: true,
};

pub(crate) const FRENCH: LocaleConfig = LocaleConfig {
    code: "fr",
    is_default: false,
    rtl: false,
    enabled: true,
};

pub(crate) const ARABIC: LocaleConfig = LocaleConfig {
    code: "ar",
    is_default: false,
    rtl: true,
    enabled: true,
};

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<Locale>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Look up an enabled locale by its exact code.
    ///
    /// Matching is case-sensitive: `"es"` is supported, `"ES"` and `"es-ES"`
    /// are not. Callers that accept looser input normalize it first.
    pub fn lookup(&self, code: &str) -> Option<Locale> {
        self.locales
            .iter()
            .copied()
            .find(|locale| locale.code() == code && locale.config().enabled)
    }

    /// Get all enabled locales, in registry order.
    pub fn list_enabled(&self) -> Vec<Locale> {
        self.locales
            .iter()
            .copied()
            .filter(|locale| locale.config().enabled)
            .collect()
    }

    /// Codes of all enabled locales, in registry order.
    pub fn supported_codes(&self) -> Vec<&'static str> {
        self.list_enabled().iter().map(Locale::code).collect()
    }

    /// Codes of enabled locales written right-to-left.
    pub fn rtl_codes(&self) -> Vec<&'static str> {
        self.list_enabled()
            .iter()
            .filter(|locale| locale.is_rtl())
            .map(Locale::code)
            .collect()
    }

    /// Get the default locale.
    ///
    /// Every negotiation that finds no acceptable match ends here. If the
    /// registry were ever edited to flag no enabled default, English is used.
    pub fn default_locale(&self) -> Locale {
        self.locales
            .iter()
            .copied()
            .find(|locale| locale.config().is_default && locale.config().enabled)
            .unwrap_or(Locale::ENGLISH)
    }
}

/// Default locale configurations.
///
/// Adding a locale means adding its config here, its data file under
/// `locales/`, and its entry in the embedded reason table.
fn default_locales() -> Vec<Locale> {
    vec![
        Locale::ENGLISH,
        Locale::SPANISH,
        Locale::FRENCH,
        Locale::ARABIC,
    ]
}
