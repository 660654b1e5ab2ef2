//! Locale type: a validated handle to a registry entry.

use crate::i18n::registry::{self, LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
///
/// Values only come from the registry (or the constants below), so holding
/// a `Locale` means the code is one the service can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    pub const ENGLISH: Locale = Locale {
        config: &registry::ENGLISH,
    };

    pub const SPANISH: Locale = Locale {
        config: &registry::SPANISH,
    };

    pub const FRENCH: Locale = Locale {
        config: &registry::FRENCH,
    };

    pub const ARABIC: Locale = Locale {
        config: &registry::ARABIC,
    };

    /// The default locale (the fallback of every negotiation).
    pub fn default_locale() -> Locale {
        LocaleRegistry::get().default_locale()
    }

    pub fn code(&self) -> &'static str {
        self.config.code
    }

    pub fn config(&self) -> &'static LocaleConfig {
        self.config
    }

    pub fn is_rtl(&self) -> bool {
        self.config.rtl
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Locales serialize as their bare code (`"es"`), which is what API
/// clients see in `lang` and `defaultLang`.
impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
