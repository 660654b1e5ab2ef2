//! Locale resolution for a request.
//!
//! Precedence is explicit parameter, then `Accept-Language`, then the
//! default locale.

use crate::i18n::accept_language::parse_accept_language;
use crate::i18n::{Locale, LocaleRegistry};

/// Resolve an explicitly requested locale code.
///
/// Only an exact, case-sensitive registry code is honoured. Anything else,
/// including region tags like `es-ES`, quietly falls back to the default.
pub fn resolve_locale(requested: Option<&str>) -> Locale {
    let registry = LocaleRegistry::get();
    requested
        .and_then(|code| registry.lookup(code))
        .unwrap_or_else(|| registry.default_locale())
}

/// Pick the locale for a request from its `lang` parameter and
/// `Accept-Language` header.
///
/// A non-empty `lang` parameter decides on its own: an unsupported value
/// yields the default locale, not the header's choice.
pub fn negotiate_locale(explicit: Option<&str>, accept_language: Option<&str>) -> Locale {
    match explicit.filter(|code| !code.is_empty()) {
        Some(code) => resolve_locale(Some(code)),
        None => parse_accept_language(accept_language),
    }
}
