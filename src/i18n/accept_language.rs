//! `Accept-Language` negotiation.
//!
//! Turns a raw header such as `fr-CH, fr;q=0.9, en;q=0.8` into the best
//! supported locale. Only the primary subtag takes part in matching, so
//! `es-ES` and `es-MX` both select `es`.

use crate::i18n::{Locale, LocaleRegistry};

/// One ranked entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Lower-cased primary subtag (`"es"` for `es-ES`)
    pub base: String,

    /// Quality weight in [0, 1]
    pub quality: f32,
}

/// Parse a header into preferences ordered by descending quality.
///
/// Ties keep their header order. Segments whose `q` parameter is not a
/// finite number are dropped; out-of-range values are clamped to [0, 1].
pub fn parse_preferences(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> =
        header.split(',').filter_map(parse_segment).collect();

    // sort_by is stable, which is what gives header order to equal weights
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

fn parse_segment(segment: &str) -> Option<LanguagePreference> {
    let mut parts = segment.split(';');
    let tag = parts.next()?.trim();
    let base = tag.split('-').next()?.trim().to_lowercase();
    if base.is_empty() {
        return None;
    }

    let mut quality = 1.0_f32;
    for param in parts {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("q") {
            let parsed: f32 = value.trim().parse().ok()?;
            if !parsed.is_finite() {
                return None;
            }
            quality = parsed.clamp(0.0, 1.0);
        }
    }

    Some(LanguagePreference { base, quality })
}

/// Pick the supported locale a client asked for.
///
/// An absent or blank header, or one naming no supported language, yields
/// the default locale.
pub fn parse_accept_language(header: Option<&str>) -> Locale {
    let registry = LocaleRegistry::get();

    let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
        return registry.default_locale();
    };

    parse_preferences(header)
        .iter()
        .find_map(|pref| registry.lookup(&pref.base))
        .unwrap_or_else(|| registry.default_locale())
}
