//! Locale catalog: the on-disk layout of reason lists.
//!
//! Each locale lives at `<dir>/<code>/reasons.json` as a flat JSON array
//! of strings. Entries that still await translation carry a
//! `[TODO:<CODE>] ` prefix.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Directory holding the locale files, relative to the repository root.
pub const DEFAULT_LOCALES_DIR: &str = "locales";

/// File name of a locale's reason list inside its directory.
pub const REASONS_FILE: &str = "reasons.json";

const TODO_PREFIX: &str = "[TODO:";

static LOCALE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Locale must be a 2-letter ISO code (e.g., de, ja, zh), got '{0}'")]
    InvalidCode(String),

    #[error("Locale \"{code}\" already exists at {path}")]
    AlreadyExists { code: String, path: PathBuf },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid locale file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Path of a locale's reason file.
pub fn reasons_path(dir: &Path, code: &str) -> PathBuf {
    dir.join(code).join(REASONS_FILE)
}

/// The untranslated marker for a locale, e.g. `[TODO:DE]`.
pub fn todo_marker(code: &str) -> String {
    format!("{}{}]", TODO_PREFIX, code.to_uppercase())
}

/// Prefix an entry with the locale's untranslated marker.
pub fn mark_untranslated(code: &str, entry: &str) -> String {
    format!("{} {}", todo_marker(code), entry)
}

/// Whether an entry still carries an untranslated marker.
pub fn is_untranslated(entry: &str) -> bool {
    entry.starts_with(TODO_PREFIX)
}

/// Normalize and validate a locale code given on the command line.
pub fn normalize_code(raw: &str) -> Result<String, CatalogError> {
    let code = raw.trim().to_lowercase();
    let regex = LOCALE_CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]{2}$").expect("locale code pattern is a valid regex")
    });
    if regex.is_match(&code) {
        Ok(code)
    } else {
        Err(CatalogError::InvalidCode(raw.to_string()))
    }
}

/// Read a reason list from a JSON file.
pub fn read_reasons(path: &Path) -> Result<Vec<String>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reasons = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reasons)
}

/// Write a reason list as pretty-printed JSON with a trailing newline,
/// creating the locale directory if needed.
pub fn write_reasons(path: &Path, reasons: &[String]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut json = serde_json::to_string_pretty(reasons).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    fs::write(path, json).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} entries to {}", reasons.len(), path.display());
    Ok(())
}

/// A TODO-marked copy of the source list for a new locale.
pub fn template_from(code: &str, source: &[String]) -> Vec<String> {
    source
        .iter()
        .map(|entry| mark_untranslated(code, entry))
        .collect()
}

/// Result of scaffolding a new locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub code: String,
    pub path: PathBuf,
    pub entries: usize,
}

/// Create `<dir>/<code>/reasons.json` from the default locale's list, with
/// every entry marked untranslated.
pub fn scaffold_locale(
    dir: &Path,
    raw_code: &str,
    default_code: &str,
) -> Result<ScaffoldOutcome, CatalogError> {
    let code = normalize_code(raw_code)?;
    let target = reasons_path(dir, &code);
    if target.exists() {
        return Err(CatalogError::AlreadyExists { code, path: target });
    }

    let source = read_reasons(&reasons_path(dir, default_code))?;
    let template = template_from(&code, &source);
    write_reasons(&target, &template)?;

    Ok(ScaffoldOutcome {
        code,
        path: target,
        entries: template.len(),
    })
}
