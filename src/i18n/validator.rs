//! Locale parity validation.
//!
//! Every locale file must hold exactly as many entries as the default
//! locale's file, because entries correspond by index. The server trusts
//! this at runtime; this module is what checks it before a release.

use crate::i18n::catalog::{self, reasons_path, CatalogError};
use crate::i18n::{Locale, LocaleRegistry};
use std::fmt::Write as _;
use std::path::Path;

/// Outcome of checking one locale file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleStatus {
    Ok,
    Missing,
    Mismatch,
}

impl LocaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleStatus::Ok => "ok",
            LocaleStatus::Missing => "missing",
            LocaleStatus::Mismatch => "mismatch",
        }
    }
}

/// Check result for a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCheck {
    pub code: String,

    /// Number of entries found (0 when the file is missing)
    pub count: usize,

    pub status: LocaleStatus,

    /// Entries still carrying a `[TODO:XX]` marker
    pub untranslated: usize,

    /// Explanation for a non-ok status
    pub message: Option<String>,
}

/// Validation report over all enabled locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub expected_count: usize,
    pub checks: Vec<LocaleCheck>,
}

impl ValidationReport {
    /// Check if any locale failed validation
    pub fn has_errors(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.status != LocaleStatus::Ok)
    }

    /// Locales that still contain untranslated entries.
    ///
    /// These are warnings only; a partially translated file still has the
    /// right shape.
    pub fn warnings(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|check| check.untranslated > 0)
            .map(|check| {
                format!(
                    "{} has {} untranslated entries",
                    check.code, check.untranslated
                )
            })
            .collect()
    }

    /// Render the report as a Markdown table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("| Locale | Count | Status |\n");
        out.push_str("|--------|-------|--------|\n");
        for check in &self.checks {
            let icon = if check.status == LocaleStatus::Ok {
                "✅"
            } else {
                "❌"
            };
            let _ = writeln!(
                out,
                "| {:<6} | {:<5} | {} {} |",
                check.code,
                check.count,
                icon,
                check.status.as_str()
            );
            if let Some(message) = &check.message {
                let _ = writeln!(out, "         └─ {}", message);
            }
        }
        out
    }
}

/// Validator for locale files on disk.
pub struct LocaleValidator;

impl LocaleValidator {
    /// Validate every enabled locale under `dir` against the default locale.
    ///
    /// The default locale's own file must be readable; everything else is
    /// reported per locale.
    pub fn validate_dir(dir: &Path) -> Result<ValidationReport, CatalogError> {
        let registry = LocaleRegistry::get();
        let default = registry.default_locale();
        let baseline = catalog::read_reasons(&reasons_path(dir, default.code()))?;
        let expected_count = baseline.len();

        let mut checks = vec![LocaleCheck {
            code: default.code().to_string(),
            count: expected_count,
            status: LocaleStatus::Ok,
            untranslated: count_untranslated(&baseline),
            message: None,
        }];

        for locale in registry.list_enabled() {
            if locale == default {
                continue;
            }
            checks.push(Self::check_locale(dir, locale, expected_count)?);
        }

        Ok(ValidationReport {
            expected_count,
            checks,
        })
    }

    fn check_locale(
        dir: &Path,
        locale: Locale,
        expected_count: usize,
    ) -> Result<LocaleCheck, CatalogError> {
        let path = reasons_path(dir, locale.code());
        if !path.exists() {
            return Ok(LocaleCheck {
                code: locale.code().to_string(),
                count: 0,
                status: LocaleStatus::Missing,
                untranslated: 0,
                message: Some(format!("File not found: {}", path.display())),
            });
        }

        let reasons = catalog::read_reasons(&path)?;
        let (status, message) = if reasons.len() == expected_count {
            (LocaleStatus::Ok, None)
        } else {
            (
                LocaleStatus::Mismatch,
                Some(format!(
                    "Expected {} entries, found {}",
                    expected_count,
                    reasons.len()
                )),
            )
        };

        Ok(LocaleCheck {
            code: locale.code().to_string(),
            count: reasons.len(),
            status,
            untranslated: count_untranslated(&reasons),
            message,
        })
    }
}

fn count_untranslated(reasons: &[String]) -> usize {
    reasons
        .iter()
        .filter(|entry| catalog::is_untranslated(entry))
        .count()
}
