//! Machine translation of reason lists.
//!
//! Fills in the `[TODO:XX]` entries of a locale by translating the default
//! locale's list entry by entry, in batches, with a checkpoint file so an
//! interrupted run can be resumed.

pub mod client;
pub mod metrics;
pub mod progress;

pub use client::{TranslateError, Translator, DEFAULT_TRANSLATE_API_URL};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use progress::{progress_path, TranslationProgress, PROGRESS_FILE};

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::i18n::catalog::{
    is_untranslated, normalize_code, read_reasons, reasons_path, template_from, write_reasons,
};
use crate::i18n::LocaleRegistry;

/// Settings for one translation run.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Directory holding the locale files
    pub dir: PathBuf,
    /// Target locale code
    pub target: String,
    /// Continue from the saved checkpoint instead of `start`
    pub resume: bool,
    /// Index of the first entry to translate
    pub start: usize,
    /// Translations between checkpoints
    pub batch_size: usize,
    /// Pause after every translation
    pub request_delay: Duration,
    /// Pause after every batch
    pub batch_delay: Duration,
}

impl TranslateOptions {
    pub fn new(dir: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            target: target.into(),
            resume: false,
            start: 0,
            batch_size: 10,
            request_delay: Duration::from_millis(500),
            batch_delay: Duration::from_millis(2000),
        }
    }
}

/// Outcome of a completed translation run.
#[derive(Debug, Clone)]
pub struct TranslationSummary {
    pub code: String,
    pub path: PathBuf,
    pub total: usize,
    pub metrics: MetricsReport,
}

/// Translate every untranslated entry of the target locale.
///
/// On a translation failure the entries done so far are written out and a
/// checkpoint is saved before the error is returned.
pub async fn run_translation(
    translator: &Translator,
    options: &TranslateOptions,
) -> Result<TranslationSummary> {
    let code = normalize_code(&options.target)?;
    let default_locale = LocaleRegistry::get().default_locale();
    if code == default_locale.code() {
        bail!(
            "\"{}\" is the default locale and is the translation source",
            code
        );
    }

    let source_path = reasons_path(&options.dir, default_locale.code());
    let source = read_reasons(&source_path)
        .with_context(|| format!("Failed to load source locale \"{}\"", default_locale.code()))?;

    let target_path = reasons_path(&options.dir, &code);
    let mut target = if target_path.exists() {
        read_reasons(&target_path)?
    } else {
        info!("No file for \"{}\" yet, starting from a template", code);
        template_from(&code, &source)
    };

    if target.len() != source.len() {
        bail!(
            "{} has {} entries but {} has {}; fix the lists before translating",
            code,
            target.len(),
            default_locale.code(),
            source.len()
        );
    }

    let checkpoint_path = progress_path(&options.dir, &code);
    let (start, mut completed) = if options.resume {
        match TranslationProgress::load(&checkpoint_path)? {
            Some(progress) => {
                info!(
                    "Resuming \"{}\" from entry {} ({} completed previously)",
                    code,
                    progress.next_index(),
                    progress.completed_count
                );
                (progress.next_index(), progress.completed_count)
            }
            None => {
                warn!("No checkpoint found for \"{}\", starting from the beginning", code);
                (0, 0)
            }
        }
    } else {
        (options.start, 0)
    };

    let total = source.len();
    let batch_size = options.batch_size.max(1);
    let metrics = translator.metrics();

    info!(
        "Translating {} entries into \"{}\" starting at {}",
        total, code, start
    );

    for i in start.min(total)..total {
        if !is_untranslated(&target[i]) {
            metrics.record_skipped();
            continue;
        }

        match translator.translate(&source[i], &code).await {
            Ok(text) => {
                target[i] = text;
                metrics.record_translated();
                completed += 1;
                info!("[{}/{}] translated", i + 1, total);

                sleep(options.request_delay).await;

                if metrics.translated() % batch_size == 0 {
                    write_reasons(&target_path, &target)?;
                    TranslationProgress::new(Some(i), completed).save(&checkpoint_path)?;
                    info!("Checkpoint saved at entry {}", i);
                    sleep(options.batch_delay).await;
                }
            }
            Err(e) => {
                error!("Translation of entry {} failed: {}", i, e);
                write_reasons(&target_path, &target)?;
                TranslationProgress::new(i.checked_sub(1), completed).save(&checkpoint_path)?;
                return Err(anyhow::Error::new(e).context(format!(
                    "Translation into \"{}\" stopped at entry {}; re-run with --resume to continue",
                    code, i
                )));
            }
        }
    }

    write_reasons(&target_path, &target)?;
    TranslationProgress::clear(&checkpoint_path)?;

    let report = metrics.report();
    info!(
        "Translation into \"{}\" complete: {} translated, {} skipped, {} API calls ({} rate limited, {} failed, {:.1}% success)",
        code,
        report.translated,
        report.skipped,
        report.api_calls,
        report.rate_limited,
        report.api_failures,
        report.api_success_rate
    );

    Ok(TranslationSummary {
        code,
        path: target_path,
        total,
        metrics: report,
    })
}
