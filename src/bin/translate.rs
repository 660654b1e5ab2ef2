//! Machine-translate the untranslated entries of a locale.
//!
//! Usage:
//!   cargo run --bin translate -- --lang=de
//!   cargo run --bin translate -- --lang=de --resume
//!   cargo run --bin translate -- --lang=de --start=40
//!
//! Optional environment variables:
//! - LOCALES_DIR (defaults to locales)
//! - TRANSLATE_API_URL (defaults to https://translate.googleapis.com)

use anyhow::Result;
use clap::Parser;
use no_as_a_service::i18n::catalog::DEFAULT_LOCALES_DIR;
use no_as_a_service::i18n::LocaleRegistry;
use no_as_a_service::translation::{
    run_translation, TranslateOptions, Translator, DEFAULT_TRANSLATE_API_URL,
};
use std::path::PathBuf;
use tracing::info;

/// Translate `[TODO:XX]` entries from the default locale
#[derive(Parser)]
#[command(name = "translate")]
struct Cli {
    /// Two-letter code of the target locale
    #[arg(long)]
    lang: String,

    /// Continue from the last checkpoint
    #[arg(long)]
    resume: bool,

    /// Index of the first entry to translate
    #[arg(long, default_value_t = 0, conflicts_with = "resume")]
    start: usize,

    /// Directory holding the locale files
    #[arg(long, env = "LOCALES_DIR", default_value = DEFAULT_LOCALES_DIR)]
    dir: PathBuf,

    /// Base URL of the translation API
    #[arg(long, env = "TRANSLATE_API_URL", default_value = DEFAULT_TRANSLATE_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("no_as_a_service=info".parse()?)
                .add_directive("translate=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let source_lang = LocaleRegistry::get().default_locale().code();
    let translator = Translator::new(cli.api_url, source_lang);
    let options = TranslateOptions {
        resume: cli.resume,
        start: cli.start,
        ..TranslateOptions::new(cli.dir, cli.lang)
    };

    let summary = run_translation(&translator, &options).await?;

    info!(
        "Wrote {} ({} of {} entries translated this run)",
        summary.path.display(),
        summary.metrics.translated,
        summary.total
    );
    Ok(())
}
