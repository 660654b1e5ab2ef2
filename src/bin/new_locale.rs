//! Scaffold a new locale from the default locale's reason list.
//!
//! Usage:
//!   cargo run --bin new-locale -- --lang=de
//!   cargo run --bin new-locale -- --lang=de --dir=locales
//!
//! Every entry of the new file is prefixed with `[TODO:DE]` until it is
//! translated (by hand or with the `translate` tool).

use anyhow::Result;
use clap::Parser;
use no_as_a_service::i18n::catalog::{scaffold_locale, DEFAULT_LOCALES_DIR};
use no_as_a_service::i18n::LocaleRegistry;
use std::path::PathBuf;

/// Create `<dir>/<code>/reasons.json` for a new locale
#[derive(Parser)]
#[command(name = "new-locale")]
struct Cli {
    /// Two-letter ISO 639-1 code of the new locale
    #[arg(long)]
    lang: String,

    /// Directory holding the locale files
    #[arg(long, env = "LOCALES_DIR", default_value = DEFAULT_LOCALES_DIR)]
    dir: PathBuf,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_code = LocaleRegistry::get().default_locale().code();
    let outcome = scaffold_locale(&cli.dir, &cli.lang, default_code)?;

    println!(
        "✅ Created {} with {} entries marked [TODO:{}]",
        outcome.path.display(),
        outcome.entries,
        outcome.code.to_uppercase()
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Translate the entries: cargo run --bin translate -- --lang={}",
        outcome.code
    );
    println!(
        "  2. Register \"{}\" in src/i18n/registry.rs and embed its file in src/i18n/reasons.rs",
        outcome.code
    );
    println!("  3. Check the lists: cargo run --bin validate-locales");

    Ok(())
}
