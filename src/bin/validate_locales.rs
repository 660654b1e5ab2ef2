//! Check that every locale has as many reasons as the default locale.
//!
//! Usage:
//!   cargo run --bin validate-locales
//!   cargo run --bin validate-locales -- --dir=locales
//!
//! Exits non-zero when a locale is missing or its count differs.
//! Untranslated `[TODO:XX]` entries are reported as warnings only.

use clap::Parser;
use no_as_a_service::i18n::catalog::DEFAULT_LOCALES_DIR;
use no_as_a_service::i18n::LocaleValidator;
use std::path::PathBuf;
use std::process::exit;

/// Validate the locale reason lists
#[derive(Parser)]
#[command(name = "validate-locales")]
struct Cli {
    /// Directory holding the locale files
    #[arg(long, env = "LOCALES_DIR", default_value = DEFAULT_LOCALES_DIR)]
    dir: PathBuf,
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let report = match LocaleValidator::validate_dir(&cli.dir) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("🚨 {}", e);
            exit(1);
        }
    };

    println!("{}", report.render());

    for warning in report.warnings() {
        println!("⚠️  {}", warning);
    }

    if report.has_errors() {
        eprintln!("🚨 Locale validation failed");
        exit(1);
    }
    println!("✅ All locales have {} entries", report.expected_count);
}
