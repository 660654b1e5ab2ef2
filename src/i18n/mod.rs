//! Internationalization (i18n) module.
//!
//! Everything that knows about locales lives here: which ones exist, how a
//! request picks one, where their reason lists are stored, and how those
//! lists are checked for parity.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their metadata
//! - `locale`: Validated, copyable `Locale` handle
//! - `accept_language`: `Accept-Language` header negotiation
//! - `resolver`: Explicit parameter resolution and the request negotiation chain
//! - `reasons`: In-memory reason lists served by the API
//! - `catalog`: On-disk layout of locale files and `[TODO:XX]` markers
//! - `validator`: Cross-locale parity report
//!
//! # Example
//!
//! ```rust,ignore
//! use no_as_a_service::i18n::{negotiate_locale, ReasonStore};
//!
//! let store = ReasonStore::embedded()?;
//! let locale = negotiate_locale(None, Some("fr-FR,fr;q=0.9"));
//! let reason = store.random_reason(locale);
//! ```

mod accept_language;
pub mod catalog;
mod locale;
mod reasons;
mod registry;
mod resolver;
mod validator;

pub use accept_language::{parse_accept_language, parse_preferences, LanguagePreference};
pub use locale::Locale;
pub use reasons::ReasonStore;
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{negotiate_locale, resolve_locale};
pub use validator::{LocaleCheck, LocaleStatus, LocaleValidator, ValidationReport};
