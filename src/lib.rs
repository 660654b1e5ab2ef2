//! No-as-a-Service: random, localized rejection reasons over HTTP.

pub mod config;
pub mod i18n;
pub mod rate_limit;
pub mod retry;
pub mod server;
pub mod translation;
