use crate::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
use anyhow::Context;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Rate limiting
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    /// How often expired rate-limit records are swept; `None` disables it
    pub rate_limit_sweep_interval: Option<Duration>,

    // Data
    /// Directory to load locale files from instead of the embedded data
    pub locales_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Rate limiting (zero would disable limiting or the window, so it falls back)
            rate_limit_max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u32| v > 0)
                .unwrap_or(DEFAULT_MAX_REQUESTS),
            rate_limit_window: std::env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_WINDOW),
            rate_limit_sweep_interval: match std::env::var("RATE_LIMIT_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
            {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => Some(Duration::from_secs(300)),
            },

            // Data
            locales_dir: std::env::var("LOCALES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Socket address the server binds to. `HOST` must be an IP literal,
    /// IPv4 or IPv6 (`::` listens on every IPv6 interface).
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .with_context(|| format!("HOST must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "HOST",
        "PORT",
        "RATE_LIMIT_MAX_REQUESTS",
        "RATE_LIMIT_WINDOW_MS",
        "RATE_LIMIT_SWEEP_SECS",
        "LOCALES_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit_max_requests, 120);
        assert_eq!(config.rate_limit_window, Duration::from_millis(60_000));
        assert_eq!(
            config.rate_limit_sweep_interval,
            Some(Duration::from_secs(300))
        );
        assert!(config.locales_dir.is_none());
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "3000");
        std::env::set_var("RATE_LIMIT_MAX_REQUESTS", "10");
        std::env::set_var("RATE_LIMIT_WINDOW_MS", "1000");
        std::env::set_var("RATE_LIMIT_SWEEP_SECS", "30");
        std::env::set_var("LOCALES_DIR", "/srv/locales");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.rate_limit_max_requests, 10);
        assert_eq!(config.rate_limit_window, Duration::from_secs(1));
        assert_eq!(config.rate_limit_sweep_interval, Some(Duration::from_secs(30)));
        assert_eq!(config.locales_dir, Some(PathBuf::from("/srv/locales")));
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("RATE_LIMIT_MAX_REQUESTS", "0");
        std::env::set_var("RATE_LIMIT_WINDOW_MS", "-5");
        std::env::set_var("LOCALES_DIR", "  ");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit_max_requests, 120);
        assert_eq!(config.rate_limit_window, Duration::from_millis(60_000));
        assert!(config.locales_dir.is_none());
    }

    #[test]
    #[serial]
    fn test_zero_sweep_disables_sweeper() {
        clear_env();
        std::env::set_var("RATE_LIMIT_SWEEP_SECS", "0");

        let config = Config::from_env();
        clear_env();

        assert!(config.rate_limit_sweep_interval.is_none());
    }

    #[test]
    #[serial]
    fn test_ipv6_host() {
        clear_env();
        std::env::set_var("HOST", "::");
        std::env::set_var("PORT", "9000");

        let config = Config::from_env();
        clear_env();

        let addr = config.socket_addr().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 9000);
        assert_eq!(addr.to_string(), "[::]:9000");
    }

    #[test]
    #[serial]
    fn test_ipv6_loopback_host() {
        clear_env();
        std::env::set_var("HOST", "::1");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    #[serial]
    fn test_hostname_is_rejected() {
        clear_env();
        std::env::set_var("HOST", "example.invalid");

        let config = Config::from_env();
        clear_env();

        let err = config.socket_addr().unwrap_err();
        assert!(err.to_string().contains("HOST must be an IP address"));
    }
}
