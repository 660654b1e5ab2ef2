//! Client identification for rate limiting.

use crate::rate_limit::UNKNOWN_CLIENT;
use axum::http::HeaderMap;

/// Connecting-IP header set by the edge proxy.
const CONNECTING_IP_HEADER: &str = "cf-connecting-ip";

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Identify the client behind a request from trusted proxy headers.
///
/// Prefers the edge's connecting-IP header, then the first hop of
/// `X-Forwarded-For`, then the shared `"unknown"` bucket. Blank or
/// non-ASCII values count as absent.
pub fn client_identifier(headers: &HeaderMap) -> String {
    header_value(headers, CONNECTING_IP_HEADER)
        .or_else(|| {
            header_value(headers, FORWARDED_FOR_HEADER)
                .and_then(|list| list.split(',').next())
                .map(str::trim)
                .filter(|first| !first.is_empty())
        })
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_prefers_connecting_ip() {
        let map = headers(&[
            ("cf-connecting-ip", "203.0.113.7"),
            ("x-forwarded-for", "198.51.100.1"),
        ]);
        assert_eq!(client_identifier(&map), "203.0.113.7");
    }

    #[test]
    fn test_uses_first_forwarded_hop() {
        let map = headers(&[("x-forwarded-for", " 198.51.100.1 , 10.0.0.1, 10.0.0.2")]);
        assert_eq!(client_identifier(&map), "198.51.100.1");
    }

    #[test]
    fn test_falls_back_to_unknown() {
        assert_eq!(client_identifier(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let map = headers(&[("cf-connecting-ip", "  "), ("x-forwarded-for", "192.0.2.4")]);
        assert_eq!(client_identifier(&map), "192.0.2.4");

        let map = headers(&[("x-forwarded-for", " , 10.0.0.1")]);
        assert_eq!(client_identifier(&map), "unknown");
    }
}
