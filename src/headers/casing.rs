//! Header-name casing and Sec-Fetch attribute tables.

use std::collections::HashMap;

/// Sec-Fetch attributes injected for HTTP/1 requests.
pub(crate) const HTTP1_SEC_FETCH: [(&str, &str); 4] = [
    ("Sec-Fetch-Mode", "same-site"),
    ("Sec-Fetch-Dest", "navigate"),
    ("Sec-Fetch-Site", "?1"),
    ("Sec-Fetch-User", "document"),
];

/// Sec-Fetch attributes injected for HTTP/2 requests.
pub(crate) const HTTP2_SEC_FETCH: [(&str, &str); 4] = [
    ("sec-fetch-mode", "same-site"),
    ("sec-fetch-dest", "navigate"),
    ("sec-fetch-site", "?1"),
    ("sec-fetch-user", "document"),
];

/// Well-known names Title-Cased on HTTP/2 output. Client Hints headers
/// (`sec-ch-*`) are not listed: their wire format is lowercase.
const TITLE_CASED: &[&str] = &[
    "user-agent",
    "accept-language",
    "accept-encoding",
    "accept",
    "content-type",
    "content-length",
    "connection",
    "host",
    "referer",
    "origin",
    "cache-control",
    "pragma",
    "upgrade-insecure-requests",
    "sec-fetch-mode",
    "sec-fetch-dest",
    "sec-fetch-site",
    "sec-fetch-user",
];

/// Re-case an HTTP/2 header map: closed-list names get Title-Case, the
/// rest pass through unchanged.
pub(crate) fn title_case_headers(headers: HashMap<String, String>) -> HashMap<String, String> {
    headers
        .into_iter()
        .map(|(name, value)| {
            let lowered = name.to_lowercase();
            if TITLE_CASED.contains(&lowered.as_str()) {
                (title_case_key(&lowered), value)
            } else {
                (name, value)
            }
        })
        .collect()
}

/// Title-Case each hyphen-separated segment of a header name.
pub(crate) fn title_case_key(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_title_case_key_segments() {
        assert_eq!(title_case_key("user-agent"), "User-Agent");
        assert_eq!(
            title_case_key("upgrade-insecure-requests"),
            "Upgrade-Insecure-Requests"
        );
        assert_eq!(title_case_key("accept"), "Accept");
    }

    #[test]
    fn test_known_names_are_title_cased() {
        let recased = title_case_headers(headers(&[
            ("user-agent", "UA"),
            ("accept-encoding", "gzip"),
            ("sec-fetch-mode", "same-site"),
        ]));
        assert!(recased.contains_key("User-Agent"));
        assert!(recased.contains_key("Accept-Encoding"));
        assert!(recased.contains_key("Sec-Fetch-Mode"));
    }

    #[test]
    fn test_client_hints_stay_lowercase() {
        let recased = title_case_headers(headers(&[
            ("sec-ch-ua", "brands"),
            ("sec-ch-ua-platform", "\"macOS\""),
        ]));
        assert!(recased.contains_key("sec-ch-ua"));
        assert!(recased.contains_key("sec-ch-ua-platform"));
        assert!(!recased.keys().any(|name| name.starts_with("Sec-Ch")));
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let recased = title_case_headers(headers(&[("x-custom-token", "1")]));
        assert!(recased.contains_key("x-custom-token"));
    }
}
