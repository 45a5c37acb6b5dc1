//! Hostname extraction for the domain line on app cards

use regex::Regex;
use std::sync::OnceLock;

fn authority_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    // optional scheme, optional userinfo, then a bracketed IPv6 literal or
    // the host up to port/path/query
    RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://)?(?:[^@/?#]*@)?(\[[^\]/?#]*\]|[^:/?#]*)")
            .ok()
    })
    .as_ref()
}

/// Hostname of `url` without port or a leading `www.`.
///
/// URLs without a scheme are read from the authority onwards, so
/// `example.com/path` yields `example.com`.
pub fn extract_hostname(url: &str) -> String {
    let trimmed = url.trim();
    let host = authority_regex()
        .and_then(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
