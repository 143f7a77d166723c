//! Hostname normalization.
//!
//! Blocklist entries and screen-time counters are keyed by the same
//! canonical form: lower-case host only, no scheme, no port, no path, no
//! leading `www.`.

use url::Url;

/// Canonical hostname for free-form user input.
///
/// Input without a scheme gets `https://` prepended so it parses as a URL.
/// Input that still does not parse falls back to the text before the first
/// `/`. Always idempotent.
pub fn normalize_domain(input: &str) -> String {
    let s = input.trim();
    if s.is_empty() {
        return String::new();
    }
    let candidate = if s.contains("://") {
        s.to_string()
    } else {
        format!("https://{s}")
    };
    match Url::parse(&candidate) {
        Ok(url) => match url.host_str() {
            Some(host) if !host.is_empty() => strip_www(&host.to_ascii_lowercase()).to_string(),
            _ => fallback(s),
        },
        Err(_) => fallback(s),
    }
}

/// Hostname of a tab URL, `www.` stripped. `None` for unparsable URLs or
/// URLs without a host.
pub fn tab_hostname(url: &str) -> Option<String> {
    let url = Url::parse(url.trim()).ok()?;
    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(strip_www(&host.to_ascii_lowercase()).to_string())
}

/// Hostname of a tab URL for blocking. Only `http`/`https` pages qualify.
pub fn blockable_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    tab_hostname(url)
}

/// Drops leading `www.` labels, but never down to a bare TLD, so
/// `www.com` stays as it is and the result is stable under reapplication.
fn strip_www(host: &str) -> &str {
    let mut host = host;
    while let Some(rest) = host.strip_prefix("www.") {
        if !rest.contains('.') {
            break;
        }
        host = rest;
    }
    host
}

fn fallback(s: &str) -> String {
    let rest = s.split_once("://").map(|(_, r)| r).unwrap_or(s);
    let head = rest.split('/').next().unwrap_or_default().trim();
    strip_www(&head.to_ascii_lowercase()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn common_forms_collapse() {
        assert_eq!(normalize_domain("https://www.Example.com/path"), "example.com");
        assert_eq!(normalize_domain("example.com"), "example.com");
        assert_eq!(normalize_domain("www.example.com"), "example.com");
        assert_eq!(normalize_domain("  http://news.example.com:8080/a?b=c "), "news.example.com");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("   "), "");
    }

    #[test]
    fn scheme_like_prefix_is_not_a_scheme() {
        // No "://", so this is a host that happens to start with "http".
        assert_eq!(normalize_domain("httpbin.org/get"), "httpbin.org");
    }

    #[test]
    fn unparsable_input_degrades_to_split() {
        assert_eq!(normalize_domain("bad host/with/path"), "bad host");
        assert_eq!(normalize_domain("https://"), "");
    }

    #[test]
    fn tab_hostname_handles_odd_urls() {
        assert_eq!(tab_hostname("https://www.youtube.com/watch?v=1").as_deref(), Some("youtube.com"));
        assert_eq!(tab_hostname("not a url"), None);
        assert_eq!(tab_hostname("file:///home/me/a.txt"), None);
    }

    #[test]
    fn blockable_rejects_internal_pages() {
        assert_eq!(blockable_hostname("chrome://extensions"), None);
        assert_eq!(blockable_hostname("file:///tmp/x.html"), None);
        assert_eq!(
            blockable_hostname("http://www.reddit.com/r/rust").as_deref(),
            Some("reddit.com")
        );
    }

    #[test]
    fn www_is_not_stripped_down_to_a_tld() {
        assert_eq!(normalize_domain("www.www.com"), "www.com");
        assert_eq!(normalize_domain("www.com"), "www.com");
    }

    #[test]
    fn idempotent_on_examples() {
        for input in [
            "https://www.Example.com/path",
            "WWW.EXAMPLE.COM",
            "sub.example.co.uk:443",
            "bad host/with/path",
            "https://",
            "ftp://files.example.org/pub",
            "www.www.www.example.com",
        ] {
            let once = normalize_domain(input);
            assert_eq!(normalize_domain(&once), once, "input: {input}");
        }
    }

    proptest! {
        #[test]
        fn idempotent_on_generated_hosts(
            www in proptest::bool::ANY,
            labels in proptest::collection::vec("[a-zA-Z0-9]{1,10}", 1..4),
            tld in "[a-z]{2,6}",
            path in "(/[a-z0-9]{0,8}){0,3}",
            scheme in prop_oneof![Just(""), Just("http://"), Just("https://")],
        ) {
            let host = format!("{}{}.{}", if www { "www." } else { "" }, labels.join("."), tld);
            let input = format!("{scheme}{host}{path}");
            let once = normalize_domain(&input);
            prop_assert_eq!(normalize_domain(&once), once.clone());
            prop_assert!(!once.contains('/'));
        }
    }
}
