//! Client-side URL checks for the report form.

use url::Url;

/// Inputs at or above this many characters are rejected.
pub const URL_MAX_CHARS: usize = 256;

/// Returns `true` when `input` is an absolute URL whose host has at least two
/// dot-separated labels and whose length stays under [`URL_MAX_CHARS`].
///
/// Parse failures are folded into `false`; this never errors.
pub fn is_valid_url(input: &str) -> bool {
    if input.chars().count() >= URL_MAX_CHARS {
        return false;
    }

    match Url::parse(input) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| host.split('.').count() > 1)
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_https_domain() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://sub.example.co.uk/path?q=1#frag"));
    }

    #[test]
    fn rejects_free_text() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
    }

    #[test]
    fn rejects_single_label_hosts() {
        assert!(!is_valid_url("http://localhost"));
        assert!(!is_valid_url("https://intranet/login"));
    }

    #[test]
    fn rejects_urls_without_host() {
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn ipv4_hosts_count_as_multi_label() {
        assert!(is_valid_url("http://93.184.216.34/"));
    }

    #[test]
    fn length_limit_is_exclusive() {
        let prefix = "https://example.com/";
        let fits = format!("{prefix}{}", "a".repeat(URL_MAX_CHARS - 1 - prefix.len()));
        assert_eq!(fits.chars().count(), URL_MAX_CHARS - 1);
        assert!(is_valid_url(&fits));

        let too_long = format!("{fits}a");
        assert_eq!(too_long.chars().count(), URL_MAX_CHARS);
        assert!(!is_valid_url(&too_long));
    }

    #[test]
    fn validation_is_idempotent() {
        for input in ["https://example.com", "not a url", "http://localhost", ""] {
            assert_eq!(is_valid_url(input), is_valid_url(input));
        }
    }
}
