//! Internationalization (i18n) support for `reportform-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/reportform-ui.ftl   (fallback/reference)
//!   ru-RU/reportform-ui.ftl
//! ```
//!
//! Language selection happens in two steps: `init()` picks from the browser
//! (or OS) language list, then the form calls `apply_host_language` with the
//! Telegram user's `language_code`, which wins when it is supported.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro.
/// Examples:
///     t!("main-button-label")
///     t!("footer-anonymous-id", id = "a665a459")
///
/// This expands to `fl!(&*LOADER, ...)` keeping callsites short while
/// ensuring all lookups route through the shared loader.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "reportform-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Prefer the chat client's language when we ship a matching bundle.
pub fn apply_host_language(code: Option<&str>) {
    let Some(code) = code.filter(|c| !c.is_empty()) else {
        return;
    };
    let primary = code.split(['-', '_']).next().unwrap_or(code);
    let supported = available_languages()
        .into_iter()
        .find(|tag| tag.split('-').next() == Some(primary));

    match supported {
        Some(tag) => {
            if let Err(err) = set_language(&tag) {
                tracing::warn!("could not switch to host language {tag}: {err}");
            } else {
                tracing::debug!("using host language {tag}");
            }
        }
        None => tracing::debug!("host language {code} not bundled; keeping current selection"),
    }
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Tests below switch the shared `LOADER`; run them one at a time.
    static LANGUAGE_LOCK: Mutex<()> = Mutex::new(());

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        LANGUAGE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn missing_url() -> String {
        fl!(&*LOADER, "notice-missing-url")
    }

    const EN_MISSING_URL: &str = "Please fill in the url";
    const RU_MISSING_URL: &str = "Пожалуйста заполните url";

    #[test]
    fn shipped_languages_are_present() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "ru-RU"));
    }

    #[test]
    fn fallback_lookup_works() {
        let _guard = lock();
        init();
        set_language("en-US").unwrap();
        assert_eq!(fl!(&*LOADER, "main-button-label"), "Send report");
    }

    #[test]
    fn unparsable_tag_keeps_current_language() {
        let _guard = lock();
        init();
        set_language("ru-RU").unwrap();
        assert_eq!(missing_url(), RU_MISSING_URL);

        assert!(set_language("not a tag").is_ok());
        assert_eq!(missing_url(), RU_MISSING_URL);
    }

    #[test]
    fn unsupported_tag_falls_back_to_english() {
        let _guard = lock();
        init();
        set_language("ru-RU").unwrap();
        let _ = set_language("zz-ZZ");
        assert_eq!(missing_url(), EN_MISSING_URL);
    }

    #[test]
    fn host_language_selects_russian_bundle() {
        let _guard = lock();
        init();
        for code in ["ru", "ru-RU"] {
            set_language("en-US").unwrap();
            apply_host_language(Some(code));
            assert_eq!(missing_url(), RU_MISSING_URL, "host code {code}");
        }
    }

    #[test]
    fn host_language_matches_on_primary_subtag() {
        let _guard = lock();
        init();
        set_language("ru-RU").unwrap();
        apply_host_language(Some("en_GB"));
        assert_eq!(missing_url(), EN_MISSING_URL);
    }

    #[test]
    fn unknown_or_absent_host_language_changes_nothing() {
        let _guard = lock();
        init();
        set_language("ru-RU").unwrap();
        for code in [Some("uk"), Some(""), None] {
            apply_host_language(code);
            assert_eq!(missing_url(), RU_MISSING_URL, "host code {code:?}");
        }
    }
}
