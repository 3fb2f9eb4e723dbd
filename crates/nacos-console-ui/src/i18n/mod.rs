//! Lightweight JSON-backed translations with per-locale bundles.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Storage key holding the operator's language preference.
pub const LANGUAGE_KEY: &str = "docsite_language";

/// Supported console languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum LocaleCode {
    /// English (United States).
    #[serde(rename = "en-US")]
    EnUs,
    /// Chinese (Simplified).
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl LocaleCode {
    #[must_use]
    /// All supported locales in display order.
    pub const fn all() -> [Self; 2] {
        [Self::EnUs, Self::ZhCn]
    }

    /// BCP 47 tag stored in the language preference.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhCn => "zh-CN",
        }
    }

    /// Human-friendly label for the language switcher.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EnUs => "English",
            Self::ZhCn => "中文",
        }
    }

    /// The other supported language, used by the one-click switcher.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::EnUs => Self::ZhCn,
            Self::ZhCn => Self::EnUs,
        }
    }

    /// Map a stored tag back to a locale. Only exact tags are accepted.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(tag.trim()))
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::EnUs;

/// Outcome of resolving the language preference at bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguagePreference {
    /// Locale to activate.
    pub locale: LocaleCode,
    /// Whether the preference must be written back (nothing was stored yet).
    pub persist: bool,
}

/// Pick the active language from the stored preference and the browser language.
///
/// Without a stored preference only an exact `zh-CN` browser language selects
/// Chinese; everything else starts in English.
#[must_use]
pub fn resolve_language(stored: Option<&str>, navigator: Option<&str>) -> LanguagePreference {
    match stored {
        Some(value) => LanguagePreference {
            locale: LocaleCode::from_lang_tag(value).unwrap_or(DEFAULT_LOCALE),
            persist: false,
        },
        None => LanguagePreference {
            locale: if navigator == Some(LocaleCode::ZhCn.code()) {
                LocaleCode::ZhCn
            } else {
                LocaleCode::EnUs
            },
            persist: true,
        },
    }
}

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a translation bundle for the given locale.
    ///
    /// Missing keys degrade to English strings, then to the caller default.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::EnUs));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::EnUs => include_str!("../../i18n/en-US.json"),
        LocaleCode::ZhCn => include_str!("../../i18n/zh-CN.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::ZhCn);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert!(!bundle.text("roles.role_error", "").is_empty());
            assert!(!bundle.text("permissions.conflict", "").is_empty());
        }
    }

    #[test]
    fn locales_translate_independently() {
        let en = TranslationBundle::new(LocaleCode::EnUs).text("nav.roles", "");
        let zh = TranslationBundle::new(LocaleCode::ZhCn).text("nav.roles", "");
        assert_ne!(en, zh);
    }

    #[test]
    fn first_visit_follows_exact_browser_language() {
        let zh = resolve_language(None, Some("zh-CN"));
        assert_eq!(zh.locale, LocaleCode::ZhCn);
        assert!(zh.persist);
        assert_eq!(resolve_language(None, Some("zh-TW")).locale, LocaleCode::EnUs);
        assert_eq!(resolve_language(None, None).locale, LocaleCode::EnUs);
    }

    #[test]
    fn stored_preference_wins_and_is_not_rewritten() {
        let pref = resolve_language(Some("zh-CN"), Some("en-US"));
        assert_eq!(pref.locale, LocaleCode::ZhCn);
        assert!(!pref.persist);
        let unknown = resolve_language(Some("klingon"), Some("zh-CN"));
        assert_eq!(unknown.locale, DEFAULT_LOCALE);
        assert!(!unknown.persist);
    }
}
