//! Internationalization (i18n) for PotatoFE.
//!
//! A key→string HashMap per language, parsed at startup from embedded
//! translation files. The `t!("key")` macro looks up the current language
//! and falls back to English, then to the key itself.

use std::collections::HashMap;
use std::sync::Mutex;

/// Global translation state.
static I18N: Mutex<Option<I18nState>> = Mutex::new(None);

struct I18nState {
    current_lang: String,
    /// lang_code → (key → translated_string)
    translations: HashMap<String, HashMap<String, String>>,
}

/// Supported languages: (code, native_name)
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
];

/// Initialize the i18n system with embedded translations. Call once at
/// startup.
pub fn init() {
    let mut translations: HashMap<String, HashMap<String, String>> = HashMap::new();

    translations.insert(
        "en".to_string(),
        parse_translations(include_str!("../locales/en.txt")),
    );
    translations.insert(
        "es".to_string(),
        parse_translations(include_str!("../locales/es.txt")),
    );
    translations.insert(
        "fr".to_string(),
        parse_translations(include_str!("../locales/fr.txt")),
    );
    translations.insert(
        "de".to_string(),
        parse_translations(include_str!("../locales/de.txt")),
    );

    *I18N.lock().unwrap() = Some(I18nState {
        current_lang: "en".to_string(),
        translations,
    });
}

/// Set the active language. Unknown codes fall back to "en".
pub fn set_language(code: &str) {
    if let Ok(mut guard) = I18N.lock()
        && let Some(ref mut state) = *guard
    {
        if state.translations.contains_key(code) {
            state.current_lang = code.to_string();
        } else {
            state.current_lang = "en".to_string();
        }
    }
}

/// Get the current language code.
pub fn current_language() -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        return state.current_lang.clone();
    }
    "en".to_string()
}

/// Look up a translation key.
pub fn translate(key: &str) -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        if let Some(map) = state.translations.get(&state.current_lang)
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
        if state.current_lang != "en"
            && let Some(map) = state.translations.get("en")
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
    }
    // Last resort: return the key itself
    key.to_string()
}

/// Best-match our supported languages against the LANG-style environment
/// variables. Returns "en" when nothing matches.
pub fn detect_system_language() -> String {
    for var in &["LANG", "LC_ALL", "LC_MESSAGES", "LANGUAGE"] {
        if let Ok(val) = std::env::var(var)
            && let Some(lang) = match_system_locale(&val)
        {
            return lang;
        }
    }
    "en".to_string()
}

/// Match a system locale string (e.g. "en_US.UTF-8", "fr-FR") against the
/// supported language list.
fn match_system_locale(locale: &str) -> Option<String> {
    let normalized = locale.to_lowercase().replace('_', "-");
    let lang_part = normalized.split('.').next().unwrap_or(&normalized);
    let lang_part = lang_part.split('@').next().unwrap_or(lang_part);
    let primary = lang_part.split('-').next().unwrap_or(lang_part);

    for &(code, _) in LANGUAGES {
        if code.to_lowercase() == lang_part || code.to_lowercase() == primary {
            return Some(code.to_string());
        }
    }
    None
}

/// Parse a simple key=value translation file. Lines starting with `#` are
/// comments; empty lines are ignored.
fn parse_translations(data: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

/// Translation macro. Usage: `t!("toolbar.add_feature")` or
/// `t!("some.key", name = "value")` for `{name}` substitution.
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::translate($key)
    };
    ($key:expr, $($name:ident = $val:expr),+ $(,)?) => {{
        let mut s = $crate::i18n::translate($key);
        $(
            s = s.replace(concat!("{", stringify!($name), "}"), &format!("{}", $val));
        )+
        s
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_lines_and_skips_comments() {
        let map = parse_translations("# comment\n\na.b = Hello\nc.d=World \n");
        assert_eq!(map.get("a.b").unwrap(), "Hello");
        assert_eq!(map.get("c.d").unwrap(), "World");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn unknown_language_code_falls_back_to_english() {
        init();
        set_language("fr");
        assert_eq!(current_language(), "fr");
        assert_eq!(translate("toolbar.category"), "Catégorie");
        set_language("ja");
        assert_eq!(current_language(), "en");
        assert_eq!(translate("toolbar.category"), "Category");
    }

    #[test]
    fn locale_matching_handles_region_and_encoding_suffixes() {
        assert_eq!(match_system_locale("en_US.UTF-8"), Some("en".to_string()));
        assert_eq!(match_system_locale("fr-FR"), Some("fr".to_string()));
        assert_eq!(match_system_locale("de_DE@euro"), Some("de".to_string()));
        assert_eq!(match_system_locale("ja_JP"), None);
    }
}
