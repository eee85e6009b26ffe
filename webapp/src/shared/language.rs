const LANGUAGES: &[(&str, &str)] = &[
    ("ar-ly", "العربية"),
    ("ca", "Català"),
    ("cs", "Český"),
    ("da", "Dansk"),
    ("de", "Deutsch"),
    ("el", "Ελληνικά"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("hi", "हिंदी"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("pt-br", "Português (Brasil)"),
    ("pt-pt", "Português"),
    ("ru", "Русский"),
    ("sv", "Svenska"),
    ("tr", "Türkçe"),
    ("uk", "Українська"),
    ("zh-cn", "中文（简体）"),
    ("zh-tw", "繁體中文"),
];

/// Display name for a language key, e.g. `fr` -> `Français`.
pub fn find_language_from_key(key: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(lang, _)| lang.eq_ignore_ascii_case(key))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        assert_eq!(find_language_from_key("en"), Some("English"));
        assert_eq!(find_language_from_key("zh-CN"), Some("中文（简体）"));
    }

    #[test]
    fn unknown_keys_do_not() {
        assert_eq!(find_language_from_key("xx"), None);
    }
}
