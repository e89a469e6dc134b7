use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Query parameter carrying the locale override.
pub const LANG_PARAM: &str = "lang";

// Characters that would break out of a query value.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocaleCode {
    #[default]
    En,
    Es,
}

impl LocaleCode {
    pub const ALL: [LocaleCode; 2] = [LocaleCode::En, LocaleCode::Es];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == tag)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved locale request, kept verbatim even when unsupported.
/// [`LocaleTag::code`] gives the locale used for bundle lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn code(&self) -> LocaleCode {
        LocaleCode::from_tag(&self.0).unwrap_or_default()
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::from(LocaleCode::default())
    }
}

impl From<LocaleCode> for LocaleTag {
    fn from(code: LocaleCode) -> Self {
        Self(code.as_str().to_string())
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub consult_browser: bool,
    pub default: LocaleCode,
}

impl ResolverConfig {
    pub const TRANSLATIONS: Self = Self {
        consult_browser: true,
        default: LocaleCode::En,
    };

    /// Never looks at the browser.
    pub const CONTENT: Self = Self {
        consult_browser: false,
        default: LocaleCode::En,
    };
}

/// A non-empty `lang` query value wins verbatim, then the browser language
/// when `config.consult_browser` is set, then `config.default`.
pub fn resolve_locale(
    config: ResolverConfig,
    query_lang: Option<&str>,
    browser_lang: Option<&str>,
) -> LocaleTag {
    if let Some(lang) = query_lang.filter(|l| !l.is_empty()) {
        return LocaleTag::new(lang);
    }
    if config.consult_browser {
        if let Some(code) = browser_lang.and_then(browser_locale) {
            return code.into();
        }
    }
    config.default.into()
}

fn browser_locale(tag: &str) -> Option<LocaleCode> {
    match tag {
        "es-MX" | "es-ES" => Some(LocaleCode::Es),
        _ => {
            let primary = tag.split('-').next().unwrap_or_default();
            LocaleCode::from_tag(primary)
        }
    }
}

/// Sets or replaces `lang` on an in-site href. External URLs are returned
/// untouched.
pub fn with_lang_param(href: &str, tag: &LocaleTag) -> String {
    if is_external(href) {
        return href.to_string();
    }
    let (rest, fragment) = match href.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (href, None),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let mut pairs = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(LANG_PARAM))
        .map(str::to_string)
        .collect::<Vec<_>>();
    pairs.push(format!(
        "{LANG_PARAM}={}",
        utf8_percent_encode(tag.as_str(), QUERY_VALUE)
    ));

    let mut out = format!("{path}?{}", pairs.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

// `scheme:` before any path, query or fragment delimiter, or protocol-relative
fn is_external(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }
    let head = href.split(['/', '?', '#']).next().unwrap_or_default();
    head.split_once(':').is_some_and(|(scheme, _)| {
        scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

pub fn is_active_button(code: LocaleCode, tag: &LocaleTag) -> bool {
    tag.code() == code
}

/// Also the button's label key.
pub fn button_id(code: LocaleCode) -> &'static str {
    match code {
        LocaleCode::En => "lang_en",
        LocaleCode::Es => "lang_es",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wins_verbatim() {
        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, Some("es-MX"), Some("en-US"));
        assert_eq!(tag.as_str(), "es-MX");
        // bundle lookups fall back to the default
        assert_eq!(tag.code(), LocaleCode::En);

        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, Some("fr"), None);
        assert_eq!(tag.as_str(), "fr");
    }

    #[test]
    fn test_empty_query_is_ignored() {
        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, Some(""), Some("es-AR"));
        assert_eq!(tag.as_str(), "es");
    }

    #[test]
    fn test_browser_region_variants() {
        for browser in ["es-ES", "es-MX"] {
            let tag = resolve_locale(ResolverConfig::TRANSLATIONS, None, Some(browser));
            assert_eq!(tag.as_str(), "es");
        }
        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, None, Some("en-GB"));
        assert_eq!(tag.as_str(), "en");
        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, None, Some("de-DE"));
        assert_eq!(tag.as_str(), "en");
        let tag = resolve_locale(ResolverConfig::TRANSLATIONS, None, None);
        assert_eq!(tag.as_str(), "en");
    }

    #[test]
    fn test_content_resolver_skips_browser() {
        let tag = resolve_locale(ResolverConfig::CONTENT, None, Some("es-ES"));
        assert_eq!(tag.as_str(), "en");
        let tag = resolve_locale(ResolverConfig::CONTENT, Some("es"), Some("en-US"));
        assert_eq!(tag.code(), LocaleCode::Es);

        let custom = ResolverConfig {
            consult_browser: true,
            ..ResolverConfig::CONTENT
        };
        let tag = resolve_locale(custom, None, Some("es-ES"));
        assert_eq!(tag.as_str(), "es");
    }

    #[test]
    fn test_with_lang_param() {
        let es = LocaleTag::from(LocaleCode::Es);
        assert_eq!(with_lang_param("/", &es), "/?lang=es");
        assert_eq!(with_lang_param("/?lang=en", &es), "/?lang=es");
        assert_eq!(
            with_lang_param("/works?content=works1&lang=en#top", &es),
            "/works?content=works1&lang=es#top"
        );
        assert_eq!(with_lang_param("#about", &es), "?lang=es#about");
        assert_eq!(
            with_lang_param("https://example.com/", &es),
            "https://example.com/"
        );
        assert_eq!(
            with_lang_param("mailto:hello@example.com", &es),
            "mailto:hello@example.com"
        );
        assert_eq!(
            with_lang_param("//cdn.example.com/app.js", &es),
            "//cdn.example.com/app.js"
        );
        assert_eq!(
            with_lang_param("/", &LocaleTag::new("es MX&x")),
            "/?lang=es%20MX%26x"
        );
    }

    #[test]
    fn test_url_in_query_stays_in_site() {
        let es = LocaleTag::from(LocaleCode::Es);
        assert_eq!(
            with_lang_param("/?next=https://x.example", &es),
            "/?next=https://x.example&lang=es"
        );
        assert_eq!(
            with_lang_param("#back:https://x.example", &es),
            "?lang=es#back:https://x.example"
        );
        assert_eq!(
            with_lang_param("HTTP://x.example/?a=1", &es),
            "HTTP://x.example/?a=1"
        );
        assert_eq!(with_lang_param("tel:+34600000000", &es), "tel:+34600000000");
    }

    #[test]
    fn test_single_active_button() {
        let tag = LocaleTag::new("es-MX");
        let active = LocaleCode::ALL
            .into_iter()
            .filter(|code| is_active_button(*code, &tag))
            .collect::<Vec<_>>();
        assert_eq!(active, vec![LocaleCode::En]);

        let tag = LocaleTag::from(LocaleCode::Es);
        assert!(is_active_button(LocaleCode::Es, &tag));
        assert!(!is_active_button(LocaleCode::En, &tag));
        assert_eq!(button_id(LocaleCode::Es), "lang_es");
    }
}
