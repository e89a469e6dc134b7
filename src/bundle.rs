use dashmap::DashMap;
use rust_embed::Embed;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::locale::{LocaleCode, LocaleTag};

pub static GLOBAL_TRANSLATION_CACHE: LazyLock<DashMap<LocaleCode, Arc<TranslationBundle>>> =
    LazyLock::new(DashMap::new);
pub static GLOBAL_CONTENT_CACHE: LazyLock<DashMap<LocaleCode, Arc<ContentBundle>>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "bundles"]
pub struct Bundles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Translation,
    Content,
}

impl BundleKind {
    fn dir(&self) -> &'static str {
        match self {
            Self::Translation => "lang",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => f.write_str("translation"),
            Self::Content => f.write_str("content"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum BundleError {
    #[error("{kind} bundle for '{locale}' not found")]
    NotFound { kind: BundleKind, locale: LocaleCode },
    #[error("Couldn't parse {kind} bundle for '{locale}': {source}")]
    Parse {
        kind: BundleKind,
        locale: LocaleCode,
        source: Arc<serde_json::Error>,
    },
}

/// Interface strings keyed by translation key. Values are markup fragments.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TranslationBundle(HashMap<String, String>);

impl TranslationBundle {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or `current` when the bundle has none or it is empty.
    pub fn translate<'a>(&'a self, key: &str, current: &'a str) -> &'a str {
        self.get(key).filter(|v| !v.is_empty()).unwrap_or(current)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationBundle {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fields of one page, in authored order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ContentRecord {
    fields: Vec<(String, String)>,
}

impl From<Map<String, Value>> for ContentRecord {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key, value))
            })
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ContentRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ContentBundle(HashMap<String, ContentRecord>);

impl ContentBundle {
    pub fn page(&self, page_id: &str) -> Option<&ContentRecord> {
        self.0.get(page_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ContentRecord)> for ContentBundle {
    fn from_iter<T: IntoIterator<Item = (K, ContentRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn read_bundle<T>(kind: BundleKind, locale: LocaleCode) -> Result<T, BundleError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = format!("{}/{}.json", kind.dir(), locale);
    let file = Bundles::get(&path).ok_or(BundleError::NotFound { kind, locale })?;
    serde_json::from_slice(&file.data).map_err(|e| BundleError::Parse {
        kind,
        locale,
        source: Arc::new(e),
    })
}

fn cached<T>(
    cache: &DashMap<LocaleCode, Arc<T>>,
    kind: BundleKind,
    locale: LocaleCode,
) -> Result<Arc<T>, BundleError>
where
    T: for<'de> Deserialize<'de>,
{
    if let Some(bundle) = cache.get(&locale) {
        return Ok(bundle.clone());
    }
    let bundle: Arc<T> = Arc::new(read_bundle(kind, locale)?);
    cache.insert(locale, bundle.clone());
    Ok(bundle)
}

pub fn translation_bundle(locale: LocaleCode) -> Result<Arc<TranslationBundle>, BundleError> {
    cached(&GLOBAL_TRANSLATION_CACHE, BundleKind::Translation, locale)
}

pub fn content_bundle(locale: LocaleCode) -> Result<Arc<ContentBundle>, BundleError> {
    cached(&GLOBAL_CONTENT_CACHE, BundleKind::Content, locale)
}

/// Unsupported tags get the English bundle.
pub async fn load_translation_bundle(
    tag: &LocaleTag,
) -> Result<Arc<TranslationBundle>, BundleError> {
    translation_bundle(tag.code())
}

pub async fn load_content_bundle(tag: &LocaleTag) -> Result<Arc<ContentBundle>, BundleError> {
    content_bundle(tag.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_locales_load() {
        for code in LocaleCode::ALL {
            let tag = LocaleTag::from(code);
            let translations = load_translation_bundle(&tag).await.unwrap();
            assert!(!translations.is_empty());
            let content = load_content_bundle(&tag).await.unwrap();
            assert!(!content.is_empty());
            assert!(content.page("about").is_some());
        }
    }

    #[tokio::test]
    async fn test_unsupported_tag_falls_back_to_english() {
        let english = load_translation_bundle(&LocaleTag::from(LocaleCode::En))
            .await
            .unwrap();
        let fallback = load_translation_bundle(&LocaleTag::new("es-MX"))
            .await
            .unwrap();
        assert_eq!(english.get("nav_home"), fallback.get("nav_home"));
        assert_eq!(fallback.get("nav_home"), Some("Home"));

        let spanish = load_translation_bundle(&LocaleTag::new("es")).await.unwrap();
        assert_eq!(spanish.get("nav_home"), Some("Inicio"));
    }

    #[tokio::test]
    async fn test_bundles_are_cached() {
        let tag = LocaleTag::from(LocaleCode::Es);
        let first = load_content_bundle(&tag).await.unwrap();
        let second = load_content_bundle(&tag).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_translate_keeps_current_text() {
        let bundle = [("nav_home", "Inicio"), ("nav_works", "")]
            .into_iter()
            .collect::<TranslationBundle>();
        assert_eq!(bundle.translate("nav_home", "Home"), "Inicio");
        assert_eq!(bundle.translate("nav_works", "Works"), "Works");
        assert_eq!(bundle.translate("nav_about", "About"), "About");
    }

    #[test]
    fn test_record_keeps_authored_order() {
        let record: ContentRecord = serde_json::from_str(
            r#"{"title": "T", "image2": "b.jpg", "year": 2021, "image1": "a.jpg", "tags": ["x"], "draft": null}"#,
        )
        .unwrap();
        let keys = record.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["title", "image2", "year", "image1"]);
        assert_eq!(record.get("year"), Some("2021"));
        assert_eq!(record.get("tags"), None);
    }

    #[test]
    fn test_parse_error() {
        let err = serde_json::from_str::<TranslationBundle>("{not json")
            .map_err(|e| BundleError::Parse {
                kind: BundleKind::Translation,
                locale: LocaleCode::Es,
                source: Arc::new(e),
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("Couldn't parse translation bundle for 'es'"));
    }
}
