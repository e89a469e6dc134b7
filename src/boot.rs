//! Page start-up: locale resolution and bundle application, then wiring.

use std::sync::Arc;

use crate::bundle::{
    load_content_bundle, load_translation_bundle, ContentBundle, TranslationBundle,
};
use crate::locale::{resolve_locale, LocaleTag, ResolverConfig};
use crate::navigator::Choreographer;
use crate::timeline::Stage;

/// Where loaded bundles are applied.
pub trait BundleSink {
    /// `bundle` is `None` when it failed to load; whatever is showing stays.
    fn translations_loaded(&self, tag: LocaleTag, bundle: Option<Arc<TranslationBundle>>);

    fn content_loaded(&self, tag: LocaleTag, bundle: Arc<ContentBundle>);
}

/// Resolves both locales and hands their bundles to `sink`, translations
/// first. Each pipeline fails on its own.
pub async fn load_bundles(
    sink: &impl BundleSink,
    query_lang: Option<&str>,
    browser_lang: Option<&str>,
) -> LocaleTag {
    let tag = resolve_locale(ResolverConfig::TRANSLATIONS, query_lang, browser_lang);
    log::debug!("interface locale {tag}");
    let translations = load_translation_bundle(&tag)
        .await
        .inspect_err(|e| log::error!("{e}"))
        .ok();
    sink.translations_loaded(tag.clone(), translations);

    let content_tag = resolve_locale(ResolverConfig::CONTENT, query_lang, None);
    match load_content_bundle(&content_tag).await {
        Ok(bundle) => sink.content_loaded(content_tag, bundle),
        Err(e) => log::error!("{e}"),
    }
    tag
}

/// Loads and applies the bundles, then wires input once the projected page
/// has settled. Later runs only reload bundles. Returns `true` for the run
/// that wired the page.
pub async fn boot<S: Stage>(
    choreo: &Choreographer<S>,
    sink: &impl BundleSink,
    query_lang: Option<&str>,
    browser_lang: Option<&str>,
) -> bool {
    load_bundles(sink, query_lang, browser_lang).await;
    if choreo.is_wired() {
        return false;
    }
    choreo.wire().await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::navigator::{Section, SectionNavigator};
    use crate::timeline::{Target, Timeline};

    type Log = Arc<Mutex<Vec<String>>>;

    #[derive(Clone, Default)]
    struct LoggedStage(Log);

    impl Stage for LoggedStage {
        async fn play(&self, timeline: Timeline) {
            self.0.lock().unwrap().push(timeline.label().to_string());
        }

        async fn settle(&self) {
            self.0.lock().unwrap().push("settle".to_string());
        }

        fn clear_props(&self, _targets: &[Target]) {}

        fn reset_detail_scroll(&self) {}
    }

    struct LoggedSink(Log);

    impl BundleSink for LoggedSink {
        fn translations_loaded(&self, tag: LocaleTag, bundle: Option<Arc<TranslationBundle>>) {
            assert!(bundle.is_some());
            self.0.lock().unwrap().push(format!("translations {tag}"));
        }

        fn content_loaded(&self, tag: LocaleTag, _bundle: Arc<ContentBundle>) {
            self.0.lock().unwrap().push(format!("content {tag}"));
        }
    }

    fn setup() -> (Choreographer<LoggedStage>, LoggedSink, Log) {
        let log = Log::default();
        let choreo = Choreographer::new(SectionNavigator::new(3), LoggedStage(log.clone()));
        (choreo, LoggedSink(log.clone()), log)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_bundles_apply_before_wiring() {
        let (choreo, sink, log) = setup();
        assert!(boot(&choreo, &sink, Some("es"), Some("en-US")).await);
        assert!(choreo.is_wired());
        assert_eq!(entries(&log), vec!["translations es", "content es", "settle"]);
    }

    #[tokio::test]
    async fn test_content_locale_ignores_browser() {
        let (choreo, sink, log) = setup();
        boot(&choreo, &sink, None, Some("es-ES")).await;
        assert_eq!(entries(&log), vec!["translations es", "content en", "settle"]);
    }

    #[tokio::test]
    async fn test_input_waits_for_first_boot() {
        let (choreo, sink, log) = setup();
        choreo.toggle_menu().await;
        choreo.select_section(Section::About).await;
        assert!(entries(&log).is_empty());

        boot(&choreo, &sink, None, None).await;
        choreo.toggle_menu().await;
        assert_eq!(entries(&log).last().map(String::as_str), Some("menu-open"));
        assert!(choreo.snapshot().menu_open());
    }

    #[tokio::test]
    async fn test_language_change_only_reloads() {
        let (choreo, sink, log) = setup();
        assert!(boot(&choreo, &sink, Some("en"), None).await);
        log.lock().unwrap().clear();

        assert!(!boot(&choreo, &sink, Some("es"), None).await);
        assert_eq!(entries(&log), vec!["translations es", "content es"]);
    }
}
