use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::boot::BundleSink;
use crate::bundle::{content_bundle, translation_bundle, ContentBundle, TranslationBundle};
use crate::locale::{button_id, is_active_button, with_lang_param, LocaleCode, LocaleTag};

/// Locale and bundles shared by every view. The English bundles stand in
/// for the authored markup.
#[derive(Clone, Copy)]
pub struct I18n {
    tag: RwSignal<Option<LocaleTag>>,
    translations: RwSignal<Arc<TranslationBundle>>,
    content: RwSignal<Arc<ContentBundle>>,
    authored_translations: StoredValue<Arc<TranslationBundle>>,
    authored_content: StoredValue<Arc<ContentBundle>>,
}

impl I18n {
    pub fn provide() -> Self {
        let translations = translation_bundle(LocaleCode::default()).unwrap_or_else(|e| {
            log::error!("{e}");
            Arc::default()
        });
        let content = content_bundle(LocaleCode::default()).unwrap_or_else(|e| {
            log::error!("{e}");
            Arc::default()
        });
        let i18n = Self {
            tag: RwSignal::new(None),
            translations: RwSignal::new(translations.clone()),
            content: RwSignal::new(content.clone()),
            authored_translations: StoredValue::new(translations),
            authored_content: StoredValue::new(content),
        };
        provide_context(i18n);
        i18n
    }

    pub fn tag(&self) -> Option<LocaleTag> {
        self.tag.get()
    }

    pub fn text(&self, key: &'static str) -> Signal<String> {
        let translations = self.translations;
        let authored = self.authored_translations;
        Signal::derive(move || {
            authored.with_value(|authored| {
                let current = authored.get(key).unwrap_or_default();
                translations.with(|b| b.translate(key, current).to_string())
            })
        })
    }

    pub fn href(&self, href: &'static str) -> Signal<String> {
        let tag = self.tag;
        Signal::derive(move || match tag.get() {
            Some(tag) => with_lang_param(href, &tag),
            None => href.to_string(),
        })
    }

    pub fn content(&self) -> RwSignal<Arc<ContentBundle>> {
        self.content
    }

    pub fn authored_content(&self) -> StoredValue<Arc<ContentBundle>> {
        self.authored_content
    }
}

impl BundleSink for I18n {
    fn translations_loaded(&self, tag: LocaleTag, bundle: Option<Arc<TranslationBundle>>) {
        if let Some(bundle) = bundle {
            self.translations.set(bundle);
        }
        self.tag.set(Some(tag));
    }

    fn content_loaded(&self, _tag: LocaleTag, bundle: Arc<ContentBundle>) {
        self.content.set(bundle);
    }
}

pub fn use_i18n() -> I18n {
    expect_context::<I18n>()
}

#[component]
pub fn Tr(key: &'static str, #[prop(optional)] class: &'static str) -> impl IntoView {
    let text = use_i18n().text(key);
    view! { <span class=class data-lang=key data-content=text inner_html=text></span> }
}

/// One `.clip-text` span per word, for staggered reveals.
#[component]
pub fn SplitWords(#[prop(into)] text: Signal<String>) -> impl IntoView {
    move || {
        text.get()
            .split_whitespace()
            .map(|word| view! { <span class="clip-text">{word.to_string()}</span> " " })
            .collect_view()
    }
}

/// Exactly one button is active: the one for the locale actually loaded.
#[component]
pub fn LangSwitch() -> impl IntoView {
    let i18n = use_i18n();
    let navigate = use_navigate();
    let location = use_location();
    let query = use_query_map();

    let buttons = LocaleCode::ALL
        .into_iter()
        .map(|code| {
            let navigate = navigate.clone();
            let label = i18n.text(button_id(code));
            let on_click = move |_| {
                let here = format!(
                    "{}{}",
                    location.pathname.get_untracked(),
                    query.with_untracked(|q| q.to_query_string())
                );
                navigate(&with_lang_param(&here, &LocaleTag::from(code)), Default::default());
            };
            view! {
                <button
                    id=button_id(code)
                    data-lang=button_id(code)
                    class:active=move || is_active_button(code, &i18n.tag().unwrap_or_default())
                    on:click=on_click
                    inner_html=label
                ></button>
            }
        })
        .collect_view();

    view! { <div class="lang">{buttons}</div> }
}
