use leptos::prelude::*;

use super::deco::DecoLink;
use super::i18n::use_i18n;
use super::use_site;
use crate::navigator::{Section, SECTION_MAP};

#[component]
pub fn MenuButton() -> impl IntoView {
    let site = use_site();
    let nav = site.nav();
    let label = use_i18n().text("menu_label");

    view! {
        <button
            class="menu__button"
            class:is-active=move || nav.with(|n| n.menu_open())
            aria-label=label
            on:click=move |_| site.run(|choreo| async move { choreo.toggle_menu().await })
        >
            <svg viewBox="0 0 24 24" width="32" height="32" aria-hidden="true">
                <path d="M4 7h16M4 12h16M4 17h16" fill="none" stroke="currentColor" />
            </svg>
        </button>
    }
}

/// Slide-in panel with one link per section.
#[component]
pub fn Menu() -> impl IntoView {
    let i18n = use_i18n();
    let site = use_site();

    let links = SECTION_MAP
        .into_iter()
        .map(|(key, _)| {
            let site = site.clone();
            view! {
                <div>
                    <DecoLink
                        class="navPage"
                        lang_key=key
                        text=i18n.text(key)
                        href=i18n.href("/")
                        on_click=move |_| {
                            let Some(section) = Section::from_nav_key(key) else {
                                return;
                            };
                            site.run(move |choreo| async move {
                                choreo.select_section(section).await
                            })
                        }
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <nav class="menu">
            <div class="menu__content decoCont">
                {links}
            </div>
        </nav>
    }
}
