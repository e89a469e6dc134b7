use leptos::{html, prelude::*};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use super::i18n::{use_i18n, Tr};
use crate::navigator::ScrollSpy;
use crate::projection::{project_about, Field, ABOUT_SLOTS};

/// Index titles, one per detail block.
const INDEX: [(&str, &str); 3] = [
    ("about_index_profile", "profile"),
    ("about_index_experience", "experience"),
    ("about_index_contact", "contact"),
];

fn detail_blocks(column: &HtmlElement) -> Vec<HtmlElement> {
    let Ok(list) = column.query_selector_all(".contentDetails") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[component]
pub fn AboutSection() -> impl IntoView {
    let i18n = use_i18n();
    let projected = Memo::new(move |_| i18n.content().with(|b| project_about(b, ABOUT_SLOTS)));
    let authored = StoredValue::new(
        i18n.authored_content()
            .with_value(|b| project_about(b, ABOUT_SLOTS))
            .unwrap_or_default(),
    );
    let field = move |key: &str| {
        projected
            .with(|p| p.as_ref().and_then(|p| p.field(key).cloned()))
            .or_else(|| authored.with_value(|a| a.field(key).cloned()))
    };
    let markup = move |key: &'static str| {
        move || match field(key) {
            Some(Field::Markup(markup)) => markup,
            _ => String::new(),
        }
    };
    let picture = move |key: &'static str| {
        move || match field(key) {
            Some(Field::Picture { src }) => Some(view! { <img src=src /> }),
            _ => None,
        }
    };

    let column = NodeRef::<html::Div>::new();
    let spy = RwSignal::new(ScrollSpy::default());

    let on_scroll = move |_| {
        let Some(column) = column.get_untracked() else {
            return;
        };
        let blocks = detail_blocks(&column)
            .iter()
            .map(|el| {
                let top = el.offset_top() as f64;
                (top, top + el.offset_height() as f64)
            })
            .collect::<Vec<_>>();
        let center = column.scroll_top() as f64 + column.client_height() as f64 / 2.0;
        spy.update(|spy| {
            spy.observe(&blocks, center);
        });
    };

    let select = move |index: usize| {
        spy.update(|spy| spy.select(index));
        let Some(column) = column.get_untracked() else {
            return;
        };
        if let Some(block) = detail_blocks(&column).get(index) {
            let options = ScrollToOptions::new();
            options.set_top(block.offset_top() as f64);
            options.set_behavior(ScrollBehavior::Smooth);
            column.scroll_to_with_scroll_to_options(&options);
        }
    };

    let titles = INDEX
        .into_iter()
        .enumerate()
        .map(|(index, (key, _))| {
            view! {
                <li
                    class="contentTitle"
                    class:contentTitle-active=move || spy.with(|s| s.active() == index)
                    on:click=move |_| select(index)
                >
                    <Tr key />
                </li>
            }
        })
        .collect_view();

    let details = INDEX
        .into_iter()
        .map(|(_, slot)| {
            view! {
                <div class="contentDetails" data-content=slot inner_html=markup(slot)></div>
            }
        })
        .collect_view();

    view! {
        <div class="about">
            <div class="about__head">
                <img
                    data-content="image"
                    src=move || match field("image") {
                        Some(Field::Image { src }) => src,
                        _ => String::new(),
                    }
                    alt=""
                />
                <h2 data-content="title" inner_html=markup("title")></h2>
            </div>
            <div class="about__body">
                <ul class="firstDIV">{titles}</ul>
                <div class="secondDIV" node_ref=column on:scroll=on_scroll>
                    {details}
                    <div class="about__pictures">
                        <div data-content="image1">{picture("image1")}</div>
                        <div data-content="image2">{picture("image2")}</div>
                    </div>
                </div>
            </div>
        </div>
    }
}
