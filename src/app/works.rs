use leptos::{ev, html, prelude::*};
use leptos_use::{use_document, use_element_hover, use_event_listener};

use super::deco::{DecoGroup, DecoLink};
use super::i18n::{use_i18n, SplitWords, Tr};
use super::use_site;
use crate::navigator::{Direction, Section, WheelGesture};
use crate::projection::{
    project_content, project_preview, Projection, PROJECT_PAGES, SHOW_WORK_SLOTS,
};

/// What the project detail overlay shows.
#[derive(Clone, Copy)]
struct DetailView(RwSignal<Projection>);

/// The works pager and its detail overlay.
#[component]
pub fn WorksSection() -> impl IntoView {
    let site = use_site();
    provide_context(DetailView(RwSignal::new(Projection::blank(SHOW_WORK_SLOTS))));

    let page = move |direction: Direction| {
        if site.nav().with_untracked(|n| n.current()) != Section::Works {
            return;
        }
        site.run(move |choreo| async move { choreo.page(direction).await });
    };

    let wheel = StoredValue::new(WheelGesture::default());
    let _ = use_event_listener(use_document(), ev::wheel, {
        let page = page.clone();
        move |e| {
            let direction = wheel
                .try_update_value(|wheel| wheel.push(e.delta_y()))
                .flatten();
            if let Some(direction) = direction {
                page(direction);
            }
        }
    });

    let touch_start = StoredValue::new(None::<f64>);
    let _ = use_event_listener(use_document(), ev::touchstart, move |e| {
        touch_start.set_value(e.touches().get(0).map(|t| t.client_y() as f64));
    });
    let _ = use_event_listener(use_document(), ev::touchend, {
        let page = page.clone();
        move |e| {
            let (Some(start), Some(touch)) = (touch_start.get_value(), e.changed_touches().get(0))
            else {
                return;
            };
            if let Some(direction) = Direction::from_drag(start, touch.client_y() as f64) {
                page(direction);
            }
        }
    });

    // touch input already arrives through the touch events
    let pointer_start = StoredValue::new(None::<f64>);
    let _ = use_event_listener(use_document(), ev::pointerdown, move |e| {
        if e.pointer_type() != "touch" {
            pointer_start.set_value(Some(e.client_y() as f64));
        }
    });
    let _ = use_event_listener(use_document(), ev::pointerup, move |e| {
        let Some(start) = pointer_start.get_value() else {
            return;
        };
        pointer_start.set_value(None);
        if let Some(direction) = Direction::from_drag(start, e.client_y() as f64) {
            page(direction);
        }
    });

    let slides = PROJECT_PAGES
        .iter()
        .enumerate()
        .map(|(index, page_id)| view! { <Slide index page_id /> })
        .collect_view();

    view! {
        <div class="ps">{slides}</div>
        <ShowWork />
    }
}

#[component]
fn Slide(index: usize, page_id: &'static str) -> impl IntoView {
    let i18n = use_i18n();
    let site = use_site();
    let DetailView(detail) = expect_context::<DetailView>();

    let image = NodeRef::<html::Img>::new();
    provide_context(DecoGroup(use_element_hover(image)));

    let preview = Memo::new(move |_| i18n.content().with(|b| project_preview(b, page_id)));
    let authored = StoredValue::new(
        i18n.authored_content()
            .with_value(|b| project_preview(b, page_id))
            .unwrap_or_default(),
    );
    let field = move |key: &str| {
        preview
            .with(|p| p.as_ref().and_then(|p| p.get(key)).map(str::to_string))
            .or_else(|| authored.with_value(|a| a.get(key).map(str::to_string)))
            .unwrap_or_default()
    };

    let open = move || {
        if !site.is_wired() {
            return;
        }
        let bundle = i18n.content().get_untracked();
        match project_content(&bundle, page_id, SHOW_WORK_SLOTS) {
            Some(projection) => detail.set(projection),
            None => log::warn!("no content for page {page_id}"),
        }
        site.run(move |choreo| async move { choreo.open_project(index).await });
    };

    view! {
        <section class="ps__sect" data-index=index>
            <div class="ps__outer">
                <div class="ps__inner">
                    <div class="ps__cont decoCont">
                        <img
                            node_ref=image
                            class="ps__img"
                            data-content="image"
                            src=move || field("image")
                            alt=""
                            on:click={
                                let open = open.clone();
                                move |_| open()
                            }
                        />
                        <div class="ps__text">
                            <span class="ps__number" data-content="number" inner_html=move || field("number")></span>
                            <h2
                                class="ps__heading"
                                data-content="title"
                                on:click={
                                    let open = open.clone();
                                    move |_| open()
                                }
                            >
                                <SplitWords text=Signal::derive(move || field("title")) />
                            </h2>
                            <p class="ps__details" data-content="details" inner_html=move || field("details")></p>
                            <DecoLink
                                class="ps__link"
                                lang_key="works_open"
                                page=page_id
                                text=i18n.text("works_open")
                                href=i18n.href("#")
                                on_click=move |_| open()
                            />
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

/// Full-screen project detail, filled from the clicked page's record.
#[component]
fn ShowWork() -> impl IntoView {
    let site = use_site();
    let DetailView(detail) = expect_context::<DetailView>();
    let markup = move |key: &'static str| move || detail.with(|p| p.markup(key));

    let gallery = move || {
        detail.with(|p| {
            p.gallery()
                .iter()
                .map(|figure| {
                    let caption = figure
                        .caption
                        .clone()
                        .map(|caption| view! { <figcaption>{caption}</figcaption> });
                    view! {
                        <figure>
                            <img src=figure.src.clone() alt=figure.alt.clone() />
                            {caption}
                        </figure>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="showWork">
            <div class="showWork-firstCol">
                <button
                    class="backButton"
                    on:click=move |_| site.run(|choreo| async move { choreo.close_project().await })
                >
                    <Tr key="back" />
                </button>
                <img data-content="image" src=move || detail.with(|p| p.src("image")) alt="" />
            </div>
            <div class="showWork-secondCol">
                <div class="showWork-number" data-content="number" inner_html=markup("number")></div>
                <div class="showWork-title" data-content="title" inner_html=markup("title")></div>
                <div class="showWork-meta">
                    <div data-content="client" inner_html=markup("client")></div>
                    <div data-content="year" inner_html=markup("year")></div>
                    <div data-content="role" inner_html=markup("role")></div>
                </div>
                <div class="showWork-description" data-content="description" inner_html=markup("description")></div>
                <div class="showWork-img">{gallery}</div>
            </div>
        </div>
    }
}
