use leptos::{html, prelude::*};
use leptos_use::use_element_hover;

/// Hover layer fully clipped away.
pub const WIPE_HIDDEN: &str = "polygon(0 0, 0 0, 0% 100%, 0 100%)";
/// Hover layer fully revealed.
pub const WIPE_SHOWN: &str = "polygon(0 0, 100% 0, 100% 100%, 0 100%)";

pub fn wipe(shown: bool) -> &'static str {
    if shown {
        WIPE_SHOWN
    } else {
        WIPE_HIDDEN
    }
}

/// Hover state of a container's image; every decorated link inside the
/// container wipes while it is hovered.
#[derive(Clone, Copy)]
pub struct DecoGroup(pub Signal<bool>);

/// Link with a duplicate text layer revealed by a clip-path wipe on hover.
#[component]
pub fn DecoLink(
    #[prop(into)] text: Signal<String>,
    #[prop(into)] href: Signal<String>,
    #[prop(into)] on_click: Callback<()>,
    #[prop(optional)] class: &'static str,
    #[prop(optional)] lang_key: Option<&'static str>,
    #[prop(optional)] page: Option<&'static str>,
) -> impl IntoView {
    let link = NodeRef::<html::A>::new();
    let hovered = use_element_hover(link);
    let group = use_context::<DecoGroup>();
    let shown = move || hovered.get() || group.is_some_and(|g| g.0.get());

    view! {
        <a
            node_ref=link
            class=format!("decoLink {class}")
            href=href
            data-lang=lang_key
            data-page=page
            on:click=move |ev| {
                ev.prevent_default();
                on_click.run(());
            }
        >
            <span inner_html=text></span>
            {move || {
                text.with(|t| !t.trim().is_empty())
                    .then(|| {
                        view! {
                            <span
                                data-hover-layer="true"
                                class="decoLink__layer"
                                style:clip-path=move || wipe(shown())
                                inner_html=text
                            ></span>
                        }
                    })
            }}
        </a>
    }
}
