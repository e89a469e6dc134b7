use std::time::Duration;

use leptos::prelude::{document, request_animation_frame, set_timeout, window};
use tokio::sync::oneshot;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::timeline::{css_declarations, Prop, Stage, Target, Timeline};

/// Plays timelines as CSS transitions on the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomStage;

fn select(target: &Target) -> Vec<HtmlElement> {
    let Ok(list) = document().query_selector_all(&target.selector()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn apply(el: &HtmlElement, props: &[Prop]) {
    let style = el.style();
    for (name, value) in css_declarations(props) {
        if let Err(e) = style.set_property(name, &value) {
            log::warn!("couldn't set {name}: {e:?}");
        }
    }
}

fn after(seconds: f64, f: impl FnOnce() + 'static) {
    set_timeout(f, Duration::from_secs_f64(seconds.max(0.0)));
}

impl Stage for DomStage {
    async fn play(&self, timeline: Timeline) {
        let count = |t: &Target| self.count(t);
        let total = timeline.duration_with(count);
        let starts = timeline.starts(count);
        for (tween, start) in timeline.tweens().iter().zip(starts) {
            let transition = if tween.duration > 0.0 {
                format!("all {}s {}", tween.duration, tween.ease.css())
            } else {
                "none".to_string()
            };
            for (i, el) in select(&tween.target).into_iter().enumerate() {
                if let Some(from) = &tween.from {
                    let _ = el.style().set_property("transition", "none");
                    apply(&el, from);
                    // force layout so the transition starts from `from`
                    let _ = el.offset_height();
                }
                let to = tween.to.clone();
                let transition = transition.clone();
                after(start + tween.stagger * i as f64, move || {
                    let _ = el.style().set_property("transition", &transition);
                    apply(&el, &to);
                });
            }
        }
        let (tx, rx) = oneshot::channel();
        after(total, move || {
            let _ = tx.send(());
        });
        let _ = rx.await;
    }

    async fn settle(&self) {
        let (tx, rx) = oneshot::channel();
        request_animation_frame(move || {
            request_animation_frame(move || {
                let _ = tx.send(());
            })
        });
        let _ = rx.await;
    }

    fn clear_props(&self, targets: &[Target]) {
        for el in targets.iter().flat_map(select) {
            let _ = el.remove_attribute("style");
        }
    }

    fn reset_detail_scroll(&self) {
        let portrait = window()
            .match_media("(orientation: portrait)")
            .ok()
            .flatten()
            .is_some_and(|m| m.matches());
        let scroller = if portrait {
            ".showWork"
        } else {
            ".showWork-secondCol"
        };
        if let Ok(Some(el)) = document().query_selector(scroller) {
            el.set_scroll_top(0);
        }
    }

    fn count(&self, target: &Target) -> usize {
        document()
            .query_selector_all(&target.selector())
            .map(|list| list.length() as usize)
            .unwrap_or(0)
    }
}
