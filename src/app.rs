mod about;
mod deco;
mod i18n;
mod menu;
mod stage;
mod works;

use std::future::Future;

use leptos::{prelude::*, task::spawn_local};
use leptos_meta::*;
use leptos_router::{components::*, hooks::use_query_map, path};

use crate::boot::boot;
use crate::locale::LANG_PARAM;
use crate::navigator::{Choreographer, Section, SectionNavigator};
use crate::projection::PROJECT_PAGES;

use about::AboutSection;
use i18n::{I18n, LangSwitch, SplitWords, Tr};
use menu::{Menu, MenuButton};
use stage::DomStage;
use works::WorksSection;

pub type SiteChoreographer = Choreographer<DomStage>;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("Portfolio - {title}") />
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=Portfolio />
            </Routes>
        </Router>
    }
}

/// Handle on the navigator shared by every interactive control.
#[derive(Clone)]
pub struct Site {
    choreo: SiteChoreographer,
    nav: RwSignal<SectionNavigator>,
}

impl Site {
    /// Latest navigator state, updated after every transition step.
    pub fn nav(&self) -> RwSignal<SectionNavigator> {
        self.nav
    }

    pub fn is_wired(&self) -> bool {
        self.choreo.is_wired()
    }

    pub fn run<F, Fut>(&self, f: F)
    where
        F: FnOnce(SiteChoreographer) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(f(self.choreo.clone()));
    }
}

pub fn use_site() -> Site {
    expect_context::<Site>()
}

#[component]
fn Portfolio() -> impl IntoView {
    let i18n = I18n::provide();
    let nav = RwSignal::new(SectionNavigator::new(PROJECT_PAGES.len()));
    let choreo = Choreographer::new(nav.get_untracked(), DomStage)
        .with_observer(move |state| nav.set(state.clone()));
    provide_context(Site {
        choreo: choreo.clone(),
        nav,
    });

    let query = use_query_map();
    let lang = Memo::new(move |_| query.read().get(LANG_PARAM));

    Effect::new(move |_| {
        let query_lang = lang.get();
        let choreo = choreo.clone();
        spawn_local(async move {
            let browser_lang = window().navigator().language();
            if !boot(&choreo, &i18n, query_lang.as_deref(), browser_lang.as_deref()).await {
                return;
            }
            spawn_local({
                let choreo = choreo.clone();
                async move { choreo.intro().await }
            });
            choreo.start_pager().await;
        });
    });

    let current = move |section: Section| nav.with(|n| n.current() == section);
    let title = i18n.text("nav_home");

    view! {
        <Title text=move || title.get() />
        <header class="header">
            <MenuButton />
            <LangSwitch />
        </header>
        <Menu />
        <main class="main">
            <section
                id=Section::Home.dom_id()
                class="main__section"
                class:current=move || current(Section::Home)
            >
                <h1 class="home__heading">
                    <SplitWords text=i18n.text("home_heading") />
                </h1>
                <div class="scrollAnim">
                    <Tr key="home_scroll" />
                    <svg viewBox="0 0 24 24" width="24" height="24" aria-hidden="true">
                        <path d="M12 4v16M5 13l7 7 7-7" fill="none" stroke="currentColor" />
                    </svg>
                </div>
            </section>
            <section
                id=Section::Works.dom_id()
                class="main__section"
                class:current=move || current(Section::Works)
            >
                <WorksSection />
            </section>
            <section
                id=Section::About.dom_id()
                class="main__section"
                class:current=move || current(Section::About)
            >
                <AboutSection />
            </section>
        </main>
    }
}
