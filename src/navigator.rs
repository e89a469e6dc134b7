//! Which section, slide and detail view is showing, and the sequencing of
//! the timelines that move between them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::motion;
use crate::timeline::{Stage, Target, Timeline, TriggerPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    Works,
    About,
}

pub const SECTION_MAP: [(&str, Section); 3] = [
    ("nav_home", Section::Home),
    ("nav_works", Section::Works),
    ("nav_about", Section::About),
];

impl Section {
    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::Home => "main__section-home",
            Self::Works => "main__section-works",
            Self::About => "main__section-about",
        }
    }

    pub fn from_nav_key(key: &str) -> Option<Self> {
        SECTION_MAP
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| *s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Smallest movement, in pixels, that counts as a gesture.
    pub const TOLERANCE: f64 = 10.0;

    pub fn from_wheel(delta_y: f64) -> Option<Self> {
        if delta_y.abs() < Self::TOLERANCE {
            None
        } else if delta_y > 0.0 {
            Some(Self::Next)
        } else {
            Some(Self::Previous)
        }
    }

    /// Dragging upward pages forward.
    pub fn from_drag(start_y: f64, end_y: f64) -> Option<Self> {
        Self::from_wheel(start_y - end_y)
    }

    fn offset(&self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Sums wheel deltas until they pass [`Direction::TOLERANCE`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelGesture {
    delta_y: f64,
}

impl WheelGesture {
    pub fn push(&mut self, delta_y: f64) -> Option<Direction> {
        if self.delta_y != 0.0 && self.delta_y.signum() != delta_y.signum() {
            self.delta_y = 0.0;
        }
        self.delta_y += delta_y;
        let direction = Direction::from_wheel(self.delta_y)?;
        self.delta_y = 0.0;
        Some(direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerMove {
    pub from: Option<usize>,
    pub to: usize,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pager {
    len: usize,
    current: Option<usize>,
    animating: bool,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: None,
            animating: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn wrap(&self, index: isize) -> usize {
        index.rem_euclid(self.len.max(1) as isize) as usize
    }

    fn goto(&mut self, index: isize, direction: Direction) -> Option<PagerMove> {
        if self.is_empty() {
            return None;
        }
        let mv = PagerMove {
            from: self.current,
            to: self.wrap(index),
            direction,
        };
        self.current = Some(mv.to);
        self.animating = true;
        Some(mv)
    }

    fn step(&mut self, direction: Direction) -> Option<PagerMove> {
        let from = self.current.map(|i| i as isize).unwrap_or(-1);
        self.goto(from + direction.offset(), direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveProjectView {
    pub slide: usize,
}

impl ActiveProjectView {
    pub fn triggers(&self) -> [Target; 2] {
        [
            Target::Trigger {
                slide: self.slide,
                part: TriggerPart::Heading,
            },
            Target::Trigger {
                slide: self.slide,
                part: TriggerPart::Image,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMotion {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSwitch {
    pub from: Section,
    pub to: Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRequest {
    Ignored,
    CloseMenu,
    SwitchNow(SectionSwitch),
}

/// Each transition is a request, which returns what to play or nothing when
/// dropped, and a `*_settled` call once that timeline has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionNavigator {
    current: Section,
    menu_open: bool,
    menu_busy: bool,
    pending: Option<Section>,
    switching: bool,
    pager: Pager,
    pager_locked: bool,
    active_view: Option<ActiveProjectView>,
    detail_busy: bool,
}

impl SectionNavigator {
    pub fn new(slides: usize) -> Self {
        Self {
            pager: Pager::new(slides),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn pending(&self) -> Option<Section> {
        self.pending
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_locked(&self) -> bool {
        self.pager_locked
    }

    pub fn active_view(&self) -> Option<ActiveProjectView> {
        self.active_view
    }

    pub fn toggle_menu(&mut self) -> Option<MenuMotion> {
        if self.menu_busy || self.switching {
            return None;
        }
        self.menu_open = !self.menu_open;
        self.menu_busy = true;
        Some(if self.menu_open {
            MenuMotion::Open
        } else {
            MenuMotion::Close
        })
    }

    pub fn menu_settled(&mut self) -> Option<SectionSwitch> {
        self.menu_busy = false;
        if self.menu_open {
            return None;
        }
        let target = self.pending.take()?;
        (target != self.current).then(|| self.begin_switch(target))
    }

    pub fn request_section(&mut self, target: Section) -> SectionRequest {
        if target == self.current || self.switching || self.pending.is_some() {
            return SectionRequest::Ignored;
        }
        if !self.menu_open {
            return SectionRequest::SwitchNow(self.begin_switch(target));
        }
        if self.menu_busy {
            return SectionRequest::Ignored;
        }
        self.pending = Some(target);
        self.menu_open = false;
        self.menu_busy = true;
        SectionRequest::CloseMenu
    }

    fn begin_switch(&mut self, to: Section) -> SectionSwitch {
        self.switching = true;
        SectionSwitch {
            from: self.current,
            to,
        }
    }

    pub fn switch_settled(&mut self, switch: SectionSwitch) {
        self.current = switch.to;
        self.pending = None;
        self.switching = false;
    }

    pub fn start_pager(&mut self) -> Option<PagerMove> {
        self.pager.goto(0, Direction::Next)
    }

    pub fn page(&mut self, direction: Direction) -> Option<PagerMove> {
        if self.pager.animating || self.pager_locked {
            return None;
        }
        self.pager.step(direction)
    }

    pub fn pager_settled(&mut self) {
        self.pager.animating = false;
    }

    pub fn open_project(&mut self, slide: usize) -> bool {
        if self.detail_busy || self.active_view.is_some() {
            return false;
        }
        self.active_view = Some(ActiveProjectView { slide });
        self.pager_locked = true;
        self.detail_busy = true;
        true
    }

    pub fn project_opened(&mut self) {
        self.detail_busy = false;
    }

    pub fn close_project(&mut self) -> Option<ActiveProjectView> {
        if self.detail_busy {
            return None;
        }
        let view = self.active_view?;
        self.detail_busy = true;
        Some(view)
    }

    pub fn project_closed(&mut self) {
        self.active_view = None;
        self.pager_locked = false;
        self.detail_busy = false;
    }
}

type Observer = Arc<dyn Fn(&SectionNavigator) + Send + Sync>;

/// Runs navigator transitions against a [`Stage`].
///
/// The state lock is only held between awaits; a trigger arriving while a
/// timeline is in flight sees the busy state and is dropped. So is every
/// trigger before [`Choreographer::wire`].
#[derive(Clone)]
pub struct Choreographer<S> {
    nav: Arc<Mutex<SectionNavigator>>,
    stage: S,
    wired: Arc<AtomicBool>,
    observer: Option<Observer>,
}

impl<S: Stage> Choreographer<S> {
    pub fn new(nav: SectionNavigator, stage: S) -> Self {
        Self {
            nav: Arc::new(Mutex::new(nav)),
            stage,
            wired: Arc::new(AtomicBool::new(false)),
            observer: None,
        }
    }

    pub fn with_observer(
        mut self,
        observer: impl Fn(&SectionNavigator) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn snapshot(&self) -> SectionNavigator {
        self.nav
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut SectionNavigator) -> R) -> R {
        let (res, snapshot) = {
            let mut nav = self.nav.lock().unwrap_or_else(PoisonError::into_inner);
            let res = f(&mut nav);
            (res, self.observer.as_ref().map(|_| nav.clone()))
        };
        if let (Some(observer), Some(snapshot)) = (&self.observer, snapshot) {
            observer(&snapshot);
        }
        res
    }

    pub fn is_wired(&self) -> bool {
        self.wired.load(Ordering::Acquire)
    }

    /// Waits for the stage to settle, then starts accepting input. Returns
    /// `true` for the call that did the wiring.
    pub async fn wire(&self) -> bool {
        self.stage.settle().await;
        let first = !self.wired.swap(true, Ordering::AcqRel);
        if first {
            log::debug!("page wired");
        }
        first
    }

    fn accepts_input(&self) -> bool {
        let wired = self.is_wired();
        if !wired {
            log::debug!("input before wiring dropped");
        }
        wired
    }

    async fn play(&self, timeline: Timeline) {
        log::debug!("playing {}", timeline.label());
        self.stage.play(timeline).await;
    }

    pub async fn toggle_menu(&self) {
        if !self.accepts_input() {
            return;
        }
        let Some(motion) = self.update(SectionNavigator::toggle_menu) else {
            log::debug!("menu toggle dropped");
            return;
        };
        self.run_menu(motion).await;
    }

    pub async fn select_section(&self, target: Section) {
        if !self.accepts_input() {
            return;
        }
        match self.update(|nav| nav.request_section(target)) {
            SectionRequest::Ignored => log::debug!("section request for {target:?} dropped"),
            SectionRequest::CloseMenu => self.run_menu(MenuMotion::Close).await,
            SectionRequest::SwitchNow(switch) => self.switch_section(switch).await,
        }
    }

    async fn run_menu(&self, motion: MenuMotion) {
        let open = motion::menu_open();
        let timeline = match motion {
            MenuMotion::Open => open,
            MenuMotion::Close => open.reversed("menu-close", |t| self.stage.count(t)),
        };
        self.play(timeline).await;
        if let Some(switch) = self.update(SectionNavigator::menu_settled) {
            self.switch_section(switch).await;
        }
    }

    async fn switch_section(&self, switch: SectionSwitch) {
        self.play(motion::section_switch(switch.from, switch.to)).await;
        self.play(motion::section_hidden(switch.from)).await;
        self.update(|nav| nav.switch_settled(switch));
    }

    pub async fn intro(&self) {
        self.play(motion::home_intro()).await;
    }

    pub async fn start_pager(&self) {
        if let Some(mv) = self.update(SectionNavigator::start_pager) {
            self.play(motion::pager(mv)).await;
            self.update(SectionNavigator::pager_settled);
        }
    }

    pub async fn page(&self, direction: Direction) {
        if !self.accepts_input() {
            return;
        }
        let Some(mv) = self.update(|nav| nav.page(direction)) else {
            return;
        };
        self.play(motion::pager(mv)).await;
        self.update(SectionNavigator::pager_settled);
    }

    pub async fn open_project(&self, slide: usize) {
        if !self.accepts_input() {
            return;
        }
        if !self.update(|nav| nav.open_project(slide)) {
            log::debug!("detail open for slide {slide} dropped");
            return;
        }
        self.play(motion::overlay_visibility(true)).await;
        self.stage.settle().await;
        self.stage.reset_detail_scroll();
        self.play(motion::detail_open(slide)).await;
        self.update(SectionNavigator::project_opened);
    }

    pub async fn close_project(&self) {
        if !self.accepts_input() {
            return;
        }
        let Some(view) = self.update(SectionNavigator::close_project) else {
            return;
        };
        let close =
            motion::detail_open(view.slide).reversed("detail-close", |t| self.stage.count(t));
        self.play(close).await;
        let [heading, image] = view.triggers();
        self.stage.clear_props(&[heading, image, Target::Overlay]);
        self.play(motion::overlay_visibility(false)).await;
        self.update(SectionNavigator::project_closed);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollSpy {
    active: usize,
}

impl ScrollSpy {
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn select(&mut self, index: usize) {
        self.active = index;
    }

    /// `blocks` are `(top, bottom)` offsets inside the scroll container.
    pub fn observe(&mut self, blocks: &[(f64, f64)], center: f64) -> usize {
        if let Some(i) = blocks
            .iter()
            .position(|(top, bottom)| *top <= center && center < *bottom)
        {
            self.active = i;
        }
        self.active
    }
}
