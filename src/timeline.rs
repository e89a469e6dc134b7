//! Presentation timelines as plain data, and the engine seam that plays them.

use std::future::Future;

use crate::navigator::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Section(Section),
    MenuButton,
    MenuIcon,
    MenuPanel,
    MenuItems,
    HomeWords,
    Slide(usize),
    SlideOuter(usize),
    SlideInner(usize),
    SlideImage(usize),
    SlideWords(usize),
    Trigger { slide: usize, part: TriggerPart },
    Overlay,
    OverlayBlocks,
    BackButtons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerPart {
    Heading,
    Image,
}

impl Target {
    pub fn selector(&self) -> String {
        match self {
            Self::Section(section) => format!("#{}", section.dom_id()),
            Self::MenuButton => ".menu__button".to_string(),
            Self::MenuIcon => ".menu__button svg".to_string(),
            Self::MenuPanel => "nav.menu".to_string(),
            Self::MenuItems => ".menu__content div".to_string(),
            Self::HomeWords => ".home__heading .clip-text".to_string(),
            Self::Slide(i) => format!(".ps__sect[data-index=\"{i}\"]"),
            Self::SlideOuter(i) => format!(".ps__sect[data-index=\"{i}\"] .ps__outer"),
            Self::SlideInner(i) => format!(".ps__sect[data-index=\"{i}\"] .ps__inner"),
            Self::SlideImage(i) => format!(".ps__sect[data-index=\"{i}\"] .ps__img"),
            Self::SlideWords(i) => {
                format!(".ps__sect[data-index=\"{i}\"] .ps__heading .clip-text")
            }
            Self::Trigger {
                slide,
                part: TriggerPart::Heading,
            } => format!(".ps__sect[data-index=\"{slide}\"] .ps__heading"),
            Self::Trigger {
                slide,
                part: TriggerPart::Image,
            } => format!(".ps__sect[data-index=\"{slide}\"] .ps__img"),
            Self::Overlay => ".showWork".to_string(),
            Self::OverlayBlocks => ".showWork div".to_string(),
            Self::BackButtons => ".backButton".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    /// Opacity, plus `visibility: hidden` at zero.
    AutoAlpha(f64),
    Opacity(f64),
    XPx(f64),
    YPx(f64),
    YPercent(f64),
    RotateDeg(f64),
    WidthPercent(f64),
    HeightDvh(f64),
    TopPercent(f64),
    BottomPercent(f64),
    Visible(bool),
    ZIndex(i32),
    ClipPath(&'static str),
}

/// Maps props to CSS declarations. Translations share one `transform`.
pub fn css_declarations(props: &[Prop]) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();
    let mut transform = Vec::new();
    for prop in props {
        match prop {
            Prop::AutoAlpha(v) => {
                out.push(("opacity", v.to_string()));
                let visibility = if *v == 0.0 { "hidden" } else { "inherit" };
                out.push(("visibility", visibility.to_string()));
            }
            Prop::Opacity(v) => out.push(("opacity", v.to_string())),
            Prop::XPx(v) => transform.push(format!("translateX({v}px)")),
            Prop::YPx(v) => transform.push(format!("translateY({v}px)")),
            Prop::YPercent(v) => transform.push(format!("translateY({v}%)")),
            Prop::RotateDeg(v) => transform.push(format!("rotate({v}deg)")),
            Prop::WidthPercent(v) => out.push(("width", format!("{v}%"))),
            Prop::HeightDvh(v) => out.push(("height", format!("{v}dvh"))),
            Prop::TopPercent(v) => out.push(("top", format!("{v}%"))),
            Prop::BottomPercent(v) => out.push(("bottom", format!("{v}%"))),
            Prop::Visible(v) => {
                let visibility = if *v { "visible" } else { "hidden" };
                out.push(("visibility", visibility.to_string()));
            }
            Prop::ZIndex(v) => out.push(("z-index", v.to_string())),
            Prop::ClipPath(v) => out.push(("clip-path", v.to_string())),
        }
    }
    if !transform.is_empty() {
        out.push(("transform", transform.join(" ")));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Power1InOut,
    Power2In,
    Power2Out,
    Power3InOut,
    Power4Out,
    Power4InOut,
    ElasticOut,
    ElasticIn,
}

impl Ease {
    pub fn css(&self) -> &'static str {
        match self {
            Self::Power1InOut => "cubic-bezier(0.45, 0, 0.55, 1)",
            Self::Power2In => "cubic-bezier(0.55, 0.085, 0.68, 0.53)",
            Self::Power2Out => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Self::Power3InOut => "cubic-bezier(0.65, 0, 0.35, 1)",
            Self::Power4Out => "cubic-bezier(0.165, 0.84, 0.44, 1)",
            Self::Power4InOut => "cubic-bezier(0.77, 0, 0.175, 1)",
            Self::ElasticOut => "cubic-bezier(0.34, 1.56, 0.64, 1)",
            Self::ElasticIn => "cubic-bezier(0.36, 0, 0.66, -0.56)",
        }
    }

    fn reversed(self) -> Self {
        match self {
            Self::Power2In => Self::Power2Out,
            Self::Power2Out => Self::Power2In,
            Self::ElasticOut => Self::ElasticIn,
            Self::ElasticIn => Self::ElasticOut,
            other => other,
        }
    }
}

fn single(_: &Target) -> usize {
    1
}

/// Where a tween starts, relative to what is already on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    End,
    /// Offset from the start of the previously added tween (`"<"`).
    WithPrevious(f64),
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub from: Option<Vec<Prop>>,
    pub to: Vec<Prop>,
    pub position: Position,
    pub duration: f64,
    pub ease: Ease,
    /// Delay between consecutive elements of the target.
    pub stagger: f64,
}

impl Tween {
    pub fn span(&self, count: usize) -> f64 {
        self.duration + self.stagger * count.saturating_sub(1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub duration: f64,
    pub ease: Ease,
    pub stagger: f64,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    label: &'static str,
    defaults: Step,
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            defaults: Step {
                duration: 0.5,
                ease: Ease::Power1InOut,
                stagger: 0.0,
                position: Position::End,
            },
            tweens: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn step(&self) -> Step {
        self.defaults
    }

    pub fn tween(
        mut self,
        target: Target,
        from: Option<Vec<Prop>>,
        to: Vec<Prop>,
        step: Step,
    ) -> Self {
        self.tweens.push(Tween {
            target,
            from,
            to,
            position: step.position,
            duration: step.duration,
            ease: step.ease,
            stagger: step.stagger,
        });
        self
    }

    pub fn to(self, target: Target, to: Vec<Prop>) -> Self {
        let step = self.step();
        self.tween(target, None, to, step)
    }

    pub fn from_to(self, target: Target, from: Vec<Prop>, to: Vec<Prop>) -> Self {
        let step = self.step();
        self.tween(target, Some(from), to, step)
    }

    /// Zero-length write at `position`.
    pub fn set(self, target: Target, to: Vec<Prop>, position: Position) -> Self {
        let step = Step {
            duration: 0.0,
            stagger: 0.0,
            position,
            ..self.step()
        };
        self.tween(target, None, to, step)
    }

    /// Start time of every tween, in insertion order, when each target
    /// matches `count` elements.
    pub fn starts(&self, count: impl Fn(&Target) -> usize) -> Vec<f64> {
        let mut starts: Vec<f64> = Vec::with_capacity(self.tweens.len());
        let mut end = 0.0_f64;
        for tween in &self.tweens {
            let start = match tween.position {
                Position::End => end,
                Position::WithPrevious(offset) => starts.last().copied().unwrap_or(0.0) + offset,
                Position::At(at) => at,
            }
            .max(0.0);
            end = end.max(start + tween.span(count(&tween.target)));
            starts.push(start);
        }
        starts
    }

    pub fn duration_with(&self, count: impl Fn(&Target) -> usize) -> f64 {
        self.starts(&count)
            .into_iter()
            .zip(&self.tweens)
            .map(|(start, t)| start + t.span(count(&t.target)))
            .fold(0.0, f64::max)
    }

    pub fn duration(&self) -> f64 {
        self.duration_with(single)
    }

    /// Time-reverse. Tweens without an explicit `from` have nothing to return
    /// to and are dropped.
    pub fn reversed(&self, label: &'static str, count: impl Fn(&Target) -> usize) -> Self {
        let total = self.duration_with(&count);
        let mut placed = self
            .starts(&count)
            .into_iter()
            .zip(&self.tweens)
            .filter_map(|(start, t)| {
                let from = t.from.clone()?;
                let at = total - (start + t.span(count(&t.target)));
                Some((at, from, t))
            })
            .collect::<Vec<_>>();
        placed.sort_by(|a, b| a.0.total_cmp(&b.0));
        let tweens = placed
            .into_iter()
            .map(|(at, from, t)| Tween {
                target: t.target,
                from: Some(t.to.clone()),
                to: from,
                position: Position::At(at),
                duration: t.duration,
                ease: t.ease.reversed(),
                stagger: t.stagger,
            })
            .collect();
        Self {
            label,
            defaults: self.defaults,
            tweens,
        }
    }
}

/// The presentation engine. It only applies what it is given.
pub trait Stage: Clone + 'static {
    fn play(&self, timeline: Timeline) -> impl Future<Output = ()>;

    fn settle(&self) -> impl Future<Output = ()>;

    fn clear_props(&self, targets: &[Target]);

    fn reset_detail_scroll(&self);

    fn count(&self, _target: &Target) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_count(target: &Target) -> usize {
        match target {
            Target::SlideWords(_) => 3,
            _ => 1,
        }
    }

    #[test]
    fn test_positions() {
        let tl = Timeline::new("test")
            .to(Target::Overlay, vec![Prop::AutoAlpha(1.0)])
            .to(Target::BackButtons, vec![Prop::XPx(0.0)]);
        let step = Step {
            position: Position::WithPrevious(0.1),
            ..tl.step()
        };
        let tl = tl
            .tween(Target::MenuButton, None, vec![Prop::Opacity(0.0)], step)
            .set(Target::Overlay, vec![Prop::Visible(false)], Position::At(2.0));
        assert_eq!(tl.starts(|_| 1), vec![0.0, 0.5, 0.6, 2.0]);
        assert_eq!(tl.duration(), 2.0);
    }

    #[test]
    fn test_stagger_extends_span() {
        let tl = Timeline::new("words").tween(
            Target::SlideWords(0),
            Some(vec![Prop::AutoAlpha(0.0)]),
            vec![Prop::AutoAlpha(1.0)],
            Step {
                duration: 0.25,
                ease: Ease::Power4Out,
                stagger: 0.15,
                position: Position::At(0.5),
            },
        );
        assert_eq!(tl.duration(), 0.75);
        assert!((tl.duration_with(words_count) - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_mirrors_and_drops_plain_to() {
        let tl = Timeline::new("open")
            .set(Target::Overlay, vec![Prop::Visible(true)], Position::At(0.0))
            .from_to(
                Target::Overlay,
                vec![Prop::AutoAlpha(0.0)],
                vec![Prop::AutoAlpha(1.0)],
            )
            .from_to(
                Target::BackButtons,
                vec![Prop::XPx(100.0)],
                vec![Prop::XPx(0.0)],
            );
        let rev = tl.reversed("close", |_| 1);
        assert_eq!(rev.label(), "close");
        assert_eq!(rev.tweens().len(), 2);
        assert_eq!(rev.tweens()[0].target, Target::BackButtons);
        assert_eq!(rev.starts(|_| 1), vec![0.0, 0.5]);
        assert_eq!(rev.tweens()[0].to, vec![Prop::XPx(100.0)]);
        assert_eq!(rev.tweens()[1].target, Target::Overlay);
        assert_eq!(rev.tweens()[1].to, vec![Prop::AutoAlpha(0.0)]);
        assert_eq!(rev.duration(), tl.duration());
    }

    #[test]
    fn test_end_waits_for_whole_stagger() {
        let stagger = Step {
            stagger: 0.15,
            position: Position::At(0.5),
            ..Timeline::new("words").step()
        };
        let tl = Timeline::new("words")
            .tween(
                Target::SlideWords(0),
                Some(vec![Prop::AutoAlpha(0.0)]),
                vec![Prop::AutoAlpha(1.0)],
                stagger,
            )
            .to(Target::BackButtons, vec![Prop::XPx(0.0)]);
        assert_eq!(tl.starts(|_| 1), vec![0.5, 1.0]);
        let starts = tl.starts(words_count);
        assert!((starts[1] - 1.3).abs() < 1e-9);

        let rev = tl.reversed("back", words_count);
        assert_eq!(rev.tweens().len(), 1);
        assert_eq!(rev.tweens()[0].target, Target::SlideWords(0));
        assert!((rev.starts(words_count)[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_css_declarations() {
        let decls = css_declarations(&[
            Prop::AutoAlpha(0.0),
            Prop::XPx(100.0),
            Prop::YPercent(-15.0),
            Prop::HeightDvh(100.0),
        ]);
        assert_eq!(
            decls,
            vec![
                ("opacity", "0".to_string()),
                ("visibility", "hidden".to_string()),
                ("height", "100dvh".to_string()),
                ("transform", "translateX(100px) translateY(-15%)".to_string()),
            ]
        );
        let decls = css_declarations(&[Prop::AutoAlpha(0.5), Prop::ZIndex(1)]);
        assert_eq!(decls[1], ("visibility", "inherit".to_string()));
        assert_eq!(decls[2], ("z-index", "1".to_string()));
    }

    #[test]
    fn test_selectors() {
        assert_eq!(
            Target::Section(Section::Works).selector(),
            "#main__section-works"
        );
        assert_eq!(
            Target::SlideWords(2).selector(),
            ".ps__sect[data-index=\"2\"] .ps__heading .clip-text"
        );
    }
}
