//! The site's timelines.

use crate::navigator::{Direction, PagerMove, Section};
use crate::timeline::{Ease, Position, Prop, Step, Target, Timeline, TriggerPart};

/// Icon morph and panel reveal, played forward to open the menu.
pub fn menu_open() -> Timeline {
    let tl = Timeline::new("menu-open");
    let icon = Step {
        duration: 1.0,
        ease: Ease::Power3InOut,
        position: Position::At(0.0),
        ..tl.step()
    };
    let panel = Step {
        ease: Ease::ElasticOut,
        position: Position::At(0.0),
        ..tl.step()
    };
    let items = Step {
        duration: 0.25,
        stagger: 0.15,
        position: Position::WithPrevious(0.3),
        ..tl.step()
    };
    tl.tween(
        Target::MenuIcon,
        Some(vec![Prop::RotateDeg(0.0)]),
        vec![Prop::RotateDeg(90.0)],
        icon,
    )
    .tween(
        Target::MenuPanel,
        Some(vec![Prop::WidthPercent(0.0)]),
        vec![Prop::WidthPercent(100.0)],
        panel,
    )
    .tween(
        Target::MenuItems,
        Some(vec![Prop::YPx(200.0), Prop::Opacity(0.0)]),
        vec![Prop::YPx(0.0), Prop::Opacity(1.0)],
        items,
    )
}

pub fn section_switch(from: Section, to: Section) -> Timeline {
    let tl = Timeline::new("section-switch");
    let out = Step {
        ease: Ease::Power2In,
        ..tl.step()
    };
    let incoming = Step {
        ease: Ease::Power2Out,
        ..tl.step()
    };
    tl.tween(
        Target::Section(from),
        None,
        vec![
            Prop::AutoAlpha(0.0),
            Prop::HeightDvh(0.0),
            Prop::TopPercent(0.0),
        ],
        out,
    )
    .set(Target::Section(to), vec![Prop::Visible(true)], Position::End)
    .tween(
        Target::Section(to),
        Some(vec![
            Prop::AutoAlpha(0.0),
            Prop::HeightDvh(0.0),
            Prop::TopPercent(100.0),
            Prop::BottomPercent(0.0),
        ]),
        vec![
            Prop::AutoAlpha(1.0),
            Prop::HeightDvh(100.0),
            Prop::BottomPercent(0.0),
            Prop::TopPercent(0.0),
        ],
        incoming,
    )
}

pub fn section_hidden(section: Section) -> Timeline {
    Timeline::new("section-hidden").set(
        Target::Section(section),
        vec![Prop::Visible(false)],
        Position::At(0.0),
    )
}

/// The outgoing slide exits against the input direction.
pub fn pager(mv: PagerMove) -> Timeline {
    let d = match mv.direction {
        Direction::Previous => -1.0,
        Direction::Next => 1.0,
    };
    let mut tl = Timeline::new("pager");
    if let Some(from) = mv.from {
        let exit = Step {
            position: Position::At(0.0),
            ..tl.step()
        };
        tl = tl
            .set(Target::Slide(from), vec![Prop::ZIndex(0)], Position::At(0.0))
            .tween(
                Target::SlideImage(from),
                None,
                vec![Prop::YPercent(-15.0 * d)],
                exit,
            )
            .set(Target::Slide(from), vec![Prop::AutoAlpha(0.0)], Position::End);
    }
    let enter = Step {
        position: Position::At(0.0),
        ..tl.step()
    };
    let words = Step {
        duration: 0.25,
        ease: Ease::Power4Out,
        stagger: 0.15,
        position: Position::At(0.5),
    };
    tl.set(
        Target::Slide(mv.to),
        vec![Prop::AutoAlpha(1.0), Prop::ZIndex(1)],
        Position::At(0.0),
    )
    .tween(
        Target::SlideOuter(mv.to),
        Some(vec![Prop::YPercent(100.0 * d)]),
        vec![Prop::YPercent(0.0)],
        enter,
    )
    .tween(
        Target::SlideInner(mv.to),
        Some(vec![Prop::YPercent(-100.0 * d)]),
        vec![Prop::YPercent(0.0)],
        enter,
    )
    .tween(
        Target::SlideImage(mv.to),
        Some(vec![Prop::YPercent(15.0 * d)]),
        vec![Prop::YPercent(0.0)],
        enter,
    )
    .tween(
        Target::SlideWords(mv.to),
        Some(vec![Prop::AutoAlpha(0.0), Prop::YPercent(50.0 * d)]),
        vec![Prop::AutoAlpha(1.0), Prop::YPercent(0.0)],
        words,
    )
}

/// Project detail open. Played in reverse to close.
pub fn detail_open(slide: usize) -> Timeline {
    let tl = Timeline::new("detail-open");
    let heading = Step {
        position: Position::At(0.0),
        ..tl.step()
    };
    let image = Step {
        position: Position::WithPrevious(0.1),
        ..tl.step()
    };
    let menu_button = Step {
        ease: Ease::ElasticIn,
        position: Position::At(0.0),
        ..tl.step()
    };
    let overlay = Step {
        ease: Ease::Power2Out,
        ..tl.step()
    };
    let blocks = Step {
        stagger: 0.1,
        position: Position::WithPrevious(0.0),
        ..tl.step()
    };
    let back = Step {
        ease: Ease::ElasticOut,
        ..tl.step()
    };
    let leave = || {
        (
            vec![Prop::AutoAlpha(1.0), Prop::YPercent(1.0)],
            vec![Prop::AutoAlpha(0.0), Prop::YPercent(-100.0)],
        )
    };
    let (from, to) = leave();
    let tl = tl.tween(
        Target::Trigger {
            slide,
            part: TriggerPart::Heading,
        },
        Some(from),
        to,
        heading,
    );
    let (from, to) = leave();
    tl.tween(
        Target::Trigger {
            slide,
            part: TriggerPart::Image,
        },
        Some(from),
        to,
        image,
    )
    .tween(
        Target::MenuButton,
        Some(vec![Prop::AutoAlpha(1.0), Prop::XPx(0.0)]),
        vec![Prop::AutoAlpha(0.0), Prop::XPx(100.0)],
        menu_button,
    )
    .tween(
        Target::Overlay,
        Some(vec![Prop::AutoAlpha(0.0)]),
        vec![Prop::AutoAlpha(1.0)],
        overlay,
    )
    .tween(
        Target::OverlayBlocks,
        Some(vec![Prop::AutoAlpha(0.0), Prop::YPercent(100.0)]),
        vec![Prop::AutoAlpha(1.0), Prop::YPercent(0.0)],
        blocks,
    )
    .tween(
        Target::BackButtons,
        Some(vec![Prop::AutoAlpha(0.0), Prop::XPx(100.0)]),
        vec![Prop::AutoAlpha(1.0), Prop::XPx(0.0)],
        back,
    )
}

pub fn overlay_visibility(visible: bool) -> Timeline {
    Timeline::new("overlay-visibility").set(
        Target::Overlay,
        vec![Prop::Visible(visible)],
        Position::At(0.0),
    )
}

pub fn home_intro() -> Timeline {
    let tl = Timeline::new("home-intro");
    let words = Step {
        duration: 0.25,
        ease: Ease::Power4InOut,
        stagger: 0.1,
        position: Position::At(0.5),
    };
    tl.tween(
        Target::HomeWords,
        Some(vec![Prop::AutoAlpha(0.0), Prop::YPercent(50.0)]),
        vec![Prop::AutoAlpha(1.0), Prop::YPercent(0.0)],
        words,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween_for(tl: &Timeline, target: Target) -> &crate::timeline::Tween {
        tl.tweens()
            .iter()
            .rev()
            .find(|t| t.target == target)
            .expect("target should be animated")
    }

    fn start_of(tl: &Timeline, target: Target, count: impl Fn(&Target) -> usize) -> f64 {
        let index = tl
            .tweens()
            .iter()
            .rposition(|t| t.target == target)
            .expect("target should be animated");
        tl.starts(count)[index]
    }

    fn many_blocks(target: &Target) -> usize {
        match target {
            Target::OverlayBlocks => 6,
            _ => 1,
        }
    }

    #[test]
    fn test_pager_direction_signs() {
        let next = pager(PagerMove {
            from: Some(0),
            to: 1,
            direction: Direction::Next,
        });
        assert_eq!(
            tween_for(&next, Target::SlideOuter(1)).from,
            Some(vec![Prop::YPercent(100.0)])
        );
        assert_eq!(
            tween_for(&next, Target::SlideImage(0)).to,
            vec![Prop::YPercent(-15.0)]
        );

        let prev = pager(PagerMove {
            from: Some(1),
            to: 0,
            direction: Direction::Previous,
        });
        assert_eq!(
            tween_for(&prev, Target::SlideOuter(0)).from,
            Some(vec![Prop::YPercent(-100.0)])
        );
        assert_eq!(
            tween_for(&prev, Target::SlideImage(1)).to,
            vec![Prop::YPercent(15.0)]
        );
    }

    #[test]
    fn test_first_pager_step_has_no_exit() {
        let first = pager(PagerMove {
            from: None,
            to: 0,
            direction: Direction::Next,
        });
        assert!(first
            .tweens()
            .iter()
            .all(|t| !matches!(t.target, Target::SlideImage(i) | Target::Slide(i) if i != 0)));
        assert_eq!(first.duration(), 0.75);
    }

    #[test]
    fn test_outgoing_slide_hidden_after_exit() {
        let tl = pager(PagerMove {
            from: Some(2),
            to: 0,
            direction: Direction::Next,
        });
        let hide = tween_for(&tl, Target::Slide(2));
        assert_eq!(hide.to, vec![Prop::AutoAlpha(0.0)]);
        assert_eq!(start_of(&tl, Target::Slide(2), |_| 1), 0.5);
    }

    #[test]
    fn test_detail_close_is_reverse_of_open() {
        let open = detail_open(1);
        let close = open.reversed("detail-close", |_| 1);
        assert_eq!(close.tweens().len(), open.tweens().len());
        assert_eq!(close.tweens()[0].target, Target::BackButtons);
        let heading = tween_for(
            &close,
            Target::Trigger {
                slide: 1,
                part: TriggerPart::Heading,
            },
        );
        assert_eq!(heading.to, vec![Prop::AutoAlpha(1.0), Prop::YPercent(1.0)]);
        assert_eq!(close.duration(), open.duration());
    }

    #[test]
    fn test_back_control_follows_detail_fields() {
        let open = detail_open(0);
        let blocks = tween_for(&open, Target::OverlayBlocks);
        let blocks_start = start_of(&open, Target::OverlayBlocks, many_blocks);
        let blocks_end = blocks_start + blocks.span(6);
        assert!((blocks_end - 1.6).abs() < 1e-9);
        assert!(start_of(&open, Target::BackButtons, many_blocks) >= blocks_end - 1e-9);

        // closing hides the back control before the fields fold away
        let close = open.reversed("detail-close", many_blocks);
        let back = tween_for(&close, Target::BackButtons);
        let back_end = start_of(&close, Target::BackButtons, many_blocks) + back.span(1);
        assert!(start_of(&close, Target::OverlayBlocks, many_blocks) >= back_end - 1e-9);
        let (open_total, close_total) = (
            open.duration_with(many_blocks),
            close.duration_with(many_blocks),
        );
        assert!((open_total - close_total).abs() < 1e-9);
    }

    #[test]
    fn test_section_switch_shows_incoming_after_outgoing() {
        let tl = section_switch(Section::Home, Section::About);
        let out = &tl.tweens()[0];
        assert_eq!(out.target, Target::Section(Section::Home));
        let show = &tl.tweens()[1];
        assert_eq!(show.to, vec![Prop::Visible(true)]);
        assert_eq!(tl.starts(|_| 1)[1], 0.5);
        assert_eq!(tl.duration(), 1.0);
    }
}
