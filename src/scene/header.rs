//! The header reveal: a dark hero header whose icon badges converge, shrink and settle between
//! lines of text while the page switches to a light theme.

use crate::animation::ease::Ease;
use crate::animation::value::Property;
use crate::foundation::core::{ElementId, Rgba8, Viewport};
use crate::foundation::error::ScrollweaveResult;
use crate::plan::segment::Anchor;
use crate::scene::compile::Choreography;
use crate::scene::model::{
    BadgeDescriptor, BadgeShape, ChoreographyDef, ElementDef, EntryDef, LayoutDef,
    LayoutTargetDef, PropsDef, StepDef, TextBlockDef, TextRevealDef, TweenDef, ValueDef,
};
use crate::scene::text::SplitMode;
use crate::source::progress::PinnedRegion;
use crate::timeline::phase::PhaseMarker;

pub const START: &str = "start";
pub const MOVE_TO_CENTER: &str = "moveToCenter";
pub const SHRINK_ICONS: &str = "shrinkIcons";
pub const BACKGROUND_CHANGE: &str = "backgroundChange";
pub const POSITION_ICONS: &str = "positionIcons";
pub const TEXT_REVEAL: &str = "textReveal";
pub const FINAL_REVEAL: &str = "finalReveal";

pub const PHASES: [(&str, f64); 7] = [
    (START, 0.0),
    (MOVE_TO_CENTER, 0.2),
    (SHRINK_ICONS, 0.5),
    (BACKGROUND_CHANGE, 0.7),
    (POSITION_ICONS, 0.9),
    (TEXT_REVEAL, 1.1),
    (FINAL_REVEAL, 1.5),
];

pub const CONTAINER: &str = "container";
pub const HEADER: &str = "header";
pub const NAV: &str = "nav";
pub const TITLE: &str = "title";
pub const SUBTITLE: &str = "subtitle";
pub const BUTTON: &str = "button";
pub const ICON_ROW: &str = "icons";
pub const HEADLINE: &str = "headline";
pub const LINES: &str = "lines";
pub const FINAL_TEXT: &str = "final";

/// Scroll distance, in pixels, over which the header stays pinned.
pub const PINNED_DISTANCE: f64 = 3000.0;

pub const HEADLINE_TEXT: &str = "Your data runs\nthe world";
pub const LINES_TEXT: &str = "Your favorite songs.\nThat must-see movie.\nYour top\nhabits.";

const DARK: Rgba8 = Rgba8::rgb(0x12, 0x12, 0x12);
const LIGHT: Rgba8 = Rgba8::rgb(0xf9, 0xf9, 0xf9);

/// `(glyph, shape, colour)` per badge, left to right.
pub const BADGES: [(&str, BadgeShape, Rgba8); 5] = [
    ("music", BadgeShape::Circle, Rgba8::rgb(0x8b, 0x5c, 0xf6)),
    ("movie", BadgeShape::Square, Rgba8::rgb(0x10, 0xb9, 0x81)),
    ("ghost", BadgeShape::Hexagon, Rgba8::rgb(0xf9, 0x73, 0x16)),
    ("shopping", BadgeShape::Square, Rgba8::rgb(0xfb, 0xbf, 0x24)),
    ("tshirt", BadgeShape::Circle, Rgba8::rgb(0x3b, 0x82, 0xf6)),
];

/// Final badge placement `(x px, y vh)`, authored per badge. All badges end at scale 0.6.
pub const BADGE_LAYOUT: [(f64, f64); 5] = [
    (140.0, -15.0),
    (-120.0, 5.0),
    (0.0, 10.0),
    (120.0, 10.0),
    (-170.0, -25.0),
];
pub const BADGE_LAYOUT_SCALE: f64 = 0.6;

pub fn badge_id(index: usize) -> ElementId {
    ElementId::from("badge").child(index)
}

pub fn pinned_region() -> ScrollweaveResult<PinnedRegion> {
    PinnedRegion::new(0.0, PINNED_DISTANCE)
}

fn props<const N: usize>(values: [(Property, ValueDef); N]) -> PropsDef {
    values.into_iter().collect()
}

fn element<const N: usize>(id: &str, initial: [(Property, ValueDef); N]) -> ElementDef {
    ElementDef {
        id: ElementId::from(id),
        initial: props(initial),
    }
}

fn resting() -> [(Property, ValueDef); 2] {
    [(Property::Opacity, 1.0.into()), (Property::Y, 0.0.into())]
}

fn targets(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn tween(ids: &[&str], at: &str, duration: f64, ease: Ease, to: PropsDef) -> TweenDef {
    TweenDef {
        targets: targets(ids),
        at: Anchor::at(at),
        stagger: 0.0,
        duration,
        ease,
        from: PropsDef::new(),
        to,
    }
}

fn fade_up(ids: &[&str], dy: f64, delay: f64) -> EntryDef {
    EntryDef {
        targets: targets(ids),
        delay,
        stagger: 0.0,
        duration: 1.0,
        ease: Ease::OutQuart,
        from: props([(Property::Opacity, 0.0.into()), (Property::Y, dy.into())]),
        to: props([(Property::Opacity, 1.0.into()), (Property::Y, 0.0.into())]),
    }
}

/// Configuration of the header reveal for `viewport`.
pub fn header_reveal_def(viewport: Viewport) -> ChoreographyDef {
    let elements = vec![
        element(CONTAINER, [(Property::BackgroundColor, DARK.into())]),
        element(HEADER, [(Property::BackgroundColor, Rgba8::transparent().into())]),
        element(NAV, resting()),
        element(TITLE, resting()),
        element(SUBTITLE, resting()),
        element(BUTTON, resting()),
        element(ICON_ROW, [(Property::Opacity, 1.0.into())]),
        element(FINAL_TEXT, [(Property::Opacity, 0.0.into())]),
    ];

    let badges = BADGES
        .iter()
        .enumerate()
        .map(|(i, &(glyph, shape, color))| BadgeDescriptor {
            id: badge_id(i),
            color,
            shape,
            glyph: glyph.to_string(),
        })
        .collect();

    let texts = vec![
        TextBlockDef {
            id: ElementId::from(HEADLINE),
            text: HEADLINE_TEXT.to_string(),
            split: SplitMode::Chars,
        },
        TextBlockDef {
            id: ElementId::from(LINES),
            text: LINES_TEXT.to_string(),
            split: SplitMode::Lines,
        },
    ];

    let layout = LayoutDef {
        at: Anchor::at(POSITION_ICONS),
        duration: 0.7,
        ease: Ease::OutQuad,
        targets: BADGE_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, &(x, y_vh))| LayoutTargetDef {
                element: badge_id(i),
                x: x.into(),
                y: ValueDef::Text(format!("{y_vh}vh")),
                scale: BADGE_LAYOUT_SCALE,
            })
            .collect(),
    };

    let steps = vec![
        StepDef::Tween(tween(
            &[HEADER],
            START,
            0.3,
            Ease::default(),
            props([(Property::BackgroundColor, Rgba8::rgb(0, 0, 0).with_alpha(0.9).into())]),
        )),
        StepDef::Tween(tween(
            &[TITLE],
            START,
            0.5,
            Ease::InCubic,
            props([(Property::Opacity, 0.0.into()), (Property::Y, (-100.0).into())]),
        )),
        StepDef::Tween(tween(
            &[SUBTITLE, BUTTON],
            START,
            0.3,
            Ease::default(),
            props([(Property::Opacity, 0.0.into()), (Property::Y, (-50.0).into())]),
        )),
        StepDef::Tween(TweenDef {
            stagger: 0.1,
            ..tween(
                &["badge.*"],
                MOVE_TO_CENTER,
                0.5,
                Ease::elastic_out(1.0, 0.3),
                props([(Property::Y, "-30vh".into())]),
            )
        }),
        StepDef::Tween(tween(
            &["badge.*"],
            SHRINK_ICONS,
            0.4,
            Ease::InOutCubic,
            props([(Property::Scale, 0.5.into())]),
        )),
        StepDef::Tween(tween(
            &[CONTAINER],
            BACKGROUND_CHANGE,
            0.5,
            Ease::default(),
            props([(Property::BackgroundColor, LIGHT.into())]),
        )),
        StepDef::Layout(layout),
        StepDef::TextReveal(TextRevealDef {
            block: ElementId::from(LINES),
            at: Anchor::at(TEXT_REVEAL),
            stagger: 0.1,
            duration: 0.8,
            ease: Ease::OutCubic,
            distance: 300.0,
            from_color: LIGHT,
            to_color: DARK,
        }),
        StepDef::Tween(tween(
            &[ICON_ROW],
            FINAL_REVEAL,
            0.3,
            Ease::default(),
            props([(Property::Opacity, 0.0.into())]),
        )),
        StepDef::Tween(tween(
            &[FINAL_TEXT],
            FINAL_REVEAL,
            0.5,
            Ease::default(),
            props([(Property::Opacity, 1.0.into())]),
        )),
    ];

    let entries = vec![
        EntryDef {
            targets: targets(&["headline.*"]),
            delay: 0.3,
            stagger: 0.03,
            duration: 1.2,
            ease: Ease::elastic_out(1.0, 0.5),
            from: props([(Property::Opacity, 0.0.into()), (Property::Y, 200.0.into())]),
            to: props([(Property::Opacity, 1.0.into()), (Property::Y, 0.0.into())]),
        },
        fade_up(&[NAV], -20.0, 1.2),
        fade_up(&[SUBTITLE], 50.0, 1.5),
        fade_up(&[BUTTON], 50.0, 1.7),
        EntryDef {
            targets: targets(&["badge.*"]),
            delay: 1.8,
            stagger: 0.1,
            duration: 0.8,
            ease: Ease::OutCubic,
            from: props([(Property::Opacity, 0.0.into())]),
            to: props([(Property::Opacity, 1.0.into())]),
        },
    ];

    ChoreographyDef {
        viewport,
        phases: PHASES
            .iter()
            .map(|&(name, offset)| PhaseMarker {
                name: name.to_string(),
                offset,
            })
            .collect(),
        elements,
        badges,
        texts,
        steps,
        entries,
    }
}

/// The header reveal, built and validated for `viewport`.
pub fn header_reveal(viewport: Viewport) -> ScrollweaveResult<Choreography> {
    header_reveal_def(viewport).build()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/header.rs"]
mod tests;
