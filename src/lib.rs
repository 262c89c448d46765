//! Scrollweave is a scroll-progress driven choreography engine.
//!
//! A [`PhaseTimeline`] names points on an internal duration axis, an [`ElementAnimationPlan`]
//! anchors keyframe segments to those points, and a [`Choreographer`] turns a scroll position into
//! per-element property state that a [`BindingLayer`] applies to a view:
//!
//! - Describe a choreography as a [`ChoreographyDef`] (or start from [`scene::header`])
//! - [`ChoreographyDef::build`] it into a validated [`Choreography`]
//! - Mount it standalone, or inside a [`ScrollSession`] fed by a [`ProgressSource`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod binding;
pub(crate) mod choreo;
pub(crate) mod plan;
/// Configuration model and the reference header scenario.
pub mod scene;
pub(crate) mod source;
pub(crate) mod timeline;

pub use crate::foundation::core::{ElementId, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::value::{Lerp, Property, PropertyBag, PropertyValue, ValueKind};
pub use crate::binding::layer::{BindingLayer, HandleRegistry, RecordingBinding};
pub use crate::choreo::choreographer::{Choreographer, Lifecycle};
pub use crate::choreo::entry::{EntryAnimation, EntrySchedule, EntryStatus, EntryWrite};
pub use crate::choreo::state::ElementState;
pub use crate::plan::builder::PlanBuilder;
pub use crate::plan::element::ElementAnimationPlan;
pub use crate::plan::segment::{Anchor, KeyframeSegment};
pub use crate::scene::compile::Choreography;
pub use crate::scene::model::{
    BadgeDescriptor, BadgeShape, ChoreographyDef, ElementDef, EntryDef, LayoutDef,
    LayoutTargetDef, PropsDef, StepDef, TextBlockDef, TextRevealDef, TweenDef, ValueDef,
};
pub use crate::scene::text::{SideBias, SplitMode, TextUnit, split_text};
pub use crate::source::host::{ManualHost, PinId, ScrollHost, SubscriptionId};
pub use crate::source::progress::{
    InputKind, PinnedRegion, ProgressSource, ScriptedProgress, SmoothScroll, SmoothScrollOptions,
};
pub use crate::source::session::ScrollSession;
pub use crate::timeline::phase::{OFFSET_TOLERANCE, PhaseMarker, PhaseTimeline};
