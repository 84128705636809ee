//! Scrollwork is a headless engine for scroll-driven page motion.
//!
//! The host (a browser shell, a native view, or a test) feeds scroll, resize and pointer input
//! into a [`FrameScheduler`], ticks it once per display frame, and applies the resulting
//! property writes through a [`PropertySink`]. Nothing here touches a real DOM:
//!
//! - [`Timeline`]s map a progress scalar onto target properties
//! - [`ProgressBinding`], [`Pin`] and the [`HorizontalScrollStrategy`] variants turn document
//!   scroll into progress, pinning and horizontal strip motion
//! - [`LoadGate`] holds content behind a loader overlay until assets settle
//! - [`PointerOverlay`] drives a trailing custom cursor, and [`HoverPreview`] the project-row
//!   hover card
//! - [`SceneSpec`] and [`Stage`] describe and mount a whole page from JSON
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod contact;
mod content;
mod effects;
mod foundation;
mod gate;
mod pointer;
mod scene;
mod schedule;
mod scroll;

pub use crate::foundation::core::{
    COMPACT_MAX_WIDTH_PX, Point, Rect, Region, Rgba8, TargetId, Vec2, Viewport, ViewportClass,
};
pub use crate::foundation::error::{ScrollworkError, ScrollworkResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::playhead::{Autoplay, Direction, PlayState, Playhead, Repeat, Toggle};
pub use crate::animation::sink::{PropertySink, PropertyWrite, RecordingSink};
pub use crate::animation::timeline::{
    TimedBuilder, TimedTimeline, Timeline, TimelineBuilder, TimelineEntry,
};
pub use crate::animation::tween::Tween;
pub use crate::animation::value::{ClipShape, Lerp, Property, Value};

pub use crate::scroll::binding::{
    Anchor, Distance, Edge, Extent, ProgressBinding, Scrub, TriggerSpec,
};
pub use crate::scroll::navigate::{
    BURGER_FADE, BURGER_TOP_ZONE_PX, BurgerVisibility, NAV_DURATION, scroll_to_section,
};
pub use crate::scroll::pin::{DEFAULT_ANTICIPATE_PX, Pin, PinFrame, PinLayout, PinState};
pub use crate::scroll::remap::{
    GESTURE_END_DEBOUNCE, GestureTracker, HorizontalScrollStrategy, NativeSwipe, PinnedHijack,
    SNAP_SETTLE, StrategyKind, StripConfig, select_strategy, snap_to_increment,
};
pub use crate::scroll::sections::{SectionMarker, SectionTracker};
pub use crate::scroll::source::{FrameCtx, ScrollRequest, ScrollSnapshot, ScrollSource};

pub use crate::schedule::effect::{
    PinDriver, PinEffect, RemapEffect, RevealEffect, ScrollEffect, ScrubEffect,
};
pub use crate::schedule::scheduler::{EffectKey, FrameOutput, FrameScheduler, Registration};

pub use crate::gate::listeners::{ListenerId, Listeners, Subscription};
pub use crate::gate::load::{GateConfig, GateEvent, GatePhase, LoadGate, ProgressSignal};

pub use crate::pointer::overlay::{
    ElementKind, ElementTree, HoverTag, PointerOverlay, PointerState, interactive_tag,
};

pub use crate::effects::marquee::{Marquee, wrap_strip};
pub use crate::effects::preview::{HoverPreview, RowHover};

pub use crate::contact::form::{
    ContactForm, Field, FieldErrors, FormController, FormStatus, is_email_shaped,
};
#[cfg(feature = "http-relay")]
pub use crate::contact::relay::HttpRelay;
pub use crate::contact::relay::{FormRelay, RelayConfig, RelayPayload, RelayResponse};

pub use crate::assets::fallback::{
    AssetSlot, AssetTracker, ModelPose, ModelVisual, PlaceholderShape, ProfileVisual, TextAvatar,
    initials, model_visual, profile_visual,
};
pub use crate::content::catalog;

pub use crate::scene::model::{
    EffectSpec, PointerSpec, SceneSpec, ScrollTrace, SectionSpec, TraceFrame, TweenSpec,
};
pub use crate::scene::stage::{FrameRecord, Stage, simulate};
