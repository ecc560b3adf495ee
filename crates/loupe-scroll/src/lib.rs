//! Scroll-linked tween engine for Loupe
//!
//! Maps the document's scroll offset onto tween progress:
//! - **Anchors** (`"top bottom"`, `"top 80%"`) resolve a trigger element to
//!   a scroll range
//! - **Scrub** smooths the rendered progress toward the scroll-derived one
//! - **Segments** interpolate target properties from lazily captured start
//!   values toward their destinations and report each write
//!
//! The engine never owns the tweened objects; it reads and writes them
//! through [`TweenTargets`].

pub mod anchor;
pub mod ease;
pub mod engine;
pub mod scrub;
pub mod segment;
pub mod trigger;

pub use anchor::{Anchor, Edge};
pub use ease::Ease;
pub use engine::{ScrollEngine, SegmentId, TimelineId, TweenWrite};
pub use scrub::{Scrub, ScrubState};
pub use segment::{Prop, Segment, Timeline, TweenTarget, TweenTargets};
pub use trigger::{ScrollRange, ScrollTrigger};
