//! Loupe Animator - scroll-driven camera animation for the showcase
//!
//! Declares the scroll-linked keyframes, turns hooked tween writes into
//! camera update intents, and consumes them once per frame so the camera
//! and its shadows are refreshed at most once per rendered frame.

mod animator;
mod clock;
pub mod config;
mod dirty;
pub mod keyframes;
mod showcase;
mod targets;

pub use animator::{AnimatorStats, HookWiring, ScrollCameraAnimator};
pub use clock::FrameClock;
pub use config::ShowcaseConfig;
pub use dirty::{CameraField, CameraUpdateIntent, DirtyState};
pub use showcase::Showcase;
pub use targets::SceneTargets;
