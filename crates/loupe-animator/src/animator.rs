//! Scroll-to-camera animator
//!
//! Hooked tween writes mark a [`DirtyState`]; the pre-frame listener turns
//! a dirty state into exactly one pair of camera notifications and one
//! shadow reset, then clears it. Any number of scroll or scrub steps
//! between two frames costs one update.

use crate::dirty::{CameraField, CameraUpdateIntent, DirtyState};
use crate::targets::SceneTargets;
use loupe_core::{LoupeError, Result};
use loupe_scroll::{ScrollEngine, Timeline, TimelineId, TweenTarget, TweenWrite};
use loupe_viewer::{FrameContext, FrameListener};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which segments carry the update hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookWiring {
    /// Every segment that moves the camera
    #[default]
    AllCameraFields,
    /// Only camera position segments; target-only writes stay unhooked
    PositionOnly,
}

impl HookWiring {
    pub fn hooks(&self, target: &TweenTarget) -> bool {
        match self {
            HookWiring::AllCameraFields => target.is_camera(),
            HookWiring::PositionOnly => *target == TweenTarget::CameraPosition,
        }
    }
}

impl fmt::Display for HookWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookWiring::AllCameraFields => write!(f, "all-camera-fields"),
            HookWiring::PositionOnly => write!(f, "position-only"),
        }
    }
}

impl FromStr for HookWiring {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all-camera-fields" | "all" => Ok(HookWiring::AllCameraFields),
            "position-only" | "position" => Ok(HookWiring::PositionOnly),
            other => Err(LoupeError::ConfigError(format!(
                "unknown hook wiring '{}' (expected all-camera-fields or position-only)",
                other
            ))),
        }
    }
}

/// Running totals of what the animator did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimatorStats {
    /// Tween writes reported by the engine
    pub writes: u64,
    /// Writes that carried the hook
    pub hooked_writes: u64,
    /// Frames that found the state dirty
    pub updated_frames: u64,
    /// Frames that found the state idle
    pub idle_frames: u64,
}

pub struct ScrollCameraAnimator {
    engine: ScrollEngine,
    dirty: DirtyState,
    wiring: HookWiring,
    stats: AnimatorStats,
}

impl Default for ScrollCameraAnimator {
    fn default() -> Self {
        Self::new(HookWiring::default())
    }
}

impl ScrollCameraAnimator {
    pub fn new(wiring: HookWiring) -> Self {
        Self {
            engine: ScrollEngine::new(),
            dirty: DirtyState::new(),
            wiring,
            stats: AnimatorStats::default(),
        }
    }

    /// Register a timeline, wiring the update hook per [`HookWiring`].
    pub fn register(&mut self, mut timeline: Timeline, targets: &mut SceneTargets<'_>) -> TimelineId {
        for segment in &mut timeline.segments {
            segment.on_update = self.wiring.hooks(&segment.target);
        }
        let (id, writes) = self.engine.register(timeline, targets);
        self.absorb(writes);
        id
    }

    /// The scroll offset changed
    pub fn on_scroll(&mut self, targets: &mut SceneTargets<'_>) -> usize {
        let writes = self.engine.on_scroll(targets);
        self.absorb(writes)
    }

    /// Let scrub smoothing catch up by `dt` seconds
    pub fn advance(&mut self, dt: f64, targets: &mut SceneTargets<'_>) -> usize {
        let writes = self.engine.advance(dt, targets);
        self.absorb(writes)
    }

    /// Turn hooked writes into update intents. Returns the number of hooked writes.
    fn absorb(&mut self, writes: Vec<TweenWrite>) -> usize {
        let mut hooked = 0;
        for write in writes {
            self.stats.writes += 1;
            if !write.hooked {
                continue;
            }
            let Some(field) = CameraField::of(&write.target) else {
                continue;
            };
            self.dirty.mark(CameraUpdateIntent {
                segment: write.segment,
                field,
            });
            hooked += 1;
        }
        self.stats.hooked_writes += hooked as u64;
        hooked
    }

    pub fn needs_update(&self) -> bool {
        self.dirty.needs_update()
    }

    pub fn dirty(&self) -> &DirtyState {
        &self.dirty
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollEngine {
        &mut self.engine
    }

    pub fn wiring(&self) -> HookWiring {
        self.wiring
    }

    pub fn is_settled(&self) -> bool {
        self.engine.is_settled()
    }

    pub fn stats(&self) -> AnimatorStats {
        self.stats
    }
}

impl FrameListener for ScrollCameraAnimator {
    fn pre_frame(&mut self, ctx: &mut FrameContext<'_>) {
        let Some(intents) = self.dirty.take() else {
            self.stats.idle_frames += 1;
            return;
        };

        ctx.camera.position_updated(true);
        ctx.camera.target_updated(true);
        ctx.renderer.reset_shadows();
        self.stats.updated_frames += 1;

        log::debug!(
            "frame {}: camera updated from {} intent(s), position {}",
            ctx.frame,
            intents.len(),
            ctx.camera.position
        );
    }
}
