//! Renderer collaborator: pass pipeline, shadow scheduling, accumulation
//!
//! The real GPU work lives outside Loupe. This type keeps the state the
//! showcase observes: which passes run, when shadow maps are recomputed,
//! and how many progressive samples have accumulated since the camera
//! last moved.

use crate::camera::Camera;
use crate::plugin::PluginKind;
use serde::Serialize;

/// One render pass contributed to the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassDesc {
    pub name: &'static str,
    /// Position in the pipeline; lower runs first
    pub order: u16,
    /// Contributing plugin, `None` for built-in passes
    pub source: Option<PluginKind>,
}

impl PassDesc {
    pub const fn new(name: &'static str, order: u16, source: PluginKind) -> Self {
        Self {
            name,
            order,
            source: Some(source),
        }
    }

    const fn builtin(name: &'static str, order: u16) -> Self {
        Self {
            name,
            order,
            source: None,
        }
    }
}

/// What happened during one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub frame: u64,
    pub passes: usize,
    /// The camera had a notified change this frame
    pub camera_changed: bool,
    /// Shadow maps were recomputed this frame
    pub shadows_recomputed: bool,
    /// Progressive samples accumulated so far
    pub samples: u32,
}

pub struct Renderer {
    passes: Vec<PassDesc>,
    stale: bool,
    refresh_count: u32,
    frame: u64,
    shadow_reset_pending: bool,
    shadow_reset_requests: u64,
    shadow_recomputes: u64,
    max_samples: u32,
    samples: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            passes: vec![PassDesc::builtin("scene", 30), PassDesc::builtin("screen", 100)],
            stale: false,
            refresh_count: 0,
            frame: 0,
            shadow_reset_pending: true,
            shadow_reset_requests: 0,
            shadow_recomputes: 0,
            max_samples: 1,
            samples: 0,
        }
    }

    /// Rebuild the pass list from the given contributions plus built-ins.
    pub fn refresh_pipeline(&mut self, contributed: Vec<PassDesc>) {
        let mut passes = vec![PassDesc::builtin("scene", 30), PassDesc::builtin("screen", 100)];
        passes.extend(contributed);
        passes.sort_by_key(|p| p.order);
        self.passes = passes;
        self.stale = false;
        self.refresh_count += 1;
        log::info!(
            "Pipeline refreshed: {}",
            self.passes.iter().map(|p| p.name).collect::<Vec<_>>().join(" -> ")
        );
    }

    /// Flag the pipeline as out of date (a plugin was added or reconfigured)
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn passes(&self) -> &[PassDesc] {
        &self.passes
    }

    pub fn refresh_count(&self) -> u32 {
        self.refresh_count
    }

    /// Schedule shadow maps for recomputation on the next frame.
    ///
    /// Requests coalesce: any number of calls between two frames costs one
    /// recomputation.
    pub fn reset_shadows(&mut self) {
        self.shadow_reset_requests += 1;
        self.shadow_reset_pending = true;
    }

    pub fn shadow_reset_pending(&self) -> bool {
        self.shadow_reset_pending
    }

    /// Total `reset_shadows` calls
    pub fn shadow_reset_requests(&self) -> u64 {
        self.shadow_reset_requests
    }

    /// Total frames on which shadow maps were recomputed
    pub fn shadow_recomputes(&self) -> u64 {
        self.shadow_recomputes
    }

    /// Configure progressive accumulation
    pub fn set_max_samples(&mut self, max_samples: u32) {
        self.max_samples = max_samples.max(1);
        self.samples = self.samples.min(self.max_samples);
    }

    pub fn max_samples(&self) -> u32 {
        self.max_samples
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Accumulation has reached its sample budget
    pub fn is_converged(&self) -> bool {
        self.samples >= self.max_samples
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render one frame for `camera`.
    pub fn render(&mut self, camera: &mut Camera) -> FrameStats {
        if self.stale {
            log::warn!("Rendering with a stale pipeline; call refresh_pipeline after adding plugins");
        }

        self.frame += 1;

        let camera_changed = camera.take_change();
        if camera_changed {
            self.samples = 0;
        }

        let shadows_recomputed = std::mem::take(&mut self.shadow_reset_pending);
        if shadows_recomputed {
            self.shadow_recomputes += 1;
        }

        self.samples = (self.samples + 1).min(self.max_samples);

        log::trace!(
            "frame {} camera_changed={} shadows={} samples={}/{}",
            self.frame,
            camera_changed,
            shadows_recomputed,
            self.samples,
            self.max_samples
        );

        FrameStats {
            frame: self.frame,
            passes: self.passes.len(),
            camera_changed,
            shadows_recomputed,
            samples: self.samples,
        }
    }
}
