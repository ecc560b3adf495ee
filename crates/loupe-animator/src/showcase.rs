//! The assembled showcase: page, viewer and scroll-camera animator

use crate::animator::{AnimatorStats, HookWiring, ScrollCameraAnimator};
use crate::clock::FrameClock;
use crate::config::ShowcaseConfig;
use crate::keyframes;
use crate::targets::SceneTargets;
use loupe_core::{Document, Result};
use loupe_scroll::Timeline;
use loupe_viewer::plugins::CameraPose;
use loupe_viewer::{setup_viewer, Camera, FrameStats, ViewerApp};

pub struct Showcase {
    document: Document,
    viewer: ViewerApp,
    animator: ScrollCameraAnimator,
    clock: FrameClock,
}

impl Showcase {
    /// Lay out the page, bootstrap the viewer and register the keyframes
    pub fn new(config: &ShowcaseConfig) -> Result<Self> {
        let document = config.page.build_document()?;
        let viewer = setup_viewer(&config.viewer.bootstrap_options()?, &document)?;
        let timelines = keyframes::build_timelines(&config.animation)?;
        Ok(Self::from_parts(
            document,
            viewer,
            config.animation.hook_wiring,
            timelines,
        ))
    }

    /// Assemble from an already bootstrapped viewer
    pub fn from_parts(
        mut document: Document,
        mut viewer: ViewerApp,
        wiring: HookWiring,
        timelines: Vec<Timeline>,
    ) -> Self {
        log_events(&mut viewer);

        let mut animator = ScrollCameraAnimator::new(wiring);
        for timeline in timelines {
            let mut targets = SceneTargets::new(viewer.camera_mut(), &mut document);
            animator.register(timeline, &mut targets);
        }
        log::info!(
            "Showcase ready: {} timelines, {} segments ({} skipped), wiring {}",
            animator.engine().timeline_count(),
            animator.engine().segment_count(),
            animator.engine().skipped_count(),
            wiring
        );
        Self {
            document,
            viewer,
            animator,
            clock: FrameClock::new(),
        }
    }

    /// Scroll the page. Returns the applied (clamped) offset.
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        let applied = self.document.scroll_to(y);
        let mut targets = SceneTargets::new(self.viewer.camera_mut(), &mut self.document);
        self.animator.on_scroll(&mut targets);
        applied
    }

    pub fn scroll_by(&mut self, dy: f32) -> f32 {
        self.scroll_to(self.document.scroll_y() + dy)
    }

    /// Advance scrub smoothing by `dt` seconds. Returns the hooked writes.
    pub fn advance(&mut self, dt: f64) -> usize {
        let mut targets = SceneTargets::new(self.viewer.camera_mut(), &mut self.document);
        self.animator.advance(dt, &mut targets)
    }

    /// Run one frame boundary and render
    pub fn frame(&mut self) -> FrameStats {
        let stats = self.viewer.render_frame(&mut [&mut self.animator]);
        log_events(&mut self.viewer);
        stats
    }

    /// Account for `elapsed` seconds of wall time in fixed scrub steps,
    /// then render one frame.
    pub fn tick(&mut self, elapsed: f64) -> FrameStats {
        self.clock.tick(elapsed);
        while self.clock.should_step() {
            let step = self.clock.fixed_timestep;
            self.advance(step);
            self.clock.consume_step();
        }
        self.frame()
    }

    /// Tick at `fps` until every scrub has caught up or `max_seconds` passed.
    /// Returns the number of frames rendered.
    pub fn settle(&mut self, fps: f64, max_seconds: f64) -> usize {
        let dt = 1.0 / fps.max(1.0);
        let max_frames = (max_seconds / dt).ceil() as usize;
        let mut frames = 0;
        while frames < max_frames && !self.animator.is_settled() {
            self.tick(dt);
            frames += 1;
        }
        // One more frame delivers the final write's notification
        if self.animator.needs_update() {
            self.tick(dt);
            frames += 1;
        }
        frames
    }

    pub fn pose(&self) -> CameraPose {
        let camera = self.viewer.camera();
        CameraPose {
            position: camera.position,
            target: camera.target,
            fov: camera.fov,
        }
    }

    pub fn camera(&self) -> &Camera {
        self.viewer.camera()
    }

    pub fn scroll_y(&self) -> f32 {
        self.document.scroll_y()
    }

    pub fn max_scroll(&self) -> f32 {
        self.document.max_scroll()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewer(&self) -> &ViewerApp {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ViewerApp {
        &mut self.viewer
    }

    pub fn animator(&self) -> &ScrollCameraAnimator {
        &self.animator
    }

    pub fn stats(&self) -> AnimatorStats {
        self.animator.stats()
    }
}

fn log_events(viewer: &mut ViewerApp) {
    for event in viewer.events().drain() {
        log::debug!("viewer: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_core::Vec3;
    use loupe_scroll::{Scrub, ScrollTrigger, Segment, TweenTarget};
    use loupe_viewer::{PluginKind, SettingValue};
    use std::path::PathBuf;

    const FPS: f64 = 60.0;
    const DT: f64 = 1.0 / FPS;

    fn asset(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("loupe_showcase_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, r#"{"asset":{"version":"2.0"}}"#).unwrap();
        path
    }

    fn config(name: &str) -> ShowcaseConfig {
        let mut config = ShowcaseConfig::default();
        config.viewer.asset = asset(name);
        config
    }

    fn between(value: f32, a: f32, b: f32) -> bool {
        value >= a.min(b) - 1e-4 && value <= a.max(b) + 1e-4
    }

    /// Scroll from the current offset to `to` in 30px steps, one frame per
    /// step, then let the scrubs settle. Returns the camera position of
    /// every frame.
    fn scroll_and_settle(showcase: &mut Showcase, to: f32) -> Vec<Vec3> {
        let mut path = Vec::new();
        while showcase.scroll_y() < to {
            let next = (showcase.scroll_y() + 30.0).min(to);
            showcase.scroll_to(next);
            showcase.tick(DT);
            path.push(showcase.camera().position);
        }
        // Longer than the 2 s scrub
        for _ in 0..(2.5 * FPS) as usize {
            showcase.tick(DT);
            path.push(showcase.camera().position);
        }
        path
    }

    fn assert_monotonic(path: &[Vec3], from: Vec3, to: Vec3) {
        let mut previous = from;
        for p in path {
            for (axis, (a, b)) in [(p.x, previous.x), (p.y, previous.y), (p.z, previous.z)]
                .into_iter()
                .enumerate()
            {
                let (start, end) = (from.to_array()[axis], to.to_array()[axis]);
                assert!(between(a, start, end), "axis {} left [{}, {}]: {}", axis, start, end, a);
                let forward = (end - start).signum();
                assert!((a - b) * forward >= -1e-5, "axis {} moved backwards: {} -> {}", axis, b, a);
            }
            assert!(p.distance(&previous) < 1.0, "jump from {} to {}", previous, p);
            previous = *p;
        }
    }

    #[test]
    fn scrolling_moves_the_camera_through_both_zones() {
        let mut showcase = Showcase::new(&config("zones.gltf")).unwrap();
        assert_eq!(showcase.max_scroll(), 1440.0);
        let start = showcase.camera().position;

        // Nothing snaps at load
        showcase.tick(DT);
        assert_eq!(showcase.camera().position, start);

        let second = Vec3::new(2.02, 0.75, -6.70);
        let path = scroll_and_settle(&mut showcase, 720.0);
        assert_monotonic(&path, start, second);
        assert!(showcase.camera().position.approx_eq(&second, 1e-4));

        let third = Vec3::new(2.90, 0.13, 3.12);
        let path = scroll_and_settle(&mut showcase, 1440.0);
        assert_monotonic(&path, second, third);
        assert!(showcase.camera().position.approx_eq(&third, 1e-4));
        assert!(showcase
            .camera()
            .target
            .approx_eq(&Vec3::new(-1.39, 0.10, -0.14), 1e-4));

        let section = showcase.document().query(".section--one--container").unwrap();
        assert_eq!(section.style.opacity, 0.0);
        assert_eq!(section.style.x_percent, -150.0);
    }

    #[test]
    fn continuous_scroll_crosses_the_zone_boundary_without_a_jump() {
        let mut showcase = Showcase::new(&config("straight.gltf")).unwrap();
        showcase.tick(DT);
        let start = showcase.camera().position;
        let third = Vec3::new(2.90, 0.13, 3.12);

        // 10px per frame, no pause at 720 while the first zone still catches up
        let mut previous = start;
        let mut max_step = 0.0f32;
        let mut frames = 0;
        while showcase.scroll_y() < 1440.0 || !showcase.animator().is_settled() {
            if showcase.scroll_y() < 1440.0 {
                showcase.scroll_by(10.0);
            }
            showcase.tick(DT);
            let p = showcase.camera().position;
            assert!(
                p.x >= previous.x - 1e-5,
                "x moved backwards at scroll {}: {} -> {}",
                showcase.scroll_y(),
                previous.x,
                p.x
            );
            max_step = max_step.max(p.distance(&previous));
            previous = p;
            frames += 1;
            assert!(frames < 60 * 10, "scrubs never settled");
        }
        showcase.settle(FPS, 3.0);

        assert!(max_step < 0.5, "largest per-frame step {}", max_step);
        assert!(showcase.camera().position.approx_eq(&third, 1e-4));
    }

    #[test]
    fn frames_drain_viewer_events() {
        let mut showcase = Showcase::new(&config("events.gltf")).unwrap();
        assert!(showcase.viewer_mut().events().is_empty());

        showcase
            .viewer_mut()
            .set_plugin_setting(PluginKind::Tonemap, "exposure", SettingValue::Float(1.5))
            .unwrap();
        showcase.viewer_mut().snapshot().unwrap();
        assert!(!showcase.viewer_mut().events().is_empty());

        showcase.frame();
        assert!(showcase.viewer_mut().events().is_empty());
    }

    #[test]
    fn many_scrolls_between_frames_cost_one_update() {
        let mut showcase = Showcase::new(&config("coalesce.gltf")).unwrap();
        showcase.frame();
        let notifications = showcase.camera().position_notifications();
        let resets = showcase.viewer().renderer().shadow_reset_requests();

        for y in [40.0, 80.0, 120.0, 160.0] {
            showcase.scroll_to(y);
            showcase.advance(0.1);
        }
        assert!(showcase.animator().needs_update());
        let stats = showcase.frame();

        assert!(stats.camera_changed);
        assert!(stats.shadows_recomputed);
        assert_eq!(showcase.camera().position_notifications(), notifications + 1);
        assert_eq!(showcase.camera().target_notifications(), notifications + 1);
        assert_eq!(showcase.viewer().renderer().shadow_reset_requests(), resets + 1);

        // Idle afterwards: accumulation resumes
        let stats = showcase.frame();
        assert!(!stats.camera_changed);
        assert_eq!(stats.samples, 2);
    }

    #[test]
    fn immediate_render_shows_destination_before_scrolling() {
        let mut document = config("immediate.gltf").page.build_document().unwrap();
        let opts = config("immediate.gltf").viewer.bootstrap_options().unwrap();
        let viewer = setup_viewer(&opts, &document).unwrap();
        document.scroll_to(0.0);

        let trigger =
            ScrollTrigger::new(".second", "top bottom", "top top", Scrub::Smoothed(2.0)).unwrap();
        let snapping = Timeline::new("camera").to(
            Segment::to_xyz(TweenTarget::CameraPosition, [2.02, 0.75, -6.70], trigger.clone())
                .with_immediate_render(true),
        );
        let showcase = Showcase::from_parts(document.clone(), viewer, HookWiring::default(), vec![snapping]);
        assert!(showcase
            .camera()
            .position
            .approx_eq(&Vec3::new(2.02, 0.75, -6.70), 1e-5));

        let viewer = setup_viewer(&opts, &document).unwrap();
        let deferred = Timeline::new("camera").to(Segment::to_xyz(
            TweenTarget::CameraPosition,
            [2.02, 0.75, -6.70],
            trigger,
        ));
        let showcase = Showcase::from_parts(document, viewer, HookWiring::default(), vec![deferred]);
        assert_eq!(showcase.camera().position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn missing_trigger_is_skipped() {
        let mut config = config("skipped.gltf");
        config.page.sections.retain(|s| s.selector != ".third");
        let mut showcase = Showcase::new(&config).unwrap();
        assert_eq!(showcase.animator().engine().skipped_count(), 2);
        assert_eq!(showcase.animator().engine().segment_count(), 3);

        showcase.scroll_to(720.0);
        showcase.settle(FPS, 3.0);
        assert!(showcase
            .camera()
            .position
            .approx_eq(&Vec3::new(2.02, 0.75, -6.70), 1e-4));
    }

    #[test]
    fn position_only_wiring_still_notifies_through_position_writes() {
        let mut config = config("parity.gltf");
        config.animation.hook_wiring = HookWiring::PositionOnly;
        let mut showcase = Showcase::new(&config).unwrap();
        showcase.frame();

        showcase.scroll_to(360.0);
        showcase.settle(FPS, 3.0);
        let stats = showcase.stats();
        assert!(stats.hooked_writes > 0);
        assert!(stats.hooked_writes < stats.writes);
        assert!(!showcase.animator().needs_update());

        let target = showcase.camera().target;
        assert!(target.x < 0.0);
        assert!(showcase.document().query(".section--one--container").unwrap().style.x_percent < 0.0);
    }
}
