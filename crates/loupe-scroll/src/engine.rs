//! Scroll engine: registered timelines, per-segment playback, and writes

use crate::scrub::ScrubState;
use crate::segment::{Segment, Timeline, TweenTarget, TweenTargets};
use crate::trigger::ScrollRange;
use loupe_core::Document;

/// Index of a registered timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(pub usize);

/// A segment within a registered timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId {
    pub timeline: TimelineId,
    pub index: usize,
}

/// Report of one segment writing its target during a scroll or time step.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenWrite {
    pub segment: SegmentId,
    pub target: TweenTarget,
    /// Rendered (pre-ease) progress that produced the write
    pub progress: f32,
    /// The segment was declared with `on_update`
    pub hooked: bool,
}

/// Per-segment playback state
struct ActiveSegment {
    id: SegmentId,
    segment: Segment,
    range: ScrollRange,
    scrub: ScrubState,
    /// Values captured at first render; `None` entries are props the target lacks
    start_values: Option<Vec<Option<f32>>>,
}

/// Drives every registered segment from the document's scroll offset.
///
/// Segments are evaluated in registration order, timeline by timeline, so
/// when two segments write the same property in one step the later one wins.
pub struct ScrollEngine {
    timelines: Vec<String>,
    active: Vec<ActiveSegment>,
    skipped: usize,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self {
            timelines: Vec::new(),
            active: Vec::new(),
            skipped: 0,
        }
    }

    /// Register a timeline.
    ///
    /// Segments whose trigger element is missing are skipped with a warning.
    /// Segments with `immediate_render` apply their destination right away;
    /// the others start from the current scroll position and only write
    /// once their progress moves. Returns the writes made during
    /// registration.
    pub fn register<T: TweenTargets + ?Sized>(
        &mut self,
        timeline: Timeline,
        targets: &mut T,
    ) -> (TimelineId, Vec<TweenWrite>) {
        let timeline_id = TimelineId(self.timelines.len());
        self.timelines.push(timeline.name.clone());

        let mut writes = Vec::new();
        for (index, segment) in timeline.segments.into_iter().enumerate() {
            let id = SegmentId {
                timeline: timeline_id,
                index,
            };

            let range = match segment.trigger.resolve(targets.document()) {
                Ok(range) => range,
                Err(e) => {
                    log::warn!(
                        "Skipping segment {} of timeline '{}' ({}): {}",
                        index,
                        timeline.name,
                        segment.target,
                        e
                    );
                    self.skipped += 1;
                    continue;
                }
            };

            let mut active = ActiveSegment {
                id,
                scrub: ScrubState::new(segment.trigger.scrub, 0.0),
                segment,
                range,
                start_values: None,
            };

            if active.segment.immediate_render {
                writes.extend(Self::render_at(&mut active, targets, 1.0));
            }

            let scroll_y = targets.document().scroll_y();
            if active.scrub.set_target(active.range.progress(scroll_y)) {
                writes.extend(Self::render(&mut active, targets));
            }

            log::debug!(
                "Registered {} -> {} on {} [{:.0}, {:.0}]",
                active.segment.target,
                active.segment.trigger.trigger,
                timeline.name,
                active.range.start,
                active.range.end
            );
            self.active.push(active);
        }

        (timeline_id, writes)
    }

    /// Feed the current scroll offset to every segment.
    pub fn on_scroll<T: TweenTargets + ?Sized>(&mut self, targets: &mut T) -> Vec<TweenWrite> {
        let scroll_y = targets.document().scroll_y();
        let mut writes = Vec::new();
        for active in &mut self.active {
            if active.scrub.set_target(active.range.progress(scroll_y)) {
                writes.extend(Self::render(active, targets));
            }
        }
        writes
    }

    /// Advance scrub smoothing by `dt` seconds.
    pub fn advance<T: TweenTargets + ?Sized>(
        &mut self,
        dt: f64,
        targets: &mut T,
    ) -> Vec<TweenWrite> {
        let mut writes = Vec::new();
        for active in &mut self.active {
            if active.scrub.advance(dt) {
                writes.extend(Self::render(active, targets));
            }
        }
        writes
    }

    /// Re-resolve every trigger range against a changed layout.
    pub fn refresh(&mut self, document: &Document) {
        for active in &mut self.active {
            match active.segment.trigger.resolve(document) {
                Ok(range) => active.range = range,
                Err(e) => log::warn!("Keeping previous range for {}: {}", active.segment.target, e),
            }
        }
    }

    /// True when no segment is still catching up with the scroll position
    pub fn is_settled(&self) -> bool {
        self.active.iter().all(|a| a.scrub.is_settled())
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn timeline_name(&self, id: TimelineId) -> Option<&str> {
        self.timelines.get(id.0).map(String::as_str)
    }

    /// Number of registered (not skipped) segments
    pub fn segment_count(&self) -> usize {
        self.active.len()
    }

    /// Number of segments dropped at registration
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Registered segments with their resolved ranges and rendered progress
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment, ScrollRange, f32)> {
        self.active
            .iter()
            .map(|a| (a.id, &a.segment, a.range, a.scrub.rendered()))
    }

    fn render<T: TweenTargets + ?Sized>(
        active: &mut ActiveSegment,
        targets: &mut T,
    ) -> Option<TweenWrite> {
        let eased = active.segment.ease.apply(active.scrub.rendered());
        Self::render_at(active, targets, eased)
    }

    /// Write the target at eased progress `eased`, capturing start values
    /// on the first render.
    fn render_at<T: TweenTargets + ?Sized>(
        active: &mut ActiveSegment,
        targets: &mut T,
        eased: f32,
    ) -> Option<TweenWrite> {
        let segment = &active.segment;
        let start_values = active.start_values.get_or_insert_with(|| {
            segment
                .to
                .iter()
                .map(|(prop, _)| targets.read(&segment.target, *prop))
                .collect()
        });

        let mut wrote = false;
        for ((prop, to), from) in segment.to.iter().zip(start_values.iter()) {
            let Some(from) = from else {
                continue;
            };
            let value = from + (to - from) * eased;
            wrote |= targets.write(&segment.target, *prop, value);
        }

        if !wrote {
            log::trace!("{} has none of the tweened properties", segment.target);
            return None;
        }

        Some(TweenWrite {
            segment: active.id,
            target: segment.target.clone(),
            progress: active.scrub.rendered(),
            hooked: segment.on_update,
        })
    }
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::Scrub;
    use crate::segment::Prop;
    use crate::trigger::ScrollTrigger;
    use loupe_core::{Element, Rect, Vec3};

    /// Minimal target set: a position vector and the document's elements
    struct Targets {
        doc: Document,
        position: Vec3,
    }

    impl TweenTargets for Targets {
        fn document(&self) -> &Document {
            &self.doc
        }

        fn read(&self, target: &TweenTarget, prop: Prop) -> Option<f32> {
            match (target, prop) {
                (TweenTarget::CameraPosition, Prop::X) => Some(self.position.x),
                (TweenTarget::CameraPosition, Prop::Y) => Some(self.position.y),
                (TweenTarget::CameraPosition, Prop::Z) => Some(self.position.z),
                (TweenTarget::Element(sel), Prop::Opacity) => {
                    self.doc.query(sel).map(|e| e.style.opacity)
                }
                _ => None,
            }
        }

        fn write(&mut self, target: &TweenTarget, prop: Prop, value: f32) -> bool {
            match (target, prop) {
                (TweenTarget::CameraPosition, Prop::X) => self.position.x = value,
                (TweenTarget::CameraPosition, Prop::Y) => self.position.y = value,
                (TweenTarget::CameraPosition, Prop::Z) => self.position.z = value,
                (TweenTarget::Element(sel), Prop::Opacity) => match self.doc.query_mut(sel) {
                    Some(e) => e.style.opacity = value,
                    None => return false,
                },
                _ => return false,
            }
            true
        }
    }

    fn targets() -> Targets {
        let mut doc = Document::new(1280.0, 720.0);
        doc.push(Element::with_class("one", Rect::new(0.0, 720.0)));
        doc.push(Element::with_class("second", Rect::new(720.0, 720.0)));
        doc.push(Element::with_class("third", Rect::new(1440.0, 720.0)));
        Targets {
            doc,
            position: Vec3::new(0.0, 0.0, 5.0),
        }
    }

    fn linked(trigger: &str) -> ScrollTrigger {
        ScrollTrigger::new(trigger, "top bottom", "top top", Scrub::Linked).unwrap()
    }

    fn scroll(engine: &mut ScrollEngine, t: &mut Targets, y: f32) -> Vec<TweenWrite> {
        t.doc.scroll_to(y);
        engine.on_scroll(t)
    }

    #[test]
    fn deferred_segment_waits_for_scroll() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let tl = Timeline::new("camera").to(
            Segment::to_xyz(TweenTarget::CameraPosition, [2.0, 1.0, -5.0], linked(".second"))
                .with_ease(crate::Ease::Linear),
        );
        let (_, writes) = engine.register(tl, &mut t);

        assert!(writes.is_empty());
        assert_eq!(t.position, Vec3::new(0.0, 0.0, 5.0));

        let writes = scroll(&mut engine, &mut t, 360.0);
        assert_eq!(writes.len(), 1);
        assert!(t.position.approx_eq(&Vec3::new(1.0, 0.5, 0.0), 1e-4));
    }

    #[test]
    fn immediate_render_snaps_to_destination() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let tl = Timeline::new("camera").to(
            Segment::to_xyz(TweenTarget::CameraPosition, [2.0, 1.0, -5.0], linked(".second"))
                .with_immediate_render(true),
        );
        let (_, writes) = engine.register(tl, &mut t);

        assert_eq!(writes.len(), 1);
        assert_eq!(t.position, Vec3::new(2.0, 1.0, -5.0));
    }

    #[test]
    fn missing_trigger_is_skipped() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let tl = Timeline::new("camera")
            .to(Segment::to_xyz(TweenTarget::CameraPosition, [1.0; 3], linked(".nowhere")))
            .to(Segment::to_xyz(TweenTarget::CameraPosition, [1.0; 3], linked(".second")));
        engine.register(tl, &mut t);

        assert_eq!(engine.segment_count(), 1);
        assert_eq!(engine.skipped_count(), 1);
    }

    #[test]
    fn start_values_are_captured_lazily() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let tl = Timeline::new("camera")
            .to(
                Segment::to_xyz(TweenTarget::CameraPosition, [2.0, 2.0, 2.0], linked(".second"))
                    .with_ease(crate::Ease::Linear),
            )
            .to(
                Segment::to_xyz(TweenTarget::CameraPosition, [4.0, 4.0, 4.0], linked(".third"))
                    .with_ease(crate::Ease::Linear),
            );
        engine.register(tl, &mut t);

        scroll(&mut engine, &mut t, 720.0);
        assert_eq!(t.position, Vec3::new(2.0, 2.0, 2.0));

        // The second segment starts from where the first one left the camera
        scroll(&mut engine, &mut t, 1080.0);
        assert!(t.position.approx_eq(&Vec3::new(3.0, 3.0, 3.0), 1e-4));
    }

    #[test]
    fn hooked_flag_is_reported() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let tl = Timeline::new("mixed")
            .to(
                Segment::to_xyz(TweenTarget::CameraPosition, [1.0; 3], linked(".second"))
                    .with_on_update(true),
            )
            .to(Segment::new(
                TweenTarget::Element(".one".into()),
                vec![(Prop::Opacity, 0.0)],
                linked(".second"),
            ));
        engine.register(tl, &mut t);

        let writes = scroll(&mut engine, &mut t, 100.0);
        assert_eq!(writes.len(), 2);
        assert!(writes[0].hooked);
        assert!(!writes[1].hooked);
        assert!(t.doc.query(".one").unwrap().style.opacity < 1.0);
    }

    #[test]
    fn smoothed_segment_writes_on_advance() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        let trigger =
            ScrollTrigger::new(".second", "top bottom", "top top", Scrub::Smoothed(2.0)).unwrap();
        let tl = Timeline::new("camera")
            .to(Segment::to_xyz(TweenTarget::CameraPosition, [2.0, 1.0, -5.0], trigger));
        engine.register(tl, &mut t);

        assert!(scroll(&mut engine, &mut t, 720.0).is_empty());
        assert!(!engine.is_settled());

        let writes = engine.advance(0.1, &mut t);
        assert_eq!(writes.len(), 1);

        for _ in 0..30 {
            engine.advance(0.1, &mut t);
        }
        assert!(engine.is_settled());
        assert!(t.position.approx_eq(&Vec3::new(2.0, 1.0, -5.0), 1e-5));
    }

    #[test]
    fn refresh_follows_layout_changes() {
        let mut t = targets();
        let mut engine = ScrollEngine::new();
        engine.register(
            Timeline::new("camera")
                .to(Segment::to_xyz(TweenTarget::CameraPosition, [1.0; 3], linked(".second"))),
            &mut t,
        );

        t.doc.query_mut(".second").unwrap().rect.top = 1000.0;
        engine.refresh(&t.doc);
        let (_, _, range, _) = engine.segments().next().unwrap();
        assert_eq!(range, ScrollRange { start: 280.0, end: 1000.0 });
    }
}
