//! Tween declarations: what to animate, to which values, under which trigger

use crate::ease::Ease;
use crate::trigger::ScrollTrigger;
use loupe_core::Document;
use std::fmt;
use std::str::FromStr;

/// The object a segment animates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// The active camera's position vector
    CameraPosition,
    /// The active camera's look-at target vector
    CameraTarget,
    /// Style of the first element matching a selector
    Element(String),
}

impl TweenTarget {
    /// True for targets that move the camera
    pub fn is_camera(&self) -> bool {
        matches!(self, TweenTarget::CameraPosition | TweenTarget::CameraTarget)
    }
}

impl fmt::Display for TweenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweenTarget::CameraPosition => write!(f, "camera.position"),
            TweenTarget::CameraTarget => write!(f, "camera.target"),
            TweenTarget::Element(selector) => write!(f, "{}", selector),
        }
    }
}

/// A single animatable float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prop {
    X,
    Y,
    Z,
    XPercent,
    Opacity,
}

impl FromStr for Prop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Prop::X),
            "y" => Ok(Prop::Y),
            "z" => Ok(Prop::Z),
            "x_percent" | "xPercent" | "x-percent" => Ok(Prop::XPercent),
            "opacity" => Ok(Prop::Opacity),
            other => Err(format!("unknown property '{}'", other)),
        }
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Prop::X => "x",
            Prop::Y => "y",
            Prop::Z => "z",
            Prop::XPercent => "x_percent",
            Prop::Opacity => "opacity",
        };
        write!(f, "{}", name)
    }
}

/// Read/write access to everything a tween may animate.
///
/// Implemented by the caller that owns the camera and the document, so the
/// engine never holds references to them between calls.
pub trait TweenTargets {
    /// The page, for resolving trigger elements and the scroll offset
    fn document(&self) -> &Document;

    /// Current value of a property, or `None` when the target doesn't have it
    fn read(&self, target: &TweenTarget, prop: Prop) -> Option<f32>;

    /// Write a property. Returns false when the target doesn't have it.
    fn write(&mut self, target: &TweenTarget, prop: Prop, value: f32) -> bool;
}

/// One scroll-linked tween: animate `target` toward `to` while the scroll
/// position crosses the trigger's range.
#[derive(Debug, Clone)]
pub struct Segment {
    pub target: TweenTarget,
    /// Destination values, applied in order
    pub to: Vec<(Prop, f32)>,
    pub trigger: ScrollTrigger,
    pub ease: Ease,
    /// Report every write of this segment as a hooked update
    pub on_update: bool,
    /// Apply the destination at registration instead of waiting for the
    /// trigger range to be entered
    pub immediate_render: bool,
}

impl Segment {
    pub fn new(target: TweenTarget, to: Vec<(Prop, f32)>, trigger: ScrollTrigger) -> Self {
        Self {
            target,
            to,
            trigger,
            ease: Ease::default(),
            on_update: false,
            immediate_render: false,
        }
    }

    /// Shorthand for vector targets
    pub fn to_xyz(target: TweenTarget, xyz: [f32; 3], trigger: ScrollTrigger) -> Self {
        Self::new(
            target,
            vec![(Prop::X, xyz[0]), (Prop::Y, xyz[1]), (Prop::Z, xyz[2])],
            trigger,
        )
    }

    pub fn with_on_update(mut self, on_update: bool) -> Self {
        self.on_update = on_update;
        self
    }

    pub fn with_immediate_render(mut self, immediate: bool) -> Self {
        self.immediate_render = immediate;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Destination value for one property
    pub fn destination(&self, prop: Prop) -> Option<f32> {
        self.to.iter().find(|(p, _)| *p == prop).map(|(_, v)| *v)
    }
}

/// Ordered list of segments; insertion order is playback order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Timeline {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            segments: Vec::new(),
        }
    }

    /// Append a segment
    pub fn to(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::Scrub;

    #[test]
    fn prop_names() {
        assert_eq!("xPercent".parse::<Prop>(), Ok(Prop::XPercent));
        assert_eq!("opacity".parse::<Prop>(), Ok(Prop::Opacity));
        assert!("w".parse::<Prop>().is_err());
        assert_eq!(Prop::XPercent.to_string(), "x_percent");
    }

    #[test]
    fn timeline_keeps_insertion_order() {
        let trigger = ScrollTrigger::new(".second", "top bottom", "top top", Scrub::Smoothed(2.0))
            .unwrap();
        let tl = Timeline::new("camera")
            .to(Segment::to_xyz(TweenTarget::CameraPosition, [2.02, 0.75, -6.70], trigger.clone()))
            .to(Segment::to_xyz(TweenTarget::CameraTarget, [-1.29, 0.25, -0.27], trigger));

        assert_eq!(tl.len(), 2);
        assert_eq!(tl.segments[0].target, TweenTarget::CameraPosition);
        assert_eq!(tl.segments[1].target, TweenTarget::CameraTarget);
        assert_eq!(tl.segments[0].destination(Prop::Z), Some(-6.70));
        assert!(!tl.segments[0].immediate_render);
        assert!(!tl.segments[0].on_update);
    }

    #[test]
    fn camera_targets() {
        assert!(TweenTarget::CameraPosition.is_camera());
        assert!(TweenTarget::CameraTarget.is_camera());
        assert!(!TweenTarget::Element(".x".into()).is_camera());
    }
}
