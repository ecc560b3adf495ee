//! Showcase keyframes and their conversion into scroll timelines

use crate::config::{AnimationConfig, SegmentConfig};
use loupe_core::{LoupeError, Result};
use loupe_scroll::{Ease, Prop, Scrub, ScrollTrigger, Segment, Timeline, TweenTarget};
use std::collections::BTreeMap;

pub const CAMERA_TIMELINE: &str = "camera";

/// The five segments of the watch showcase, in declaration order
pub fn showcase_segments() -> Vec<SegmentConfig> {
    let camera = |target: &str, xyz: [f32; 3], trigger: &str| SegmentConfig {
        target: target.into(),
        to: BTreeMap::from([
            ("x".to_string(), xyz[0]),
            ("y".to_string(), xyz[1]),
            ("z".to_string(), xyz[2]),
        ]),
        trigger: trigger.into(),
        start: "top bottom".into(),
        end: "top top".into(),
        scrub: Scrub::Smoothed(2.0),
        ease: Ease::default(),
        immediate_render: false,
        timeline: None,
    };

    vec![
        camera("camera-position", [2.02, 0.75, -6.70], ".second"),
        SegmentConfig {
            target: ".section--one--container".into(),
            to: BTreeMap::from([("x_percent".to_string(), -150.0), ("opacity".to_string(), 0.0)]),
            trigger: ".second".into(),
            start: "top bottom".into(),
            end: "top 80%".into(),
            scrub: Scrub::Smoothed(1.0),
            ease: Ease::default(),
            immediate_render: false,
            timeline: None,
        },
        camera("camera-target", [-1.29, 0.25, -0.27], ".second"),
        camera("camera-position", [2.90, 0.13, 3.12], ".third"),
        camera("camera-target", [-1.39, 0.10, -0.14], ".third"),
    ]
}

/// Parse a segment target name
pub fn parse_target(name: &str) -> Result<TweenTarget> {
    match name {
        "camera-position" | "position" => Ok(TweenTarget::CameraPosition),
        "camera-target" | "target" => Ok(TweenTarget::CameraTarget),
        selector if selector.len() > 1 && (selector.starts_with('.') || selector.starts_with('#')) => {
            Ok(TweenTarget::Element(selector.to_string()))
        }
        other => Err(LoupeError::ConfigError(format!(
            "unknown segment target '{}' (expected camera-position, camera-target or a selector)",
            other
        ))),
    }
}

fn build_segment(config: &SegmentConfig) -> Result<Segment> {
    let target = parse_target(&config.target)?;
    let trigger = ScrollTrigger::new(&config.trigger, &config.start, &config.end, config.scrub)?;
    let to = config
        .to
        .iter()
        .map(|(name, value)| {
            name.parse::<Prop>()
                .map(|prop| (prop, *value))
                .map_err(LoupeError::AnimationError)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Segment::new(target, to, trigger)
        .with_ease(config.ease)
        .with_immediate_render(config.immediate_render))
}

/// Group segments into timelines, keeping first-appearance order for both
/// timelines and the segments within them.
pub fn build_timelines(config: &AnimationConfig) -> Result<Vec<Timeline>> {
    let mut timelines: Vec<Timeline> = Vec::new();
    for segment_config in &config.segments {
        let segment = build_segment(segment_config)?;
        let name = match &segment_config.timeline {
            Some(name) => name.clone(),
            None if segment.target.is_camera() => CAMERA_TIMELINE.to_string(),
            None => segment.target.to_string(),
        };

        match timelines.iter_mut().find(|t| t.name == name) {
            Some(timeline) => timeline.segments.push(segment),
            None => timelines.push(Timeline::new(&name).to(segment)),
        }
    }
    Ok(timelines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_splits_into_camera_and_section_timelines() {
        let timelines = build_timelines(&AnimationConfig::default()).unwrap();
        assert_eq!(timelines.len(), 2);
        assert_eq!(timelines[0].name, "camera");
        assert_eq!(timelines[0].len(), 4);
        assert_eq!(timelines[1].name, ".section--one--container");

        let first = &timelines[0].segments[0];
        assert_eq!(first.target, TweenTarget::CameraPosition);
        assert_eq!(first.destination(Prop::Z), Some(-6.70));
        assert_eq!(first.trigger.scrub, Scrub::Smoothed(2.0));
        assert!(!first.immediate_render);

        let fourth = &timelines[0].segments[2];
        assert_eq!(fourth.trigger.trigger, ".third");
        assert_eq!(fourth.destination(Prop::X), Some(2.90));
    }

    #[test]
    fn explicit_timeline_names_group_segments() {
        let mut config = AnimationConfig::default();
        for segment in &mut config.segments {
            segment.timeline = Some("all".into());
        }
        let timelines = build_timelines(&config).unwrap();
        assert_eq!(timelines.len(), 1);
        assert_eq!(timelines[0].len(), 5);
    }

    #[test]
    fn targets_parse() {
        assert_eq!(parse_target("position").unwrap(), TweenTarget::CameraPosition);
        assert_eq!(
            parse_target("#hero").unwrap(),
            TweenTarget::Element("#hero".into())
        );
        assert!(parse_target("camera.fov").is_err());
        assert!(parse_target(".").is_err());
    }
}
