//! Trigger zones: a selector plus start/end anchors, resolved to scroll offsets

use crate::anchor::Anchor;
use crate::scrub::Scrub;
use loupe_core::{Document, LoupeError, Result};

/// Declares which element drives a tween and how
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    /// Selector of the trigger element (`.second`)
    pub trigger: String,
    pub start: Anchor,
    pub end: Anchor,
    pub scrub: Scrub,
}

impl ScrollTrigger {
    /// Build a trigger from anchor strings, e.g. `("top bottom", "top top")`
    pub fn new(trigger: &str, start: &str, end: &str, scrub: Scrub) -> Result<Self> {
        Ok(Self {
            trigger: trigger.to_string(),
            start: start.parse()?,
            end: end.parse()?,
            scrub,
        })
    }

    /// Resolve against the current layout
    pub fn resolve(&self, document: &Document) -> Result<ScrollRange> {
        let element = document
            .query(&self.trigger)
            .ok_or_else(|| LoupeError::ElementNotFound(self.trigger.clone()))?;
        let vh = document.viewport_height();
        Ok(ScrollRange {
            start: self.start.scroll_offset(&element.rect, vh),
            end: self.end.scroll_offset(&element.rect, vh),
        })
    }
}

/// Scroll offsets at which a trigger starts and ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    /// Progress of `scroll_y` through the range, clamped to [0, 1].
    ///
    /// A zero-length range acts as a step at `start`.
    pub fn progress(&self, scroll_y: f32) -> f32 {
        let span = self.end - self.start;
        if span.abs() <= f32::EPSILON {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn contains(&self, scroll_y: f32) -> bool {
        scroll_y >= self.start.min(self.end) && scroll_y <= self.start.max(self.end)
    }
}
