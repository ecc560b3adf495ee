//! Scroll anchors: where on the trigger element meets where on the viewport
//!
//! An anchor is written as two edges, element first and viewport second:
//! `"top bottom"` fires when the element's top reaches the viewport's
//! bottom, `"top 80%"` when it reaches 80% down the viewport.

use loupe_core::{LoupeError, Rect, Result};
use std::fmt;
use std::str::FromStr;

/// A position along an element or the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the length, measured from the top
    Percent(f32),
    /// Absolute pixels from the top
    Pixels(f32),
}

impl Edge {
    /// Distance from the top of a box of the given length
    pub fn offset(&self, length: f32) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => length * 0.5,
            Edge::Bottom => length,
            Edge::Percent(p) => length * p / 100.0,
            Edge::Pixels(px) => *px,
        }
    }
}

impl FromStr for Edge {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "top" => return Ok(Edge::Top),
            "center" => return Ok(Edge::Center),
            "bottom" => return Ok(Edge::Bottom),
            _ => {}
        }

        let (number, ctor): (&str, fn(f32) -> Edge) = if let Some(n) = s.strip_suffix('%') {
            (n, Edge::Percent)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Edge::Pixels)
        } else {
            (s, Edge::Pixels)
        };

        number
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ctor)
            .ok_or_else(|| LoupeError::InvalidAnchor(format!("unknown edge '{}'", s)))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Center => write!(f, "center"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Percent(p) => write!(f, "{}%", p),
            Edge::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

/// Element edge paired with a viewport edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl Anchor {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two edges line up
    pub fn scroll_offset(&self, rect: &Rect, viewport_height: f32) -> f32 {
        rect.top + self.element.offset(rect.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for Anchor {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [element, viewport] = parts.as_slice() else {
            return Err(LoupeError::InvalidAnchor(format!(
                "'{}' must name an element edge and a viewport edge",
                s
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keywords_and_percent() {
        let a: Anchor = "top bottom".parse().unwrap();
        assert_eq!(a, Anchor::new(Edge::Top, Edge::Bottom));

        let b: Anchor = "top 80%".parse().unwrap();
        assert_eq!(b, Anchor::new(Edge::Top, Edge::Percent(80.0)));

        let c: Anchor = "center 100px".parse().unwrap();
        assert_eq!(c, Anchor::new(Edge::Center, Edge::Pixels(100.0)));
    }

    #[test]
    fn reject_malformed() {
        assert!("top".parse::<Anchor>().is_err());
        assert!("top bottom left".parse::<Anchor>().is_err());
        assert!("middle top".parse::<Anchor>().is_err());
        assert!("top abc%".parse::<Anchor>().is_err());
    }

    #[test]
    fn scroll_offsets_for_section_at_one_viewport() {
        let rect = Rect::new(720.0, 720.0);
        let vh = 720.0;
        let start: Anchor = "top bottom".parse().unwrap();
        let end: Anchor = "top top".parse().unwrap();
        let early_end: Anchor = "top 80%".parse().unwrap();

        assert_eq!(start.scroll_offset(&rect, vh), 0.0);
        assert_eq!(end.scroll_offset(&rect, vh), 720.0);
        assert!((early_end.scroll_offset(&rect, vh) - 144.0).abs() < 1e-3);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let a: Anchor = "bottom 25%".parse().unwrap();
        let again: Anchor = a.to_string().parse().unwrap();
        assert_eq!(a, again);
    }
}
