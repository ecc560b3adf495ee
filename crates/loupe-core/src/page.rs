//! Page model: viewport, scroll offset, and selectable elements
//!
//! Stands in for the browser document the showcase runs in. Elements are
//! laid out in document coordinates (pixels from the top of the page) and
//! are addressed with simple selectors: `.class` or `#id`.

use crate::{LoupeError, Result};
use serde::{Deserialize, Serialize};

/// Vertical placement of an element in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Style fields the tweens are allowed to drive
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Horizontal offset as a percentage of the element's own width
    pub x_percent: f32,
    pub opacity: f32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            x_percent: 0.0,
            opacity: 1.0,
        }
    }
}

/// A page element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub rect: Rect,
    pub style: ElementStyle,
}

impl Element {
    /// An element carrying one class
    pub fn with_class(class: &str, rect: Rect) -> Self {
        Self {
            id: None,
            classes: vec![class.to_string()],
            rect,
            style: ElementStyle::default(),
        }
    }

    /// An element carrying an id
    pub fn with_id(id: &str, rect: Rect) -> Self {
        Self {
            id: Some(id.to_string()),
            classes: Vec::new(),
            rect,
            style: ElementStyle::default(),
        }
    }

    /// Parse a simple selector (`.class`, `#id`) into an element, for page
    /// layouts declared in config files.
    pub fn from_selector(selector: &str, rect: Rect) -> Result<Self> {
        if let Some(class) = selector.strip_prefix('.') {
            if !class.is_empty() {
                return Ok(Self::with_class(class, rect));
            }
        }
        if let Some(id) = selector.strip_prefix('#') {
            if !id.is_empty() {
                return Ok(Self::with_id(id, rect));
            }
        }
        Err(LoupeError::ElementNotFound(format!(
            "unsupported selector '{}' (expected .class or #id)",
            selector
        )))
    }

    /// Match against a simple selector. Anything other than `.class` or
    /// `#id` never matches.
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else {
            false
        }
    }
}

/// The page: a viewport scrolled over a column of elements
#[derive(Clone, Debug)]
pub struct Document {
    viewport_width: f32,
    viewport_height: f32,
    scroll_y: f32,
    elements: Vec<Element>,
}

impl Document {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Current scroll offset in pixels from the top of the page
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Height of the laid-out content (bottom of the lowest element)
    pub fn content_height(&self) -> f32 {
        self.elements
            .iter()
            .map(|e| e.rect.bottom())
            .fold(self.viewport_height, f32::max)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Scroll to `y`, clamped to the scrollable range. Returns the applied offset.
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        self.scroll_y
    }

    /// First element matching `selector`
    pub fn query(&self, selector: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.matches(selector))
    }

    pub fn query_mut(&mut self, selector: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.matches(selector))
    }

    /// Look up an element by id, failing when it is absent
    pub fn get_element_by_id(&self, id: &str) -> Result<&Element> {
        self.elements
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| LoupeError::ElementNotFound(format!("#{}", id)))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Document {
        let mut doc = Document::new(1280.0, 720.0);
        doc.push(Element::with_id("webgi-canvas", Rect::new(0.0, 720.0)));
        doc.push(Element::with_class("second", Rect::new(720.0, 720.0)));
        doc.push(Element::with_class("third", Rect::new(1440.0, 720.0)));
        doc
    }

    #[test]
    fn test_query_by_class_and_id() {
        let doc = page();
        assert_eq!(doc.query(".second").map(|e| e.rect.top), Some(720.0));
        assert!(doc.query("#webgi-canvas").is_some());
        assert!(doc.query(".missing").is_none());
        assert!(doc.query("second").is_none());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = page();
        assert_eq!(doc.max_scroll(), 1440.0);
        assert_eq!(doc.scroll_to(-10.0), 0.0);
        assert_eq!(doc.scroll_to(5000.0), 1440.0);
        assert_eq!(doc.scroll_to(300.0), 300.0);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let doc = page();
        assert!(doc.get_element_by_id("webgi-canvas").is_ok());
        assert!(matches!(
            doc.get_element_by_id("nope"),
            Err(LoupeError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_from_selector() {
        let e = Element::from_selector(".section--one--container", Rect::new(0.0, 10.0)).unwrap();
        assert!(e.matches(".section--one--container"));
        assert!(Element::from_selector("div", Rect::default()).is_err());
        assert!(Element::from_selector(".", Rect::default()).is_err());
    }
}
