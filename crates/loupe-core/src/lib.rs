//! Loupe Core - Foundational types for the Loupe showcase
//!
//! This crate provides the types every other Loupe crate depends on:
//! - `Vec3` - Spatial vector shared by the camera and the tweens
//! - `ContentHash` - SHA-256 content hashing for loaded assets
//! - `Document` - The page model: viewport, scroll offset, and elements
//! - Error types and Result alias

mod error;
mod hash;
mod page;
mod types;

pub use error::{LoupeError, Result};
pub use hash::ContentHash;
pub use page::{Document, Element, ElementStyle, Rect};
pub use types::Vec3;
