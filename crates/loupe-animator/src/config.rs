//! Showcase configuration
//!
//! Loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `LOUPE_ASSET`, `LOUPE_USE_RGBM`, `LOUPE_HOOK_WIRING`
//! 2. A showcase file (`showcase.toml`)
//! 3. Built-in defaults, which reproduce the vintage watch showcase

use crate::animator::HookWiring;
use crate::keyframes;
use loupe_core::{Document, Element, LoupeError, Rect, Result};
use loupe_scroll::{Anchor, Ease, Prop, Scrub};
use loupe_viewer::{BootstrapOptions, PluginKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// `[viewer]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas: String,
    pub use_rgbm: bool,
    pub asset: PathBuf,
    pub progressive_frames: u32,
    /// Plugin names whose settings the inspector shows
    pub inspect: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let defaults = BootstrapOptions::default();
        Self {
            canvas: defaults.canvas,
            use_rgbm: defaults.use_rgbm,
            asset: defaults.asset,
            progressive_frames: defaults.progressive_frames,
            inspect: defaults.inspect.iter().map(|k| k.name().to_string()).collect(),
        }
    }
}

impl ViewerConfig {
    pub fn bootstrap_options(&self) -> Result<BootstrapOptions> {
        Ok(BootstrapOptions {
            canvas: self.canvas.clone(),
            use_rgbm: self.use_rgbm,
            asset: self.asset.clone(),
            progressive_frames: self.progressive_frames,
            inspect: self
                .inspect
                .iter()
                .map(|name| name.parse::<PluginKind>())
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

/// One laid-out element of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub selector: String,
    pub top: f32,
    pub height: f32,
}

/// `[page]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Viewport width and height in pixels
    pub viewport: [f32; 2],
    pub sections: Vec<SectionConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        let section = |selector: &str, top: f32| SectionConfig {
            selector: selector.into(),
            top,
            height: 720.0,
        };
        Self {
            viewport: [1280.0, 720.0],
            sections: vec![
                section("#webgi-canvas", 0.0),
                section(".section--one--container", 0.0),
                section(".second", 720.0),
                section(".third", 1440.0),
            ],
        }
    }
}

impl PageConfig {
    /// Lay out the page
    pub fn build_document(&self) -> Result<Document> {
        let mut document = Document::new(self.viewport[0], self.viewport[1]);
        for section in &self.sections {
            document.push(Element::from_selector(
                &section.selector,
                Rect::new(section.top, section.height),
            )?);
        }
        Ok(document)
    }
}

/// One `[[animation.segments]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// `camera-position`, `camera-target`, or an element selector
    pub target: String,
    /// Destination values by property name
    pub to: BTreeMap<String, f32>,
    pub trigger: String,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default)]
    pub scrub: Scrub,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub immediate_render: bool,
    /// Timeline to append to; defaults to `camera` for camera targets and
    /// the selector for element targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

fn default_start() -> String {
    "top bottom".into()
}

fn default_end() -> String {
    "top top".into()
}

/// `[animation]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub hook_wiring: HookWiring,
    pub segments: Vec<SegmentConfig>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hook_wiring: HookWiring::default(),
            segments: keyframes::showcase_segments(),
        }
    }
}

/// The whole showcase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub viewer: ViewerConfig,
    pub page: PageConfig,
    pub animation: AnimationConfig,
}

impl ShowcaseConfig {
    /// Load with layered precedence: defaults < file < env vars
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| {
            LoupeError::ConfigError(format!("Failed to load {}: {}", path.display(), e))
        })
    }

    /// Parse a showcase file without applying overrides
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`ShowcaseConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(asset) = lookup("LOUPE_ASSET") {
            self.viewer.asset = PathBuf::from(asset);
        }
        if let Some(flag) = lookup("LOUPE_USE_RGBM") {
            self.viewer.use_rgbm = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(LoupeError::ConfigError(format!(
                        "LOUPE_USE_RGBM must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(wiring) = lookup("LOUPE_HOOK_WIRING") {
            self.animation.hook_wiring = wiring.trim().parse()?;
        }
        Ok(())
    }

    /// Check everything that would otherwise fail halfway through setup
    pub fn validate(&self) -> Result<()> {
        let [width, height] = self.page.viewport;
        if width <= 0.0 || height <= 0.0 {
            return Err(LoupeError::ConfigError(format!(
                "viewport must be positive, got {}x{}",
                width, height
            )));
        }
        if self.viewer.progressive_frames == 0 {
            return Err(LoupeError::ConfigError(
                "progressive_frames must be at least 1".into(),
            ));
        }
        self.viewer.bootstrap_options()?;

        if self.animation.segments.is_empty() {
            return Err(LoupeError::ConfigError(
                "animation needs at least one segment".into(),
            ));
        }

        for (i, segment) in self.animation.segments.iter().enumerate() {
            segment.start.parse::<Anchor>()?;
            segment.end.parse::<Anchor>()?;

            if let Scrub::Smoothed(seconds) = segment.scrub {
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(LoupeError::ConfigError(format!(
                        "segment {}: scrub must be a non-negative number",
                        i
                    )));
                }
            }

            let target = keyframes::parse_target(&segment.target)?;
            if segment.to.is_empty() {
                return Err(LoupeError::ConfigError(format!(
                    "segment {} ({}) has no destination values",
                    i, segment.target
                )));
            }
            for (name, value) in &segment.to {
                let prop: Prop = name
                    .parse()
                    .map_err(|e| LoupeError::ConfigError(format!("segment {}: {}", i, e)))?;
                if target.is_camera() != matches!(prop, Prop::X | Prop::Y | Prop::Z) {
                    return Err(LoupeError::ConfigError(format!(
                        "segment {}: {} cannot animate '{}'",
                        i, segment.target, prop
                    )));
                }
                if prop == Prop::Opacity && !(0.0..=1.0).contains(value) {
                    return Err(LoupeError::ValueOutOfRange {
                        field: format!("animation.segments[{}].to.opacity", i),
                        min: 0.0,
                        max: 1.0,
                        value: f64::from(*value),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_showcase() {
        let config = ShowcaseConfig::default();
        config.validate().unwrap();
        assert_eq!(config.viewer.canvas, "webgi-canvas");
        assert_eq!(config.viewer.progressive_frames, 32);
        assert_eq!(config.animation.segments.len(), 5);
        assert_eq!(config.animation.hook_wiring, HookWiring::AllCameraFields);

        let doc = config.page.build_document().unwrap();
        assert_eq!(doc.max_scroll(), 1440.0);
        assert!(doc.get_element_by_id("webgi-canvas").is_ok());
    }

    #[test]
    fn partial_file_keeps_default_sections() {
        let config = ShowcaseConfig::from_toml(
            r#"
[viewer]
use_rgbm = true
asset = "models/other.glb"

[animation]
hook_wiring = "position-only"
"#,
        )
        .unwrap();
        assert!(config.viewer.use_rgbm);
        assert_eq!(config.viewer.asset, PathBuf::from("models/other.glb"));
        assert_eq!(config.viewer.canvas, "webgi-canvas");
        assert_eq!(config.animation.hook_wiring, HookWiring::PositionOnly);
        assert_eq!(config.animation.segments.len(), 5);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn segments_parse_from_toml() {
        let config = ShowcaseConfig::from_toml(
            r#"
[[animation.segments]]
target = "camera-position"
to = { x = 1.0, y = 2.0, z = 3.0 }
trigger = ".second"
scrub = 2

[[animation.segments]]
target = ".section--one--container"
to = { x_percent = -150.0, opacity = 0.0 }
trigger = ".second"
end = "top 80%"
scrub = true
ease = "none"
"#,
        )
        .unwrap();
        config.validate().unwrap();

        let segments = &config.animation.segments;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, "top bottom");
        assert_eq!(segments[0].scrub, Scrub::Smoothed(2.0));
        assert_eq!(segments[1].scrub, Scrub::Linked);
        assert_eq!(segments[1].ease, Ease::Linear);
        assert_eq!(segments[1].to["x_percent"], -150.0);
    }

    #[test]
    fn validation_rejects_bad_segments() {
        let mut config = ShowcaseConfig::default();
        config.animation.segments.clear();
        assert!(config.validate().is_err());

        let mut config = ShowcaseConfig::default();
        config.animation.segments[1].to.insert("opacity".into(), 1.5);
        assert!(matches!(
            config.validate(),
            Err(LoupeError::ValueOutOfRange { .. })
        ));

        let mut config = ShowcaseConfig::default();
        config.animation.segments[0].end = "top sideways".into();
        assert!(matches!(config.validate(), Err(LoupeError::InvalidAnchor(_))));

        let mut config = ShowcaseConfig::default();
        config.animation.segments[0].to.insert("opacity".into(), 0.5);
        assert!(config.validate().is_err());

        let mut config = ShowcaseConfig::default();
        config.viewer.inspect.push("diamond".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_scrub_is_rejected_when_parsing() {
        let result = ShowcaseConfig::from_toml(
            r#"
[[animation.segments]]
target = "camera-target"
to = { x = 0.0, y = 0.0, z = 0.0 }
trigger = ".third"
scrub = -1
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = ShowcaseConfig::default();
        config
            .apply_overrides(|key| match key {
                "LOUPE_ASSET" => Some("./assets/pocket-watch.glb".into()),
                "LOUPE_USE_RGBM" => Some("yes".into()),
                "LOUPE_HOOK_WIRING" => Some("position-only".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.viewer.asset, PathBuf::from("./assets/pocket-watch.glb"));
        assert!(config.viewer.use_rgbm);
        assert_eq!(config.animation.hook_wiring, HookWiring::PositionOnly);

        assert!(config
            .apply_overrides(|key| (key == "LOUPE_USE_RGBM").then(|| "maybe".to_string()))
            .is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_config() {
        let config = ShowcaseConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[viewer]"));
        assert_eq!(ShowcaseConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join("loupe_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("showcase.toml");
        std::fs::write(&path, "[viewer]\nprogressive_frames = 8\n").unwrap();

        let config = ShowcaseConfig::load_file(&path).unwrap();
        assert_eq!(config.viewer.progressive_frames, 8);
        assert!(ShowcaseConfig::load_file(&dir.join("missing.toml")).is_err());
    }
}
