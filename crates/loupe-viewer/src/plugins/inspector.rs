//! Inspector: a debug panel listing the settings of selected plugins

use crate::plugin::{PluginKind, Setting, ViewerPlugin};
use serde::Serialize;
use std::fmt;

/// Settings of one inspected plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorPanel {
    pub plugin: PluginKind,
    pub settings: Vec<Setting>,
}

impl fmt::Display for InspectorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.plugin)?;
        if self.settings.is_empty() {
            writeln!(f, "  (no settings)")?;
        }
        for setting in &self.settings {
            writeln!(f, "  {:<12} = {}", setting.name, setting.value)?;
        }
        Ok(())
    }
}

/// Holds the panels gathered by [`crate::ViewerApp::setup_inspector`]
#[derive(Debug, Default)]
pub struct InspectorPlugin {
    panels: Vec<InspectorPanel>,
}

impl InspectorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel set
    pub fn setup_plugins(&mut self, panels: Vec<InspectorPanel>) {
        self.panels = panels;
    }

    pub fn panels(&self) -> &[InspectorPanel] {
        &self.panels
    }

    pub fn panel(&self, kind: PluginKind) -> Option<&InspectorPanel> {
        self.panels.iter().find(|p| p.plugin == kind)
    }

    /// Plain-text rendering of every panel
    pub fn render_text(&self) -> String {
        self.panels.iter().map(|p| p.to_string()).collect()
    }
}

impl ViewerPlugin for InspectorPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Inspector
    }

    impl_plugin_any!();
}
