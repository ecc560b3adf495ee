//! Viewer lifecycle events

use crate::plugin::PluginKind;
use loupe_core::ContentHash;

/// Something that happened to the viewer outside the frame loop
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    PluginAdded(PluginKind),
    PipelineRefreshed { passes: usize },
    AssetLoaded { name: String, hash: ContentHash },
    InspectorReady { panels: usize },
    SnapshotTaken { frame: u64 },
}

/// A simple event queue the viewer pushes to and drivers drain
pub struct EventBus {
    events: Vec<ViewerEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: ViewerEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
