//! Per-image "has loaded" flags for the grid's pulse placeholder.
//!
//! Load completions arrive in any order and may repeat. A missing entry
//! means "not loaded yet"; failed loads simply never arrive and the
//! placeholder stays up.

use super::host::HostEvent;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedFlags {
    flags: BTreeMap<u32, bool>,
}

impl LoadedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, id: u32) {
        self.flags.insert(id, true);
    }

    pub fn is_loaded(&self, id: u32) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    pub fn loaded_count(&self) -> usize {
        self.flags.values().filter(|loaded| **loaded).count()
    }

    /// Record an image-load input; anything else is ignored.
    pub fn handle(&mut self, event: HostEvent) {
        if let HostEvent::ImageLoaded { id } = event {
            self.mark_loaded(id);
        }
    }
}
