//! In-memory measurement store keyed by rendering surface

use std::collections::HashMap;

use crate::domain::measurement::Measurement;
use crate::host::MeasurementStore;

/// Identifier of one rendering surface (viewport element) in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Measurements grouped by surface
///
/// One store per viewer instance; nothing is shared globally.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    surfaces: HashMap<SurfaceId, Vec<Measurement>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a measurement on a surface and returns its index
    pub fn add(&mut self, surface: SurfaceId, measurement: Measurement) -> usize {
        let list = self.surfaces.entry(surface).or_default();
        list.push(measurement);
        list.len() - 1
    }

    /// Removes a measurement; returns it if the index existed
    pub fn remove(&mut self, surface: SurfaceId, index: usize) -> Option<Measurement> {
        let list = self.surfaces.get_mut(&surface)?;
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, surface: SurfaceId) -> Option<&[Measurement]> {
        self.surfaces.get(&surface).map(Vec::as_slice)
    }

    /// Drops every measurement of a surface
    pub fn clear(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }
}

impl MeasurementStore for InMemoryStore {
    fn measurements_mut(&mut self, surface: SurfaceId) -> Option<&mut Vec<Measurement>> {
        self.surfaces.get_mut(&surface)
    }
}
