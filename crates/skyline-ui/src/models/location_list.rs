//! In-memory ordered list of the current user's saved locations.

use std::collections::HashSet;

use skyline_services::LocationRecord;

use super::reorder::{self, MoveIntent, ReorderError};

/// The on-screen order between a load and the next save.
///
/// Names are unique and positions are contiguous from 0.
#[derive(Debug, Clone, Default)]
pub struct OrderedLocationList {
    records: Vec<LocationRecord>,
}

impl OrderedLocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with `records`, in the order given.
    ///
    /// Repeated names keep their first occurrence. Returns how many were dropped.
    pub fn replace(&mut self, records: Vec<LocationRecord>) -> usize {
        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let unique: Vec<LocationRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.name.clone()))
            .collect();

        let dropped = total - unique.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} duplicate location names from load", dropped);
        }
        self.records = unique;
        dropped
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Display names in order.
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    /// Index of the record with exactly this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Apply a move; returns the moved record's new index.
    pub fn apply_move(&mut self, index: usize, intent: MoveIntent) -> Result<usize, ReorderError> {
        reorder::apply(&mut self.records, index, intent)
    }

    pub fn relocate(&mut self, from: usize, to: usize) -> Result<usize, ReorderError> {
        reorder::relocate(&mut self.records, from, to)
    }
}
