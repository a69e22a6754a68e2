use crate::findings::item::{ItemKind, TrackingItem};
use std::collections::HashSet;

/// Ordered collection of findings, unique by `(kind, value)`
///
/// The first occurrence of a value wins; later occurrences, even from other
/// pages, are dropped rather than merged.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    items: Vec<TrackingItem>,
    seen: HashSet<(ItemKind, String)>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a finding, returning false if its value was already recorded
    pub fn insert(&mut self, item: TrackingItem) -> bool {
        if !self.seen.insert((item.kind, item.value.clone())) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Inserts every finding, returning how many were new
    pub fn extend<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = TrackingItem>,
    {
        items
            .into_iter()
            .map(|item| self.insert(item))
            .filter(|inserted| *inserted)
            .count()
    }

    pub fn contains(&self, kind: ItemKind, value: &str) -> bool {
        self.seen.contains(&(kind, value.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Findings in discovery order
    pub fn items(&self) -> &[TrackingItem] {
        &self.items
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    pub fn into_items(self) -> Vec<TrackingItem> {
        self.items
    }
}
