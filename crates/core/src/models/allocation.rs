//! Allocation set - a deduplicated, sorted collection of studio allocations

use serde::{Deserialize, Serialize};

use super::StudioSpace;
use crate::algebra::union_slot;
use crate::invariants::assert_allocation_invariants;

/// Allocations across multiple studios, kept sorted by studio then sub-space.
/// No two entries occupy the same slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationSet {
    spaces: Vec<StudioSpace>,
}

impl AllocationSet {
    pub fn new() -> Self {
        Self { spaces: Vec::new() }
    }

    /// Add an allocation, unioning it with any entries occupying the same slot
    pub fn insert(&mut self, space: StudioSpace) {
        let mut merged = space;
        let mut i = 0;
        while i < self.spaces.len() {
            if self.spaces[i].same_slot(&merged) {
                let existing = self.spaces.remove(i);
                merged = union_slot(&existing, &merged);
            } else {
                i += 1;
            }
        }

        let at = self
            .spaces
            .partition_point(|s| s.slot_cmp(&merged) != std::cmp::Ordering::Greater);
        self.spaces.insert(at, merged);

        assert_allocation_invariants(&self.spaces);
    }

    /// First entry occupying the same slot as `space`
    pub fn find_slot(&self, space: &StudioSpace) -> Option<&StudioSpace> {
        self.spaces.iter().find(|s| s.same_slot(space))
    }

    /// All entries for a studio
    pub fn for_space<'a>(&'a self, space: &'a str) -> impl Iterator<Item = &'a StudioSpace> {
        self.spaces.iter().filter(move |s| s.space == space)
    }

    pub fn contains_space(&self, space: &str) -> bool {
        self.spaces.iter().any(|s| s.space == space)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudioSpace> {
        self.spaces.iter()
    }

    pub fn as_slice(&self) -> &[StudioSpace] {
        &self.spaces
    }

    pub fn into_vec(self) -> Vec<StudioSpace> {
        self.spaces
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}

impl FromIterator<StudioSpace> for AllocationSet {
    fn from_iter<T: IntoIterator<Item = StudioSpace>>(iter: T) -> Self {
        let mut set = AllocationSet::new();
        for space in iter {
            set.insert(space);
        }
        set
    }
}

impl Extend<StudioSpace> for AllocationSet {
    fn extend<T: IntoIterator<Item = StudioSpace>>(&mut self, iter: T) {
        for space in iter {
            self.insert(space);
        }
    }
}

impl IntoIterator for AllocationSet {
    type Item = StudioSpace;
    type IntoIter = std::vec::IntoIter<StudioSpace>;

    fn into_iter(self) -> Self::IntoIter {
        self.spaces.into_iter()
    }
}

impl<'a> IntoIterator for &'a AllocationSet {
    type Item = &'a StudioSpace;
    type IntoIter = std::slice::Iter<'a, StudioSpace>;

    fn into_iter(self) -> Self::IntoIter {
        self.spaces.iter()
    }
}
