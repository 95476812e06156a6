//! Shared test fixtures: a small studio catalog and allocation strategies

use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::catalog::StudioCatalogEntry;
use crate::models::{AllocationSet, StudioSpace};
use crate::registry::StudioRegistry;

/// Catalog used across the crate's tests
pub fn registry() -> StudioRegistry {
    StudioRegistry::new(vec![
        StudioCatalogEntry::new("A", &["1", "2", "3", "4", "5"]),
        StudioCatalogEntry::new("B", &["1", "2", "3"]),
        StudioCatalogEntry::new("C", &["1", "2"]),
        StudioCatalogEntry::new("Omega", &["P1", "P2", "P3", "C1", "C2"]).with_abbreviation("O"),
        StudioCatalogEntry::new("Mezzanine", &[]).with_abbreviation("Mez"),
    ])
    .unwrap()
}

fn flat_studio(name: &'static str, areas: Vec<&'static str>) -> BoxedStrategy<StudioSpace> {
    let len = areas.len();
    prop_oneof![
        Just(StudioSpace::whole(name)),
        subsequence(areas, 1..=len).prop_map(move |areas| StudioSpace::flat(name, areas)),
    ]
    .boxed()
}

fn omega() -> BoxedStrategy<StudioSpace> {
    prop_oneof![
        Just(StudioSpace::whole("Omega")),
        subsequence(vec!["1", "2", "3"], 0..=3)
            .prop_map(|areas| StudioSpace::sub_spaced("Omega", 'P', areas)),
        subsequence(vec!["1", "2"], 0..=2)
            .prop_map(|areas| StudioSpace::sub_spaced("Omega", 'C', areas)),
    ]
    .boxed()
}

/// A single catalog-valid allocation
pub fn studio_space() -> impl Strategy<Value = StudioSpace> {
    prop_oneof![
        flat_studio("A", vec!["1", "2", "3", "4", "5"]),
        flat_studio("B", vec!["1", "2", "3"]),
        flat_studio("C", vec!["1", "2"]),
        omega(),
        Just(StudioSpace::whole("Mezzanine")),
    ]
}

/// A normalized allocation set of catalog-valid allocations
pub fn allocation_set() -> impl Strategy<Value = AllocationSet> {
    proptest::collection::vec(studio_space(), 0..5).prop_map(AllocationSet::from_iter)
}
