//! Notation serializer - writes allocation sets back as compact notation

use crate::models::{AllocationSet, AreaSelection, StudioSpace};
use crate::registry::StudioRegistry;

/// Compress an area list into notation using catalog adjacency.
///
/// Runs of two or more catalog-adjacent areas become `first-last`; singletons
/// are written as-is. Areas missing from the catalog follow the known ones
/// in their original order.
pub fn format_areas(areas: &[String], catalog: &[String]) -> String {
    let mut known: Vec<usize> = Vec::new();
    let mut unknown: Vec<&str> = Vec::new();
    for area in areas {
        match catalog.iter().position(|a| a == area) {
            Some(i) => known.push(i),
            None => unknown.push(area),
        }
    }
    known.sort_unstable();
    known.dedup();

    let mut pieces: Vec<String> = Vec::new();
    let mut run_start = 0;
    for i in 0..known.len() {
        let run_ends = i + 1 == known.len() || known[i + 1] != known[i] + 1;
        if !run_ends {
            continue;
        }
        let (first, last) = (known[run_start], known[i]);
        if first == last {
            pieces.push(catalog[first].clone());
        } else {
            pieces.push(format!("{}-{}", catalog[first], catalog[last]));
        }
        run_start = i + 1;
    }
    pieces.extend(unknown.into_iter().map(str::to_string));

    pieces.join(",")
}

/// Write one allocation as a notation token
pub fn serialize_space(space: &StudioSpace, registry: &StudioRegistry) -> String {
    let label = registry.label_for(&space.space);
    let profile = registry.get(&space.space);

    match &space.areas {
        None => label.to_string(),
        Some(AreaSelection::Flat(areas)) => {
            let catalog = profile.map(|p| p.flat_catalog()).unwrap_or(&[]);
            format!("{}{}", label, format_areas(areas, catalog))
        }
        Some(AreaSelection::SubSpaced { sub_space, areas }) => {
            let catalog = profile.map(|p| p.sub_catalog(*sub_space)).unwrap_or(&[]);
            format!("{}:{}{}", label, sub_space, format_areas(areas, catalog))
        }
    }
}

/// Write an allocation set as notation, one token per entry in set order
pub fn serialize(set: &AllocationSet, registry: &StudioRegistry) -> String {
    set.iter()
        .map(|space| serialize_space(space, registry))
        .collect::<Vec<_>>()
        .join(" ")
}
