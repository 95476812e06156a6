//! Allocation validator - checks allocations against the studio catalog

use std::fmt;

use crate::models::{AllocationSet, AreaSelection};
use crate::registry::StudioRegistry;

/// A single reason an allocation set is not valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The studio is not in the catalog
    UnknownStudio(String),
    /// The studio has no sub-space with this tag
    UnknownSubSpace { space: String, sub_space: char },
    /// The area is not in the studio's catalog
    UnknownArea { space: String, area: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownStudio(space) => write!(f, "unknown studio {}", space),
            Violation::UnknownSubSpace { space, sub_space } => {
                write!(f, "studio {} has no sub-space {}", space, sub_space)
            }
            Violation::UnknownArea { space, area } => {
                write!(f, "studio {} has no area {}", space, area)
            }
        }
    }
}

/// Every violation in the set. Scans the whole set without stopping early.
pub fn violations(set: &AllocationSet, registry: &StudioRegistry) -> Vec<Violation> {
    let mut found = Vec::new();

    for space in set {
        let Some(profile) = registry.get(&space.space) else {
            found.push(Violation::UnknownStudio(space.space.clone()));
            continue;
        };

        // A studio without a catalog accepts any areas
        if profile.catalog().is_empty() {
            continue;
        }

        let labels: Vec<String> = match &space.areas {
            None => continue,
            Some(AreaSelection::Flat(areas)) => areas.clone(),
            Some(AreaSelection::SubSpaced { sub_space, areas }) => {
                if !profile.sub_space_tags().any(|tag| tag == *sub_space) {
                    found.push(Violation::UnknownSubSpace {
                        space: space.space.clone(),
                        sub_space: *sub_space,
                    });
                    continue;
                }
                areas
                    .iter()
                    .map(|area| format!("{}{}", sub_space, area))
                    .collect()
            }
        };

        found.extend(
            labels
                .into_iter()
                .filter(|label| !profile.has_area(label))
                .map(|area| Violation::UnknownArea {
                    space: space.space.clone(),
                    area,
                }),
        );
    }

    found
}

/// Whether every studio and area in the set exists in the catalog
pub fn validate(set: &AllocationSet, registry: &StudioRegistry) -> bool {
    let found = violations(set, registry);
    for violation in &found {
        tracing::debug!(%violation, "Allocation failed validation");
    }
    found.is_empty()
}
