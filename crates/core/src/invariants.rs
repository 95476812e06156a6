//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::cmp::Ordering;

use crate::models::{AreaSelection, StudioSpace};

/// Validate that an allocation set is sorted with one entry per slot
pub fn assert_allocation_invariants(spaces: &[StudioSpace]) {
    for pair in spaces.windows(2) {
        debug_assert!(
            pair[0].slot_cmp(&pair[1]) == Ordering::Less,
            "Allocations {} and {} are out of order or share a slot",
            pair[0],
            pair[1]
        );
    }

    // A whole-studio entry must be the only entry for its studio
    for whole in spaces.iter().filter(|s| s.areas.is_none()) {
        let count = spaces.iter().filter(|s| s.space == whole.space).count();
        debug_assert!(
            count == 1,
            "Whole studio {} listed alongside {} other entries",
            whole.space,
            count - 1
        );
    }

    for space in spaces {
        assert_space_invariants(space);
    }
}

/// Validate a single allocation
pub fn assert_space_invariants(space: &StudioSpace) {
    debug_assert!(
        !space.space.trim().is_empty(),
        "Allocation has empty studio name"
    );

    if let Some(AreaSelection::SubSpaced { sub_space, .. }) = &space.areas {
        debug_assert!(
            sub_space.is_ascii_alphabetic(),
            "Allocation {} has non-letter sub-space {:?}",
            space.space,
            sub_space
        );
    }
}
