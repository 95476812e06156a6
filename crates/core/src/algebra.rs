//! Allocation algebra - union, subtraction and conflict over allocation sets
//!
//! All operations borrow their inputs and return new sets. Area lists in
//! results are kept in natural order.

use crate::models::{sort_areas, AllocationSet, AreaSelection, StudioSpace};
use crate::registry::StudioRegistry;

/// Union two allocations occupying the same slot.
///
/// A whole-studio side absorbs the other. For sub-spaces an empty list is the
/// whole sub-space, so it absorbs as well.
pub fn union_slot(a: &StudioSpace, b: &StudioSpace) -> StudioSpace {
    debug_assert!(a.same_slot(b), "union of distinct slots {} and {}", a, b);

    let areas = match (&a.areas, &b.areas) {
        (None, _) | (_, None) => None,
        (Some(AreaSelection::Flat(x)), Some(AreaSelection::Flat(y))) => {
            Some(AreaSelection::Flat(union_areas(x, y)))
        }
        (
            Some(AreaSelection::SubSpaced { sub_space, areas: x }),
            Some(AreaSelection::SubSpaced { areas: y, .. }),
        ) => {
            let areas = if x.is_empty() || y.is_empty() {
                Vec::new()
            } else {
                union_areas(x, y)
            };
            Some(AreaSelection::SubSpaced {
                sub_space: *sub_space,
                areas,
            })
        }
        (Some(selection), Some(_)) => Some(selection.clone()),
    };

    StudioSpace {
        space: a.space.clone(),
        areas,
    }
}

fn union_areas(x: &[String], y: &[String]) -> Vec<String> {
    let mut areas: Vec<String> = x.iter().chain(y).cloned().collect();
    sort_areas(&mut areas);
    areas
}

fn difference(base: &[String], claimed: &[String]) -> Vec<String> {
    let mut areas: Vec<String> = base
        .iter()
        .filter(|area| !claimed.contains(area))
        .cloned()
        .collect();
    sort_areas(&mut areas);
    areas
}

/// Union of two allocation sets
pub fn merge(a: &AllocationSet, b: &AllocationSet) -> AllocationSet {
    a.iter().chain(b.iter()).cloned().collect()
}

/// Subtract `claimed` from `available`.
///
/// Available slots with no matching claim pass through unchanged; claims on
/// studios that are not available contribute nothing. The registry supplies
/// the catalogs needed when a claim cuts into a whole-studio or whole
/// sub-space allocation.
pub fn remove(
    claimed: &AllocationSet,
    available: &AllocationSet,
    registry: &StudioRegistry,
) -> AllocationSet {
    let mut result = AllocationSet::new();

    for slot in available {
        let claims: Vec<&StudioSpace> = claimed.iter().filter(|c| c.same_slot(slot)).collect();
        if claims.is_empty() {
            result.insert(slot.clone());
            continue;
        }

        // An explicitly empty flat selection survives as-is
        let keep_empty = matches!(&slot.areas, Some(AreaSelection::Flat(v)) if v.is_empty());

        for piece in split_whole(slot, registry) {
            let matching: Vec<&StudioSpace> = claims
                .iter()
                .copied()
                .filter(|c| c.same_slot(&piece))
                .collect();
            let remaining = matching
                .into_iter()
                .try_fold(piece, |piece, claim| subtract_slot(piece, claim, registry));

            match remaining {
                Some(StudioSpace {
                    areas: Some(AreaSelection::Flat(v)),
                    ..
                }) if v.is_empty() && !keep_empty => {}
                Some(space) => result.insert(space),
                None => {}
            }
        }
    }

    result
}

/// Break a whole-studio allocation into its constituent slots so that a
/// claim on one sub-space leaves the others available.
fn split_whole(slot: &StudioSpace, registry: &StudioRegistry) -> Vec<StudioSpace> {
    let profile = match (&slot.areas, registry.get(&slot.space)) {
        (None, Some(profile)) if profile.has_sub_spaces() => profile,
        _ => return vec![slot.clone()],
    };

    let mut pieces = Vec::new();
    if !profile.flat_catalog().is_empty() {
        pieces.push(StudioSpace::flat(&slot.space, profile.flat_catalog().iter().cloned()));
    }
    pieces.extend(
        profile
            .sub_space_tags()
            .map(|tag| StudioSpace::sub_spaced(&slot.space, tag, Vec::<String>::new())),
    );
    pieces
}

/// What is left of `piece` after `claim`; `None` when nothing remains
fn subtract_slot(
    piece: StudioSpace,
    claim: &StudioSpace,
    registry: &StudioRegistry,
) -> Option<StudioSpace> {
    let profile = registry.get(&piece.space);

    let areas = match (&piece.areas, &claim.areas) {
        (_, None) => return None,
        (None, Some(AreaSelection::Flat(claimed))) => {
            let catalog = profile.map(|p| p.flat_catalog()).unwrap_or(&[]);
            AreaSelection::Flat(difference(catalog, claimed))
        }
        (Some(AreaSelection::Flat(available)), Some(AreaSelection::Flat(claimed))) => {
            AreaSelection::Flat(difference(available, claimed))
        }
        (
            Some(AreaSelection::SubSpaced {
                sub_space,
                areas: available,
            }),
            Some(AreaSelection::SubSpaced {
                sub_space: claimed_sub_space,
                areas: claimed,
            }),
        ) if sub_space == claimed_sub_space => {
            if claimed.is_empty() {
                return None;
            }
            let base = if available.is_empty() {
                profile.map(|p| p.sub_catalog(*sub_space)).unwrap_or(&[])
            } else {
                available.as_slice()
            };
            let areas = difference(base, claimed);
            // An empty sub-space list means the whole sub-space, so drop it
            if areas.is_empty() {
                return None;
            }
            AreaSelection::SubSpaced {
                sub_space: *sub_space,
                areas,
            }
        }
        _ => return Some(piece),
    };

    Some(StudioSpace {
        space: piece.space,
        areas: Some(areas),
    })
}

/// Whether any studio appears in both sets
pub fn conflict(a: &AllocationSet, b: &AllocationSet) -> bool {
    a.iter().any(|space| b.contains_space(&space.space))
}
