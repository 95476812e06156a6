//! Studio notation - parsing, validation and serialization
//!
//! Notation is a compact text format for studio allocations, e.g.
//! `A1,3-4 B1-3 O:P1-3 Mez`. Parsing runs in two stages: the scanner splits
//! the line into per-studio tokens, then each token is resolved against the
//! studio registry.

mod resolve;
mod scanner;
mod serialize;
mod validate;

pub use resolve::{expand_areas, resolve_token};
pub use scanner::split_tokens;
pub use serialize::{format_areas, serialize, serialize_space};
pub use validate::{validate, violations, Violation};

use crate::error::{Error, Result};
use crate::models::AllocationSet;
use crate::registry::StudioRegistry;

/// Parse notation into an allocation set.
///
/// Tokens occupying the same slot are unioned. Empty input is an error
/// rather than an empty set.
pub fn parse_notation(registry: &StudioRegistry, raw: &str) -> Result<AllocationSet> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidNotationState(
            "Notation is empty".to_string(),
        ));
    }

    let known = registry.known_labels();
    let mut set = AllocationSet::new();
    for token in split_tokens(raw, &known) {
        let space = resolve_token(&token, registry)?;
        tracing::debug!(%token, %space, "Resolved notation token");
        set.insert(space);
    }
    Ok(set)
}

/// Parse notation and reject it unless every studio and area is in the catalog
pub fn parse_and_validate(registry: &StudioRegistry, raw: &str) -> Result<AllocationSet> {
    let set = parse_notation(registry, raw)?;
    let found = violations(&set, registry);
    if !found.is_empty() {
        let reasons: Vec<String> = found.iter().map(ToString::to_string).collect();
        return Err(Error::ValidationFailed(format!(
            "{}: {}",
            raw,
            reasons.join("; ")
        )));
    }
    Ok(set)
}

/// Parse notation, logging and returning `None` when it cannot be determined
pub fn studio_spaces(registry: &StudioRegistry, raw: &str) -> Option<AllocationSet> {
    parse_notation(registry, raw)
        .map_err(|e| tracing::warn!(notation = %raw, error = %e, "Could not parse studio notation"))
        .ok()
}

/// Parse and validate notation, logging and returning `None` on failure
pub fn validated_studio_spaces(registry: &StudioRegistry, raw: &str) -> Option<AllocationSet> {
    parse_and_validate(registry, raw)
        .map_err(|e| tracing::warn!(notation = %raw, error = %e, "Invalid studio notation"))
        .ok()
}
