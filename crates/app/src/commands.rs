//! Subcommand handlers
//!
//! Each handler takes the loaded state and returns the text to print, so the
//! binary only deals with argument plumbing and exit codes.

use std::path::Path;

use studiospace_core::{
    aggregate, algebra, parse_and_validate, parse_notation, serialize, AggregateOptions,
    AllocationSet, AvailabilityUpdate, RecordSnapshot, Result,
};

use crate::state::AppState;

/// Normalize notation, or dump the parsed set as JSON
pub fn parse(state: &AppState, notation: &str, json: bool) -> Result<String> {
    let set = parse_and_validate(state.registry(), notation)?;
    if json {
        Ok(serde_json::to_string_pretty(&set)?)
    } else {
        Ok(serialize(&set, state.registry()))
    }
}

pub fn merge(state: &AppState, a: &str, b: &str) -> Result<String> {
    let registry = state.registry();
    let merged = algebra::merge(&parse_notation(registry, a)?, &parse_notation(registry, b)?);
    Ok(serialize(&merged, registry))
}

/// Space left in `available` once `claimed` is taken out
pub fn remove(state: &AppState, claimed: &str, available: &str) -> Result<String> {
    let registry = state.registry();
    let remaining = algebra::remove(
        &parse_notation(registry, claimed)?,
        &parse_notation(registry, available)?,
        registry,
    );
    Ok(serialize(&remaining, registry))
}

pub fn conflict(state: &AppState, a: &str, b: &str) -> Result<String> {
    let registry = state.registry();
    let clash = algebra::conflict(&parse_notation(registry, a)?, &parse_notation(registry, b)?);
    Ok(clash.to_string())
}

pub fn standard(state: &AppState) -> String {
    state.registry().standard_notation()
}

/// Recompute availability for a JSON record snapshot
pub fn aggregate_snapshot(
    state: &AppState,
    snapshot_path: &Path,
    base: Option<&str>,
    options: &AggregateOptions,
) -> Result<String> {
    let registry = state.registry();
    let content = std::fs::read_to_string(snapshot_path)?;
    let mut snapshot = RecordSnapshot::from_json(&content)?;

    let base = match base {
        Some(notation) => parse_and_validate(registry, notation)?,
        None => standard_base(state)?,
    };

    let updates: Vec<AvailabilityUpdate> = aggregate(
        &mut snapshot.availability,
        &snapshot.off_air,
        &snapshot.on_air,
        registry,
        &base,
        options,
    );
    Ok(serde_json::to_string_pretty(&updates)?)
}

fn standard_base(state: &AppState) -> Result<AllocationSet> {
    let notation = state.registry().standard_notation();
    if notation.is_empty() {
        return Ok(AllocationSet::new());
    }
    parse_notation(state.registry(), &notation)
}
