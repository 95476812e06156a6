//! Availability aggregation
//!
//! Each availability record is an hour slot holding the studio space that is
//! still unclaimed at that hour. Aggregation recomputes every record from a
//! base allocation by folding the on-air and off-air events over it.

mod overlap;

pub use overlap::is_within;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::algebra::{merge, remove};
use crate::models::{AllocationSet, AvailabilityRecord, EventRecord};
use crate::notation::{serialize, studio_spaces};
use crate::registry::StudioRegistry;
use crate::time::{split_date_time, split_date_time_opt, SlotTime};

/// Options for one aggregation run
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Event being created or edited; applied to every record without an overlap test
    pub target_event_id: Option<String>,
    /// Merge the target event back in instead of removing it, and restore
    /// the space of off-air events that do not overlap a record
    pub merge_mode: bool,
}

/// A record whose available notation changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub id: String,
    pub available_notation: String,
}

/// An event with its usage and window already parsed
#[derive(Debug)]
struct ParsedEvent<'a> {
    id: &'a str,
    usage: AllocationSet,
    start: SlotTime,
    end: Option<SlotTime>,
    on_air: bool,
}

impl ParsedEvent<'_> {
    fn covers(&self, slot: SlotTime) -> bool {
        if self.on_air {
            is_within(slot, self.start, None)
        } else {
            is_within(slot, self.start, self.end)
        }
    }
}

fn parse_events<'a>(
    events: &'a [EventRecord],
    registry: &StudioRegistry,
    on_air: bool,
) -> Vec<ParsedEvent<'a>> {
    events
        .iter()
        .filter_map(|event| {
            let usage = studio_spaces(registry, &event.studio_usage)?;
            let window = split_date_time(&event.start_date_time).and_then(|start| {
                split_date_time_opt(event.end_date_time.as_deref()).map(|end| (start, end))
            });
            match window {
                Ok((start, end)) => Some(ParsedEvent {
                    id: &event.id,
                    usage,
                    start,
                    end,
                    on_air,
                }),
                Err(e) => {
                    tracing::warn!(event = %event.id, error = %e, "Skipping event with unreadable times");
                    None
                }
            }
        })
        .collect()
}

/// Fold every event over `base` for one hour slot
fn fold_events(
    slot: SlotTime,
    events: &[ParsedEvent<'_>],
    registry: &StudioRegistry,
    base: &AllocationSet,
    options: &AggregateOptions,
) -> AllocationSet {
    events.iter().fold(base.clone(), |available, event| {
        if options.target_event_id.as_deref() == Some(event.id) {
            if options.merge_mode {
                merge(&available, &event.usage)
            } else {
                remove(&event.usage, &available, registry)
            }
        } else if event.covers(slot) {
            tracing::debug!(event = %event.id, %slot, "Event claims space");
            remove(&event.usage, &available, registry)
        } else if !event.on_air && options.merge_mode {
            merge(&available, &event.usage)
        } else {
            available
        }
    })
}

/// Recompute the available notation of every record.
///
/// Records are updated in place. Returns the records whose notation changed.
/// Events or records that cannot be read are logged and skipped.
#[instrument(skip_all, fields(records = records.len(), off_air = off_air.len(), on_air = on_air.len()))]
pub fn aggregate(
    records: &mut [AvailabilityRecord],
    off_air: &[EventRecord],
    on_air: &[EventRecord],
    registry: &StudioRegistry,
    base: &AllocationSet,
    options: &AggregateOptions,
) -> Vec<AvailabilityUpdate> {
    let mut events = parse_events(on_air, registry, true);
    events.extend(parse_events(off_air, registry, false));

    let updates: Vec<AvailabilityUpdate> = records
        .par_iter_mut()
        .filter_map(|record| {
            let slot = match split_date_time(&record.start_date_time) {
                Ok(slot) => slot,
                Err(e) => {
                    tracing::warn!(record = %record.id, error = %e, "Skipping availability record");
                    return None;
                }
            };

            let available = fold_events(slot, &events, registry, base, options);
            let notation = serialize(&available, registry);
            if notation == record.available_notation {
                return None;
            }

            record.available_notation = notation.clone();
            Some(AvailabilityUpdate {
                id: record.id.clone(),
                available_notation: notation,
            })
        })
        .collect();

    tracing::info!(
        events = events.len(),
        updated = updates.len(),
        "Aggregated studio availability"
    );
    updates
}
