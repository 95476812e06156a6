//! Overlap test between an availability slot and an event window

use crate::time::SlotTime;

/// Whether `slot` falls inside an event window.
///
/// On-air events (`end` is `None`) cover exactly their start hour. Off-air
/// events cover every hour from start to end inclusive, including whole days
/// strictly between the two dates.
pub fn is_within(slot: SlotTime, start: SlotTime, end: Option<SlotTime>) -> bool {
    match end {
        None => slot == start,
        Some(end) => start <= slot && slot <= end,
    }
}
