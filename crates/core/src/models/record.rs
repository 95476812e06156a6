//! Record snapshots handed over by the host record store

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-hour snapshot of which studio space is still unclaimed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub id: String,
    pub start_date_time: String,
    #[serde(default)]
    pub available_notation: String,
}

/// An on-air hour (no end) or an off-air block (closed range)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub studio_usage: String,
    pub start_date_time: String,
    #[serde(default)]
    pub end_date_time: Option<String>,
}

impl EventRecord {
    /// On-air records are instantaneous hours
    pub fn is_on_air(&self) -> bool {
        self.end_date_time.is_none()
    }
}

/// Materialized input for one aggregation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSnapshot {
    #[serde(default)]
    pub availability: Vec<AvailabilityRecord>,
    #[serde(default)]
    pub off_air: Vec<EventRecord>,
    #[serde(default)]
    pub on_air: Vec<EventRecord>,
}

impl RecordSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "availability": [
                { "id": "rec1", "startDateTime": "2024-03-04 14:00" }
            ],
            "onAir": [
                { "id": "show1", "studioUsage": "A1-2", "startDateTime": "2024-03-04 14:00" }
            ]
        }"#;
        let snapshot = RecordSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.availability.len(), 1);
        assert_eq!(snapshot.availability[0].available_notation, "");
        assert!(snapshot.off_air.is_empty());
        assert!(snapshot.on_air[0].is_on_air());
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(RecordSnapshot::from_json("{ not json").is_err());
    }
}
