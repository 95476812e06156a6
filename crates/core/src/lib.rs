//! Studiospace Core Library
//!
//! Studio catalogs, the allocation notation and algebra, and availability
//! aggregation for the Studiospace scheduling tools.

pub mod algebra;
pub mod availability;
pub mod catalog;
pub mod comments;
pub mod error;
pub mod invariants;
pub mod models;
pub mod notation;
pub mod registry;
pub mod time;

#[cfg(test)]
mod testing;

pub use algebra::{conflict, merge, remove};
pub use availability::{aggregate, AggregateOptions, AvailabilityUpdate};
pub use catalog::{CatalogError, CatalogFile, StudioCatalogEntry};
pub use error::{Error, Result};
pub use models::*;
pub use notation::{
    parse_and_validate, parse_notation, serialize, studio_spaces, validate,
    validated_studio_spaces, Violation,
};
pub use registry::{StudioProfile, StudioRegistry};
pub use time::SlotTime;
