//! Data models for Studiospace

mod allocation;
mod record;
mod space;

pub use allocation::*;
pub use record::*;
pub use space::*;
