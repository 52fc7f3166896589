//! Core types and utilities

pub mod dates;
pub mod geo;
pub mod units;

pub use dates::{DateRange, MAX_RANGE_DAYS};
pub use geo::{BoundingBox, GeoPoint, DOMINICAN_REPUBLIC};
pub use units::*;
