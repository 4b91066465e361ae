//! Placement masks and occupancy tracking

pub mod mask;
pub mod occupancy;

pub use mask::{Mask, MaskShape, generate_mask};
pub use occupancy::OccupancyGrid;
