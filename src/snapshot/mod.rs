//! Single-month operating snapshot
//!
//! Combines equipment revenue, lifts, age risk, utilities, maintenance,
//! financing and cash bases into one monthly picture of the store.

mod engine;
mod hot_water;
mod types;

pub use engine::calculate_snapshot;
pub use hot_water::{estimate_hot_water, HotWaterEstimate, BTU_PER_THERM, LBS_PER_GALLON};
pub use types::{ReplacementReserve, Snapshot, SnapshotWarning, NO_DEBT_DSCR};
