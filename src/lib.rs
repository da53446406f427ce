//! Laundromat Pro-Forma - acquisition underwriting for self-service laundromats
//!
//! This library provides:
//! - Equipment revenue, utility, maintenance and lift calculators
//! - Equipment age-risk scoring and valuation multiples
//! - Two-tranche debt sizing, depreciation and tax
//! - A monthly operating snapshot and a multi-year projection
//! - Loaders for JSON scenarios, flat form fields and CSV equipment tables

pub mod error;
pub mod inputs;
pub mod equipment;
pub mod finance;
pub mod snapshot;
pub mod projection;
pub mod scenario;
pub mod presets;
pub mod report;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use inputs::{FormValues, ProFormaInputs};
pub use equipment::{Dryer, EquipmentCosts, Washer};
pub use finance::pmt;
pub use snapshot::{calculate_snapshot, Snapshot};
pub use projection::{simulate_years, ProjectionEngine, ProjectionResult};
pub use scenario::{evaluate, ProForma, ScenarioRunner};
