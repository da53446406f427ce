//! Multi-year projection of the monthly snapshot

mod engine;
mod irr;
mod results;

pub use engine::{simulate_years, ProjectionConfig, ProjectionEngine, MAX_HORIZON_YEARS};
pub use irr::{calculate_irr, present_value};
pub use results::{ProjectionResult, ProjectionSummary, ProjectionYear};
