//! Industry revenue lifts from retooling and branding spend

use serde::{Deserialize, Serialize};

/// Retool lift: 0.25% of revenue per $1,000 spent, capped at 20%
pub const RETOOL_PCT_PER_THOUSAND: f64 = 0.25;
pub const RETOOL_MAX_PCT: f64 = 20.0;

/// Brand lift: 0.5% of revenue per $1,000 spent, capped at 12%
pub const BRAND_PCT_PER_THOUSAND: f64 = 0.5;
pub const BRAND_MAX_PCT: f64 = 12.0;

/// Combined lift cap
pub const COMBINED_MAX_PCT: f64 = 30.0;

/// Lift amounts and the percentages actually applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryLifts {
    pub retool_lift: f64,
    pub brand_lift: f64,
    pub total_lift: f64,
    /// Retool lift percentage after the combined cap
    pub retool_lift_pct: f64,
    /// Brand lift percentage after the combined cap
    pub brand_lift_pct: f64,
}

/// Effective (retool, brand) lift percentages for the given budgets
///
/// When the individually capped percentages add up to more than
/// [`COMBINED_MAX_PCT`], both are scaled by `30 / (retool + brand)`.
pub fn lift_percentages(retool_budget: f64, brand_budget: f64) -> (f64, f64) {
    let retool_pct = (retool_budget / 1000.0 * RETOOL_PCT_PER_THOUSAND).min(RETOOL_MAX_PCT);
    let brand_pct = (brand_budget / 1000.0 * BRAND_PCT_PER_THOUSAND).min(BRAND_MAX_PCT);
    let uncapped = retool_pct + brand_pct;

    if uncapped > COMBINED_MAX_PCT {
        let scaled_retool = retool_pct * (COMBINED_MAX_PCT / uncapped);
        // Remainder keeps the pair summing to the cap exactly
        (scaled_retool, COMBINED_MAX_PCT - scaled_retool)
    } else {
        (retool_pct, brand_pct)
    }
}

/// Revenue lift on `base_revenue` from retool and brand budgets
pub fn calculate_industry_lifts(base_revenue: f64, retool_budget: f64, brand_budget: f64) -> IndustryLifts {
    let (retool_lift_pct, brand_lift_pct) = lift_percentages(retool_budget, brand_budget);

    let retool_lift = base_revenue * retool_lift_pct / 100.0;
    let brand_lift = base_revenue * brand_lift_pct / 100.0;

    IndustryLifts {
        retool_lift,
        brand_lift,
        total_lift: retool_lift + brand_lift,
        retool_lift_pct,
        brand_lift_pct,
    }
}
