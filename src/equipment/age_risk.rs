//! Equipment age risk
//!
//! Turns the fleet's age distribution into a severity score. Severity drives
//! the revenue penalty, utility drift, extra replacement reserve, DSCR stress
//! haircut and the valuation multiple applied in the snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{all_machines, Dryer, Machine, Washer};

/// Ordinal classification of average fleet age
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
    Severe,
    Distressed,
}

impl RiskLabel {
    /// Classify an average age
    ///
    /// Breakpoints are 7/10/13/17 years, not the 6/10/15 used for severity.
    pub fn for_avg_age(avg_age: f64) -> Self {
        if avg_age < 7.0 {
            RiskLabel::Low
        } else if avg_age < 10.0 {
            RiskLabel::Moderate
        } else if avg_age < 13.0 {
            RiskLabel::High
        } else if avg_age < 17.0 {
            RiskLabel::Severe
        } else {
            RiskLabel::Distressed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW",
            RiskLabel::Moderate => "MODERATE",
            RiskLabel::High => "HIGH",
            RiskLabel::Severe => "SEVERE",
            RiskLabel::Distressed => "DISTRESSED",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived age-risk figures; percentage fields are in percent (22.14 = 22.14%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRisk {
    pub avg_age: f64,
    /// Oldest age among tiers with a positive count
    pub oldest: f64,
    pub severity: f64,
    pub label: RiskLabel,
    /// Haircut applied to gross revenue
    pub rev_penalty_pct: f64,
    /// Increase applied to utility costs
    pub util_drift_pct: f64,
    /// Extra replacement reserve as a share of gross revenue
    pub reserve_pct: f64,
    /// EBITDA haircut for the stressed DSCR
    pub stress_pct: f64,
    /// EBITDA valuation multiple (monthly EBITDA basis)
    pub multiple: f64,
}

// Caps on the severity-driven adjustments (fractions)
const MAX_REV_PENALTY: f64 = 0.60;
const MAX_UTIL_DRIFT: f64 = 0.80;
const MAX_RESERVE: f64 = 0.25;
const MAX_STRESS: f64 = 0.50;

const MAX_MULTIPLE: f64 = 60.0;
const MIN_MULTIPLE: f64 = 25.0;

/// Piecewise severity from average age alone
pub fn base_severity(avg_age: f64) -> f64 {
    if avg_age <= 6.0 {
        0.0
    } else if avg_age <= 10.0 {
        (avg_age - 6.0) * 0.08
    } else if avg_age <= 15.0 {
        0.32 + (avg_age - 10.0) * 0.15
    } else {
        1.07 + (avg_age - 15.0).powf(1.35)
    }
}

/// Extra severity when any unit is older than 13 years
pub fn oldest_kicker(oldest: f64) -> f64 {
    (oldest - 13.0).max(0.0) * 0.12
}

/// Valuation multiple for a severity, within [25, 60]
pub fn valuation_multiple(severity: f64) -> f64 {
    (MAX_MULTIPLE - severity * 12.0).clamp(MIN_MULTIPLE, MAX_MULTIPLE)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Age risk for the combined washer and dryer fleet
pub fn calc_age_risk(washers: &[Washer], dryers: &[Dryer]) -> AgeRisk {
    let mut total_units = 0.0;
    let mut age_sum = 0.0;
    let mut oldest: f64 = 0.0;

    for machine in all_machines(washers, dryers) {
        let count = finite_or_zero(machine.count());
        let age = finite_or_zero(machine.age());
        total_units += count;
        age_sum += count * age;
        if count > 0.0 {
            oldest = oldest.max(age);
        }
    }

    let avg_age = if total_units != 0.0 {
        age_sum / total_units
    } else {
        0.0
    };

    let severity = base_severity(avg_age) + oldest_kicker(oldest);

    AgeRisk {
        avg_age,
        oldest,
        severity,
        label: RiskLabel::for_avg_age(avg_age),
        rev_penalty_pct: (severity * 0.18).min(MAX_REV_PENALTY) * 100.0,
        util_drift_pct: (severity * 0.22).min(MAX_UTIL_DRIFT) * 100.0,
        reserve_pct: (severity * 0.08).min(MAX_RESERVE) * 100.0,
        stress_pct: (severity * 0.15).min(MAX_STRESS) * 100.0,
        multiple: valuation_multiple(severity),
    }
}
