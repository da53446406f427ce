//! Monthly snapshot output

use std::fmt;

use serde::{Deserialize, Serialize};

use super::HotWaterEstimate;
use crate::equipment::{AgeRisk, EquipmentRevenue, IndustryLifts, UtilityCosts};
use crate::finance::{CashInvestedBases, DebtStructure};

/// DSCR reported when there is no debt service to cover
pub const NO_DEBT_DSCR: f64 = 999.0;

/// Informational conditions detected while building a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotWarning {
    /// Washer and dryer counts sum to zero; equipment revenue is zero
    NoMachines,
}

impl fmt::Display for SnapshotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotWarning::NoMachines => f.write_str(
                "No machines defined: equipment counts are zero. Check the equipment table or re-import valid data.",
            ),
        }
    }
}

/// Monthly replacement reserve
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplacementReserve {
    /// Installed equipment value spread over useful life
    pub base: f64,
    /// Age-risk share of gross revenue
    pub age_driven: f64,
    pub total: f64,
}

/// One month of operations, fully computed
///
/// All amounts are monthly unless noted. Rebuilt from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    // Revenue
    pub base_revenue: f64,
    pub equipment_revenue: EquipmentRevenue,
    pub wash_fold_revenue: f64,
    pub vend_revenue_gross: f64,
    /// Lift detail when lifts are enabled
    pub lifts: Option<IndustryLifts>,
    pub total_lift: f64,
    /// Revenue after lifts and the age-risk penalty
    pub gross_revenue: f64,
    /// Revenue after lifts, before the age-risk penalty
    pub gross_revenue_pre_risk: f64,

    pub age_risk: AgeRisk,
    pub replacement_reserve: ReplacementReserve,

    // Operating expenses
    pub rent: f64,
    pub labor_cost: f64,
    /// Utilities including hot-water gas and age drift
    pub utilities: UtilityCosts,
    pub hot_water: HotWaterEstimate,
    pub maintenance: f64,
    pub vend_cogs: f64,
    pub total_opex: f64,
    pub ebitda: f64,

    // Capital structure
    pub project_cost: f64,
    /// Cash down payment as entered
    pub cash_invested: f64,
    pub cash_bases: CashInvestedBases,
    pub debt: DebtStructure,

    // Returns and coverage
    pub cash_flow: f64,
    pub dscr: f64,
    pub stressed_dscr: f64,
    /// Annualized cash-on-cash (%) against the displayed cash-invested basis
    pub cash_on_cash: f64,
    /// Annualized cash-on-cash (%) against the cash down payment only
    pub cash_on_cash_equity_only: f64,

    // Valuation
    pub valuation_multiple: f64,
    pub industry_valuation: f64,

    pub warnings: Vec<SnapshotWarning>,
}

impl Snapshot {
    pub fn total_debt_service(&self) -> f64 {
        self.debt.total_debt_service
    }

    pub fn has_warning(&self, warning: SnapshotWarning) -> bool {
        self.warnings.contains(&warning)
    }

    /// Annual EBITDA at the snapshot run rate
    pub fn annual_ebitda(&self) -> f64 {
        self.ebitda * 12.0
    }
}
