//! Cash-invested bases for return ratios

use serde::{Deserialize, Serialize};

use crate::inputs::{Financing, LiftSettings};

/// Minimum equity assumed for the displayed cash-invested figure
pub const MIN_EQUITY_FLOOR_PCT: f64 = 0.20;

/// The three cash-invested denominators plus how they were built
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashInvestedBases {
    /// Cash down payment only
    pub equity_only: f64,
    /// Cash down + working capital + lift budgets paid outside the project
    pub out_of_pocket: f64,
    /// Out-of-pocket, but never below the equity floor
    pub displayed: f64,
    pub breakdown: CashBreakdown,
}

/// Components behind [`CashInvestedBases`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashBreakdown {
    pub cash_down: f64,
    pub working_capital: f64,
    /// Retool + brand budgets when they are not financed inside the project
    pub lifts_cash: f64,
    pub lifts_in_project: bool,
    pub min_equity_floor_pct: f64,
    pub equity_floor: f64,
}

/// Cash-invested bases for the deal
pub fn get_cash_invested_bases(financing: &Financing, lifts: &LiftSettings) -> CashInvestedBases {
    let cash_down = financing.cash_invested;
    let working_capital = financing.working_capital;

    let lifts_cash = if lifts.included_in_project {
        0.0
    } else {
        lifts.retool_budget + lifts.brand_budget
    };

    let out_of_pocket = (cash_down + working_capital + lifts_cash).max(0.0);

    let equity_floor = if financing.project_cost > 0.0 {
        financing.project_cost * MIN_EQUITY_FLOOR_PCT
    } else {
        0.0
    };

    CashInvestedBases {
        equity_only: cash_down.max(0.0),
        out_of_pocket,
        displayed: out_of_pocket.max(equity_floor),
        breakdown: CashBreakdown {
            cash_down,
            working_capital,
            lifts_cash,
            lifts_in_project: lifts.included_in_project,
            min_equity_floor_pct: MIN_EQUITY_FLOOR_PCT,
            equity_floor,
        },
    }
}
