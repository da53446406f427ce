//! Multi-year projection output

use serde::{Deserialize, Serialize};

use crate::finance::TaxResult;

/// One projected operating year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// 1-based year index
    pub year: u32,

    pub revenue: f64,
    pub opex: f64,
    pub ebitda: f64,

    // Depreciation
    pub equipment_depreciation: f64,
    pub building_depreciation: f64,

    // Debt service split
    pub interest: f64,
    pub principal: f64,

    #[serde(flatten)]
    pub tax: TaxResult,

    /// After-tax income less principal
    pub cash_flow: f64,
    pub dscr: f64,
}

impl ProjectionYear {
    pub fn depreciation(&self) -> f64 {
        self.equipment_depreciation + self.building_depreciation
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly rows, year 1 first
    pub rows: Vec<ProjectionYear>,

    /// Running cash position; element 0 is the negative cash invested,
    /// so the length is `rows.len() + 1`
    pub cumulative_cash: Vec<f64>,

    /// First index at which cumulative cash is non-negative, or -1
    pub payback_years: i32,

    /// Net present value at the configured discount rate
    pub npv: f64,

    /// Annual IRR on cash invested, when one exists
    pub irr: Option<f64>,
}

impl ProjectionResult {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            rows: Vec::new(),
            cumulative_cash: vec![initial_cash],
            payback_years: -1,
            npv: 0.0,
            irr: None,
        }
    }

    /// Add a year row and extend the cumulative cash position
    pub fn add_row(&mut self, row: ProjectionYear) {
        let previous = self.cumulative_cash.last().copied().unwrap_or(0.0);
        self.cumulative_cash.push(previous + row.cash_flow);
        self.rows.push(row);
    }

    pub fn horizon(&self) -> usize {
        self.rows.len()
    }

    pub fn years(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn revenues(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.revenue).collect()
    }

    pub fn ebitdas(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ebitda).collect()
    }

    pub fn cash_flows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cash_flow).collect()
    }

    pub fn taxes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.tax.total_tax).collect()
    }

    pub fn after_tax_incomes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.tax.after_tax_income).collect()
    }

    pub fn dscrs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.dscr).collect()
    }

    /// Totals across the horizon
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_years: self.rows.len() as u32,
            total_revenue: self.rows.iter().map(|r| r.revenue).sum(),
            total_ebitda: self.rows.iter().map(|r| r.ebitda).sum(),
            total_tax: self.rows.iter().map(|r| r.tax.total_tax).sum(),
            total_cash_flow: self.rows.iter().map(|r| r.cash_flow).sum(),
            final_cumulative_cash: self.cumulative_cash.last().copied().unwrap_or(0.0),
            min_dscr: self
                .rows
                .iter()
                .map(|r| r.dscr)
                .fold(f64::INFINITY, f64::min),
            payback_years: self.payback_years,
            npv: self.npv,
            irr: self.irr,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_revenue: f64,
    pub total_ebitda: f64,
    pub total_tax: f64,
    pub total_cash_flow: f64,
    pub final_cumulative_cash: f64,
    /// `f64::INFINITY` when there are no rows
    pub min_dscr: f64,
    pub payback_years: i32,
    pub npv: f64,
    pub irr: Option<f64>,
}
