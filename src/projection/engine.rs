//! Annual projection of a monthly snapshot over a multi-year horizon

use log::debug;

use super::irr::{calculate_irr, present_value};
use super::results::{ProjectionResult, ProjectionYear};
use crate::error::ProjectionError;
use crate::finance::{calculate_depreciation, calculate_taxes, DepreciationMethod, EntityType};
use crate::inputs::ProFormaInputs;
use crate::snapshot::{calculate_snapshot, Snapshot, NO_DEBT_DSCR};

/// Longest horizon a projection will run
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub horizon_years: u32,

    /// Annual revenue growth (decimal)
    pub revenue_growth: f64,

    /// Annual operating expense inflation (decimal)
    pub opex_inflation: f64,

    /// Discount rate for NPV (decimal)
    pub discount_rate: f64,

    // Depreciation
    pub depreciation_method: DepreciationMethod,
    pub equipment_life: u32,
    pub building_life: u32,
    /// Share of project cost depreciated as equipment
    pub equipment_share: f64,
    /// Share of project cost depreciated as building
    pub building_share: f64,

    // Tax
    pub federal_rate_pct: f64,
    pub state_rate_pct: f64,
    pub entity: EntityType,

    /// Shares of annual debt service booked as interest and principal
    pub interest_share: f64,
    pub principal_share: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: 10,
            revenue_growth: 0.025,
            opex_inflation: 0.03,
            discount_rate: 0.06,
            depreciation_method: DepreciationMethod::Macrs,
            equipment_life: 7,
            building_life: 39,
            equipment_share: 0.6,
            building_share: 0.4,
            federal_rate_pct: 21.0,
            state_rate_pct: 8.84,
            entity: EntityType::Llc,
            interest_share: 0.7,
            principal_share: 0.3,
        }
    }
}

impl ProjectionConfig {
    /// Take growth, horizon and tax settings from the inputs
    pub fn from_inputs(inputs: &ProFormaInputs) -> Self {
        Self {
            horizon_years: inputs.growth.horizon_years,
            revenue_growth: inputs.growth.revenue_growth_pct / 100.0,
            opex_inflation: inputs.growth.opex_inflation_pct / 100.0,
            depreciation_method: inputs.tax.method,
            equipment_life: inputs.tax.equipment_life,
            building_life: inputs.tax.building_life,
            federal_rate_pct: inputs.tax.federal_rate_pct,
            state_rate_pct: inputs.tax.state_rate_pct,
            entity: inputs.tax.entity,
            ..Self::default()
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project a snapshot year by year
    ///
    /// Revenue and opex grow from the snapshot's monthly run rate; debt
    /// service is flat. Cumulative cash starts at minus the displayed cash
    /// invested, while NPV discounts against the raw cash down payment.
    pub fn project(&self, snapshot: &Snapshot) -> Result<ProjectionResult, ProjectionError> {
        let cfg = &self.config;
        if cfg.horizon_years == 0 {
            return Err(ProjectionError::InvalidHorizon(cfg.horizon_years));
        }
        if cfg.horizon_years > MAX_HORIZON_YEARS {
            return Err(ProjectionError::HorizonTooLong(cfg.horizon_years));
        }

        let initial_cash = -snapshot.cash_bases.displayed;
        let mut result = ProjectionResult::new(initial_cash);

        for year in 1..=cfg.horizon_years {
            let row = self.project_year(snapshot, year);
            result.add_row(row);
        }

        // Discounting and returns over the completed rows
        result.payback_years = payback_index(&result.cumulative_cash);

        let cash_flows = result.cash_flows();
        result.npv = -snapshot.cash_invested + present_value(cfg.discount_rate, &cash_flows);

        // IRR is measured against the displayed cash basis
        let mut irr_flows = Vec::with_capacity(cash_flows.len() + 1);
        irr_flows.push(initial_cash);
        irr_flows.extend_from_slice(&cash_flows);
        result.irr = calculate_irr(&irr_flows);

        debug!(
            "Projected {} years: payback={}, npv={:.2}, irr={:?}",
            cfg.horizon_years, result.payback_years, result.npv, result.irr
        );

        Ok(result)
    }

    fn project_year(&self, snapshot: &Snapshot, year: u32) -> ProjectionYear {
        let cfg = &self.config;
        let elapsed = year as i32 - 1;

        // Year 1 is the snapshot run rate; growth compounds from year 2
        let revenue = snapshot.gross_revenue * 12.0 * (1.0 + cfg.revenue_growth).powi(elapsed);
        let opex = snapshot.total_opex * 12.0 * (1.0 + cfg.opex_inflation).powi(elapsed);
        let ebitda = revenue - opex;

        // Project cost split between equipment and building
        let equipment_basis = snapshot.project_cost * cfg.equipment_share;
        let building_basis = snapshot.project_cost * cfg.building_share;
        let equipment_depreciation =
            calculate_depreciation(equipment_basis, cfg.depreciation_method, cfg.equipment_life, year);
        let building_depreciation =
            calculate_depreciation(building_basis, DepreciationMethod::StraightLine, cfg.building_life, year);

        // Flat debt service, split by fixed interest/principal shares
        let annual_debt_service = snapshot.total_debt_service() * 12.0;
        let interest = annual_debt_service * cfg.interest_share;
        let principal = annual_debt_service * cfg.principal_share;

        let tax = calculate_taxes(
            ebitda,
            equipment_depreciation + building_depreciation,
            interest,
            cfg.federal_rate_pct,
            cfg.state_rate_pct,
            cfg.entity,
        );

        let dscr = if snapshot.total_debt_service() > 0.0 {
            ebitda / annual_debt_service
        } else {
            NO_DEBT_DSCR
        };

        ProjectionYear {
            year,
            revenue,
            opex,
            ebitda,
            equipment_depreciation,
            building_depreciation,
            interest,
            principal,
            tax,
            cash_flow: tax.after_tax_income - principal,
            dscr,
        }
    }
}

/// First index with non-negative cumulative cash, or -1
///
/// A position that is already non-negative at index 0 but ends negative also
/// reports -1.
fn payback_index(cumulative_cash: &[f64]) -> i32 {
    let last = cumulative_cash.last().copied().unwrap_or(0.0);
    match cumulative_cash.iter().position(|&c| c >= 0.0) {
        Some(0) if last < 0.0 => -1,
        Some(i) => i as i32,
        None => -1,
    }
}

/// Snapshot the inputs and project them with their own growth and tax settings
pub fn simulate_years(inputs: &ProFormaInputs) -> Result<ProjectionResult, ProjectionError> {
    let snapshot = calculate_snapshot(inputs);
    ProjectionEngine::new(ProjectionConfig::from_inputs(inputs)).project(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_store_projection() {
        let result = simulate_years(&presets::canonical_store()).unwrap();

        assert_eq!(result.horizon(), 10);
        assert_eq!(result.cumulative_cash.len(), 11);
        assert_eq!(result.cumulative_cash[0], -285_934.0);

        assert_relative_eq!(result.rows[0].revenue, 572577.255, max_relative = 1e-12);
        assert_relative_eq!(result.rows[0].ebitda, 294840.77326032, max_relative = 1e-10);
        assert_relative_eq!(result.rows[0].tax.total_tax, 41909.97608044159, max_relative = 1e-9);
        assert_relative_eq!(result.rows[0].cash_flow, 175506.54218198513, max_relative = 1e-9);
        assert_relative_eq!(result.rows[1].tax.total_tax, 24634.333349407963, max_relative = 1e-9);
        assert_relative_eq!(result.rows[9].revenue, 715070.5312037816, max_relative = 1e-10);
        assert_relative_eq!(result.rows[9].cash_flow, 189387.9799641751, max_relative = 1e-9);
        assert_relative_eq!(result.rows[0].dscr, 3.8081189579201316, max_relative = 1e-9);
        assert_relative_eq!(result.cumulative_cash[10], 1587135.4248727406, max_relative = 1e-9);

        assert_eq!(result.payback_years, 2);
        assert_relative_eq!(result.npv, 1116687.7068138337, max_relative = 1e-9);
        assert_relative_eq!(result.irr.unwrap(), 0.6439741967572062, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        let mut inputs = presets::canonical_store();
        inputs.growth.horizon_years = 0;

        assert_eq!(simulate_years(&inputs), Err(ProjectionError::InvalidHorizon(0)));
    }

    #[test]
    fn test_overlong_horizon_is_rejected() {
        let mut inputs = presets::canonical_store();
        inputs.growth.horizon_years = MAX_HORIZON_YEARS;
        assert_eq!(simulate_years(&inputs).unwrap().horizon(), 100);

        inputs.growth.horizon_years = MAX_HORIZON_YEARS + 1;
        assert_eq!(simulate_years(&inputs), Err(ProjectionError::HorizonTooLong(101)));

        let form: crate::FormValues = [("horizon", "1e12")].into_iter().collect();
        let inputs = form.to_inputs(Vec::new(), Vec::new(), Default::default());
        assert_eq!(simulate_years(&inputs), Err(ProjectionError::HorizonTooLong(u32::MAX)));
    }

    #[test]
    fn test_npv_matches_formula() {
        let inputs = presets::canonical_store();
        let snapshot = calculate_snapshot(&inputs);
        let result = simulate_years(&inputs).unwrap();

        let expected = result
            .cash_flows()
            .iter()
            .enumerate()
            .fold(-snapshot.cash_invested, |acc, (i, cf)| acc + cf / 1.06_f64.powi(i as i32 + 1));
        assert_relative_eq!(result.npv, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_depreciation_split() {
        let result = simulate_years(&presets::canonical_store()).unwrap();
        let project_cost = 1_043_735.0;

        assert_relative_eq!(result.rows[0].equipment_depreciation, project_cost * 0.6 * 0.1429, max_relative = 1e-12);
        assert_relative_eq!(result.rows[0].building_depreciation, project_cost * 0.4 / 39.0, max_relative = 1e-12);
        // MACRS schedule ends after year 8
        assert_eq!(result.rows[8].equipment_depreciation, 0.0);
    }

    #[test]
    fn test_unprofitable_store_never_pays_back() {
        let mut inputs = presets::canonical_store();
        inputs.operating.rent = 60_000.0;

        let result = simulate_years(&inputs).unwrap();

        assert!(*result.cumulative_cash.last().unwrap() < 0.0);
        assert_eq!(result.payback_years, -1);
    }

    #[test]
    fn test_payback_index() {
        assert_eq!(payback_index(&[-100.0, -20.0, 30.0]), 2);
        assert_eq!(payback_index(&[-100.0, -50.0]), -1);
        assert_eq!(payback_index(&[0.0, 10.0]), 0);
        assert_eq!(payback_index(&[0.0, -10.0]), -1);
        // recovery that later turns negative still reports the first crossing
        assert_eq!(payback_index(&[-100.0, 10.0, -5.0]), 1);
    }

    #[test]
    fn test_all_cash_deal_uses_dscr_sentinel() {
        let mut inputs = presets::canonical_store();
        inputs.financing.cash_invested = inputs.financing.project_cost;

        let result = simulate_years(&inputs).unwrap();

        assert!(result.dscrs().iter().all(|&d| d == NO_DEBT_DSCR));
        assert!(result.rows.iter().all(|r| r.interest == 0.0 && r.principal == 0.0));
    }
}
