//! Monthly snapshot composition
//!
//! The steps run in a fixed order because later adjustments depend on earlier
//! figures: lifts are computed on base revenue, the age penalty applies after
//! lifts, the age reserve uses post-penalty revenue, and maintenance uses base
//! revenue before either.

use log::{debug, warn};

use super::types::{ReplacementReserve, Snapshot, SnapshotWarning, NO_DEBT_DSCR};
use super::hot_water::estimate_hot_water;
use crate::equipment::{
    all_machines, calc_age_risk, calculate_equipment_revenue, calculate_industry_lifts,
    calculate_maintenance_costs, calculate_utility_costs, Machine,
};
use crate::finance::{get_cash_invested_bases, structure_debt};
use crate::inputs::ProFormaInputs;

/// Build the full monthly snapshot for a set of inputs
pub fn calculate_snapshot(inputs: &ProFormaInputs) -> Snapshot {
    let days = inputs.days_per_month;
    let washers = &inputs.washers;
    let dryers = &inputs.dryers;

    let mut warnings = Vec::new();
    if inputs.total_machines() == 0.0 {
        warn!("No machines defined: equipment counts are zero, equipment revenue will be zero");
        warnings.push(SnapshotWarning::NoMachines);
    }

    // Revenue
    let equipment_revenue = calculate_equipment_revenue(washers, dryers, days);
    let wash_fold_revenue = inputs.wash_fold.monthly_revenue(days);
    let vend_revenue_gross = inputs.vending.monthly_revenue;
    let vend_cogs = inputs.vending.cogs();

    // Vending counts gross here; its COGS is an operating expense
    let base_revenue = equipment_revenue.total + wash_fold_revenue + vend_revenue_gross;
    let age_risk = calc_age_risk(washers, dryers);

    // Lifts are sized on base revenue, before the age penalty
    let mut gross_revenue = base_revenue;
    let lifts = if inputs.lifts.enabled {
        let lifts = calculate_industry_lifts(
            base_revenue,
            inputs.lifts.retool_budget,
            inputs.lifts.brand_budget,
        );
        gross_revenue += lifts.total_lift;
        Some(lifts)
    } else {
        None
    };
    let total_lift = lifts.map(|l| l.total_lift).unwrap_or(0.0);

    // Aged fleets lose a share of revenue
    let gross_revenue_pre_risk = gross_revenue;
    if age_risk.rev_penalty_pct > 0.0 {
        gross_revenue *= 1.0 - age_risk.rev_penalty_pct / 100.0;
    }

    // Replacement reserve
    let wash_ppe = inputs
        .equipment_costs
        .installed_value(washers.iter().map(|w| w as &dyn Machine));
    let dry_ppe = inputs
        .equipment_costs
        .installed_value(dryers.iter().map(|d| d as &dyn Machine));
    let washer_life = inputs.equipment_life.washer_years.max(1.0);
    let dryer_life = inputs.equipment_life.dryer_years.max(1.0);
    // Straight-line replacement of installed value, plus an age-driven share of revenue
    let base_reserve = ((wash_ppe / washer_life) + (dry_ppe / dryer_life)) / 12.0;
    let age_reserve = gross_revenue * (age_risk.reserve_pct / 100.0);
    let replacement_reserve = ReplacementReserve {
        base: base_reserve,
        age_driven: age_reserve,
        total: base_reserve + age_reserve,
    };

    // Operating expenses
    let rent = inputs.operating.rent;
    let labor_cost = inputs.operating.monthly_labor(days);

    let efficiency = inputs.lifts.active_efficiency();
    let mut utilities = calculate_utility_costs(washers, dryers, &inputs.rates, days, &efficiency);

    let hot_water = estimate_hot_water(
        washers,
        days,
        &inputs.hot_water,
        inputs.rates.gas,
        efficiency.gas,
    );
    utilities.add_gas(hot_water.cost);

    // Drift applies to every utility line, hot water included

    if age_risk.util_drift_pct > 0.0 {
        utilities.apply_drift(age_risk.util_drift_pct);
    }

    // Maintenance tracks base revenue, not lifted or penalized revenue
    let maintenance = calculate_maintenance_costs(
        base_revenue,
        inputs.operating.maint_base_pct,
        inputs.operating.maint_age_uplift_pct,
        washers,
        dryers,
    );

    let total_opex = rent + labor_cost + utilities.total + maintenance + vend_cogs;
    let ebitda = gross_revenue - total_opex;

    // Debt and coverage
    let debt = structure_debt(&inputs.financing);
    let debt_service = debt.total_debt_service;

    // Monthly cash flow after debt service and the reserve
    let cash_flow = ebitda - debt_service - replacement_reserve.total;
    // Stressed coverage haircuts EBITDA by the age stress
    let (dscr, stressed_dscr) = if debt_service > 0.0 {
        (
            ebitda * 12.0 / (debt_service * 12.0),
            (ebitda * (1.0 - age_risk.stress_pct / 100.0)) / debt_service,
        )
    } else {
        (NO_DEBT_DSCR, NO_DEBT_DSCR)
    };

    // Returns
    let cash_bases = get_cash_invested_bases(&inputs.financing, &inputs.lifts);
    let cash_on_cash_equity_only = annualized_return_pct(cash_flow, cash_bases.equity_only);
    let cash_on_cash = annualized_return_pct(cash_flow, cash_bases.displayed);

    // Valuation in months of EBITDA
    let valuation_multiple = age_risk.multiple;
    let industry_valuation = ebitda * valuation_multiple;

    debug!(
        "Snapshot: {} units, revenue={:.2}, opex={:.2}, ebitda={:.2}, debt_service={:.2}, risk={}",
        all_machines(washers, dryers).map(|m| m.count()).sum::<f64>(),
        gross_revenue,
        total_opex,
        ebitda,
        debt_service,
        age_risk.label
    );

    Snapshot {
        base_revenue,
        equipment_revenue,
        wash_fold_revenue,
        vend_revenue_gross,
        lifts,
        total_lift,
        gross_revenue,
        gross_revenue_pre_risk,
        age_risk,
        replacement_reserve,
        rent,
        labor_cost,
        utilities,
        hot_water,
        maintenance,
        vend_cogs,
        total_opex,
        ebitda,
        project_cost: inputs.financing.project_cost,
        cash_invested: inputs.financing.cash_invested,
        cash_bases,
        debt,
        cash_flow,
        dscr,
        stressed_dscr,
        cash_on_cash,
        cash_on_cash_equity_only,
        valuation_multiple,
        industry_valuation,
        warnings,
    }
}

/// Monthly cash flow annualized as a percentage of `basis`; 0 for an empty basis
fn annualized_return_pct(monthly_cash_flow: f64, basis: f64) -> f64 {
    if basis > 0.0 {
        (monthly_cash_flow * 12.0 / basis) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{Dryer, RiskLabel, Washer};
    use crate::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_store_snapshot() {
        let snapshot = calculate_snapshot(&presets::canonical_store());

        assert_relative_eq!(snapshot.equipment_revenue.wash_revenue, 6889.5, max_relative = 1e-12);
        assert_relative_eq!(snapshot.equipment_revenue.dry_revenue, 18855.0, max_relative = 1e-12);
        assert_relative_eq!(snapshot.base_revenue, 37204.5, max_relative = 1e-12);
        assert_relative_eq!(snapshot.total_lift, 10510.27125, max_relative = 1e-12);
        assert_relative_eq!(snapshot.gross_revenue, 47714.77125, max_relative = 1e-12);
        assert_relative_eq!(snapshot.replacement_reserve.total, 2236.1990950226245, max_relative = 1e-10);
        assert_relative_eq!(snapshot.utilities.elec, 366.88128, max_relative = 1e-10);
        assert_relative_eq!(snapshot.utilities.gas, 1267.58653164, max_relative = 1e-10);
        assert_relative_eq!(snapshot.utilities.water, 633.879, max_relative = 1e-10);
        assert_relative_eq!(snapshot.maintenance, 2976.36, max_relative = 1e-10);
        assert_relative_eq!(snapshot.total_opex, 23144.70681164, max_relative = 1e-10);
        assert_relative_eq!(snapshot.ebitda, 24570.064438359997, max_relative = 1e-10);
        assert_relative_eq!(snapshot.cash_flow, 15881.84409351293, max_relative = 1e-9);
        assert_relative_eq!(snapshot.dscr, 3.8081189579201307, max_relative = 1e-9);
        assert_relative_eq!(snapshot.cash_on_cash, 66.65248942838386, max_relative = 1e-9);
        assert_relative_eq!(snapshot.industry_valuation, 1474203.8663016, max_relative = 1e-10);
        assert_eq!(snapshot.age_risk.label, RiskLabel::Low);
        assert_eq!(snapshot.valuation_multiple, 60.0);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn test_lifts_paid_in_cash_and_no_efficiency() {
        let mut inputs = presets::canonical_store();
        inputs.lifts.included_in_project = false;
        inputs.lifts.efficiency = Default::default();

        let snapshot = calculate_snapshot(&inputs);

        assert_relative_eq!(snapshot.utilities.total, 2584.9632405, max_relative = 1e-10);
        assert_relative_eq!(snapshot.ebitda, 24253.448009499996, max_relative = 1e-10);
        assert_eq!(snapshot.cash_bases.out_of_pocket, 385_934.0);
        assert_relative_eq!(snapshot.cash_on_cash, 48.397584036606034, max_relative = 1e-9);
        assert_relative_eq!(snapshot.stressed_dscr, 3.759046517424276, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_machines() {
        let mut inputs = presets::canonical_store();
        inputs.washers.clear();
        inputs.dryers.clear();

        let snapshot = calculate_snapshot(&inputs);

        assert_eq!(snapshot.equipment_revenue.total, 0.0);
        assert_eq!(
            snapshot.base_revenue,
            snapshot.wash_fold_revenue + snapshot.vend_revenue_gross
        );
        assert_relative_eq!(snapshot.base_revenue, 1.9 * 180.0 * 30.0 + 1200.0, epsilon = 1e-9);
        assert!(snapshot.has_warning(SnapshotWarning::NoMachines));
        assert_eq!(snapshot.hot_water.cost, 0.0);
    }

    #[test]
    fn test_ebitda_consistent_with_components() {
        let snapshot = calculate_snapshot(&presets::canonical_store());
        assert_eq!(snapshot.gross_revenue - snapshot.total_opex, snapshot.ebitda);
        assert_eq!(
            snapshot.rent + snapshot.labor_cost + snapshot.utilities.total + snapshot.maintenance + snapshot.vend_cogs,
            snapshot.total_opex
        );
    }

    #[test]
    fn test_lifts_disabled() {
        let mut inputs = presets::canonical_store();
        inputs.lifts.enabled = false;

        let snapshot = calculate_snapshot(&inputs);

        assert!(snapshot.lifts.is_none());
        assert_eq!(snapshot.total_lift, 0.0);
        assert_eq!(snapshot.gross_revenue, snapshot.base_revenue);
        // No retool efficiency either
        assert_eq!(snapshot.hot_water.gas_efficiency, 0.0);
    }

    #[test]
    fn test_aged_fleet_applies_penalty_drift_and_reserve() {
        let mut inputs = presets::canonical_store();
        inputs.washers = vec![
            Washer { age: 12.0, ..inputs.washers[0].clone() },
            Washer { age: 16.0, ..inputs.washers[1].clone() },
        ];
        inputs.dryers = vec![Dryer { age: 14.0, ..inputs.dryers[0].clone() }];

        let snapshot = calculate_snapshot(&inputs);
        let risk = snapshot.age_risk;

        assert!(risk.severity > 0.0);
        assert_relative_eq!(
            snapshot.gross_revenue,
            snapshot.gross_revenue_pre_risk * (1.0 - risk.rev_penalty_pct / 100.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            snapshot.replacement_reserve.age_driven,
            snapshot.gross_revenue * risk.reserve_pct / 100.0,
            max_relative = 1e-12
        );
        assert!(snapshot.stressed_dscr < snapshot.dscr);
        assert_eq!(snapshot.valuation_multiple, risk.multiple);
        assert!(snapshot.valuation_multiple < 60.0);
    }

    #[test]
    fn test_all_cash_deal_uses_dscr_sentinel() {
        let mut inputs = presets::canonical_store();
        inputs.financing.cash_invested = inputs.financing.project_cost;

        let snapshot = calculate_snapshot(&inputs);

        assert_eq!(snapshot.total_debt_service(), 0.0);
        assert_eq!(snapshot.dscr, NO_DEBT_DSCR);
        assert_eq!(snapshot.stressed_dscr, NO_DEBT_DSCR);
    }

    #[test]
    fn test_zero_cash_bases_give_zero_returns() {
        let mut inputs = presets::canonical_store();
        inputs.financing.cash_invested = 0.0;
        inputs.financing.working_capital = 0.0;
        inputs.financing.project_cost = 0.0;

        let snapshot = calculate_snapshot(&inputs);

        assert_eq!(snapshot.cash_on_cash, 0.0);
        assert_eq!(snapshot.cash_on_cash_equity_only, 0.0);
    }
}
