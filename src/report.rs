//! Text, JSON and CSV rendering of calculation results
//!
//! Nothing here feeds back into the calculators; every function takes finished
//! results and formats them.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionResult, ProjectionYear};
use crate::snapshot::{HotWaterEstimate, Snapshot};

/// One-line description of the hot-water heating estimate
pub fn hot_water_line(estimate: &HotWaterEstimate) -> String {
    let retool = if estimate.gas_efficiency > 0.0 {
        format!(" ({:.0}% w/retool)", (1.0 - estimate.gas_efficiency) * 100.0)
    } else {
        String::new()
    };
    format!(
        "Hot water: {:.0} gal × {:.0}% eff = {:.2} therms = ${:.2}/mo{}",
        estimate.hot_gallons,
        estimate.heater_efficiency * 100.0,
        estimate.therms,
        estimate.cost,
        retool
    )
}

/// Payback as text; -1 means the investment never pays back
pub fn payback_label(payback_years: i32) -> String {
    if payback_years < 0 {
        "not reached".to_string()
    } else {
        format!("{} yrs", payback_years)
    }
}

/// Key monthly and projection metrics, one per line
pub fn kpi_summary(snapshot: &Snapshot, projection: &ProjectionResult) -> String {
    let mut out = String::new();
    let risk = &snapshot.age_risk;

    let _ = writeln!(out, "Gross Revenue (monthly)     {:>14.2}", snapshot.gross_revenue);
    let _ = writeln!(out, "  Equipment                 {:>14.2}", snapshot.equipment_revenue.total);
    let _ = writeln!(out, "  Wash & Fold               {:>14.2}", snapshot.wash_fold_revenue);
    let _ = writeln!(out, "  Vending                   {:>14.2}", snapshot.vend_revenue_gross);
    let _ = writeln!(out, "  Industry Lifts            {:>14.2}", snapshot.total_lift);
    let _ = writeln!(out, "Total Opex (monthly)        {:>14.2}", snapshot.total_opex);
    let _ = writeln!(out, "Monthly EBITDA              {:>14.2}", snapshot.ebitda);
    let _ = writeln!(out, "Annual EBITDA (run rate)    {:>14.2}", snapshot.annual_ebitda());
    let _ = writeln!(out, "Replacement Reserve         {:>14.2}", snapshot.replacement_reserve.total);
    let _ = writeln!(out, "Total Debt Service (annual) {:>14.2}", snapshot.total_debt_service() * 12.0);
    let _ = writeln!(out, "Monthly Cash Flow           {:>14.2}", snapshot.cash_flow);
    let _ = writeln!(out, "DSCR                        {:>14.2}", snapshot.dscr);
    let _ = writeln!(out, "Stressed DSCR               {:>14.2}", snapshot.stressed_dscr);
    let _ = writeln!(out, "Cash Invested (displayed)   {:>14.2}", snapshot.cash_bases.displayed);
    let _ = writeln!(out, "Cash-on-Cash (%)            {:>14.2}", snapshot.cash_on_cash);
    let _ = writeln!(out, "Cash-on-Cash, equity (%)    {:>14.2}", snapshot.cash_on_cash_equity_only);
    let _ = writeln!(
        out,
        "Equipment Age Risk          {:>14}  (avg {:.1} yrs, oldest {:.0}, severity {:.2})",
        risk.label.as_str(),
        risk.avg_age,
        risk.oldest,
        risk.severity
    );
    let _ = writeln!(out, "Valuation Multiple (mo)     {:>14.1}", snapshot.valuation_multiple);
    let _ = writeln!(out, "Industry Valuation          {:>14.2}", snapshot.industry_valuation);
    let _ = writeln!(out, "Payback                     {:>14}", payback_label(projection.payback_years));
    let _ = writeln!(out, "NPV @ 6%                    {:>14.2}", projection.npv);
    match projection.irr {
        Some(irr) => {
            let _ = writeln!(out, "IRR (%)                     {:>14.2}", irr * 100.0);
        }
        None => {
            let _ = writeln!(out, "IRR (%)                     {:>14}", "n/a");
        }
    }

    out
}

/// Year-by-year projection table
pub fn projection_table(projection: &ProjectionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>12} {:>14} {:>14} {:>8}",
        "Year", "Revenue", "EBITDA", "Taxes", "Cash Flow", "Cumulative", "DSCR"
    );
    let _ = writeln!(out, "{}", "-".repeat(86));

    for (row, cumulative) in projection.rows.iter().zip(projection.cumulative_cash.iter().skip(1)) {
        let _ = writeln!(
            out,
            "{:>4} {:>14.0} {:>14.0} {:>12.0} {:>14.0} {:>14.0} {:>8.2}",
            row.year,
            row.revenue,
            row.ebitda,
            row.tax.total_tax,
            row.cash_flow,
            cumulative,
            row.dscr
        );
    }

    out
}

/// Flat CSV record for one projection year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionCsvRow {
    pub year: u32,
    pub revenue: f64,
    pub opex: f64,
    pub ebitda: f64,
    pub equipment_depreciation: f64,
    pub building_depreciation: f64,
    pub total_depreciation: f64,
    pub interest: f64,
    pub principal: f64,
    pub taxable_income: f64,
    pub total_tax: f64,
    pub after_tax_income: f64,
    pub cash_flow: f64,
    pub cumulative_cash: f64,
    pub dscr: f64,
}

impl ProjectionCsvRow {
    fn from_year(row: &ProjectionYear, cumulative_cash: f64) -> Self {
        Self {
            year: row.year,
            revenue: row.revenue,
            opex: row.opex,
            ebitda: row.ebitda,
            equipment_depreciation: row.equipment_depreciation,
            building_depreciation: row.building_depreciation,
            total_depreciation: row.depreciation(),
            interest: row.interest,
            principal: row.principal,
            taxable_income: row.tax.taxable_income,
            total_tax: row.tax.total_tax,
            after_tax_income: row.tax.after_tax_income,
            cash_flow: row.cash_flow,
            cumulative_cash,
            dscr: row.dscr,
        }
    }
}

/// Write projection rows as CSV to any writer
pub fn write_projection_csv<W: io::Write>(writer: W, projection: &ProjectionResult) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (row, cumulative) in projection.rows.iter().zip(projection.cumulative_cash.iter().skip(1)) {
        wtr.serialize(ProjectionCsvRow::from_year(row, *cumulative))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write projection rows as CSV to a file
pub fn save_projection_csv(path: impl AsRef<Path>, projection: &ProjectionResult) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path.as_ref())?;
    write_projection_csv(file, projection)
}

/// Complete run result as emitted by the CLI and the Lambda handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub generated_at: DateTime<Utc>,
    pub snapshot: Snapshot,
    pub projection: ProjectionResult,
    /// Rendered hot-water line for display
    pub hot_water_note: String,
    /// Rendered warning messages
    pub warnings: Vec<String>,
}

impl ReportEnvelope {
    pub fn new(snapshot: Snapshot, projection: ProjectionResult) -> Self {
        let hot_water_note = hot_water_line(&snapshot.hot_water);
        let warnings = snapshot.warnings.iter().map(|w| w.to_string()).collect();
        Self {
            generated_at: Utc::now(),
            snapshot,
            projection,
            hot_water_note,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::projection::simulate_years;
    use crate::snapshot::calculate_snapshot;

    #[test]
    fn test_hot_water_line_with_retool() {
        let estimate = HotWaterEstimate {
            washer_gallons: 15_000.0,
            hot_gallons: 9_000.0,
            therms: 60.98625,
            cost: 96.6,
            heater_efficiency: 0.8,
            gas_efficiency: 0.12,
        };
        assert_eq!(
            hot_water_line(&estimate),
            "Hot water: 9000 gal × 80% eff = 60.99 therms = $96.60/mo (88% w/retool)"
        );
    }

    #[test]
    fn test_hot_water_line_without_retool() {
        let estimate = HotWaterEstimate { heater_efficiency: 0.8, ..Default::default() };
        assert!(!hot_water_line(&estimate).contains("retool"));
    }

    #[test]
    fn test_payback_label() {
        assert_eq!(payback_label(-1), "not reached");
        assert_eq!(payback_label(2), "2 yrs");
    }

    #[test]
    fn test_kpi_summary_for_preset() {
        let inputs = presets::canonical_store();
        let snapshot = calculate_snapshot(&inputs);
        let projection = simulate_years(&inputs).unwrap();

        let text = kpi_summary(&snapshot, &projection);
        assert!(text.contains("Monthly EBITDA"));
        assert!(text.contains("24570.06"));
        assert!(text.contains("294840.77"));
        assert!(text.contains("66.65"));
        assert!(text.contains("LOW"));
        assert!(text.contains("2 yrs"));
    }

    #[test]
    fn test_projection_csv_has_row_per_year() {
        let projection = simulate_years(&presets::canonical_store()).unwrap();

        let mut buf = Vec::new();
        write_projection_csv(&mut buf, &projection).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("year,revenue,opex,ebitda"));
        assert!(lines[1].starts_with("1,"));
        assert!(lines[10].starts_with("10,"));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let total_col = headers.iter().position(|h| h == "total_depreciation").unwrap();
        let first = reader.records().next().unwrap().unwrap();
        let total: f64 = first[total_col].parse().unwrap();
        assert!((total - projection.rows[0].depreciation()).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_serializes() {
        let inputs = presets::canonical_store();
        let envelope = ReportEnvelope::new(calculate_snapshot(&inputs), simulate_years(&inputs).unwrap());

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["projection"]["payback_years"], 2);
        assert_eq!(json["projection"]["rows"].as_array().unwrap().len(), 10);
        assert!(json["hot_water_note"].as_str().unwrap().starts_with("Hot water:"));
    }
}
