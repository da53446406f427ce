//! Sensitivity of returns to vend pricing and cash down payment
//!
//! Scales every washer vend price and dryer per-minute price together, and
//! the cash down payment separately, then evaluates the grid in parallel.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use laundromat_proforma::inputs::load_inputs_json;
use laundromat_proforma::report::payback_label;
use laundromat_proforma::{presets, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "sensitivity", about = "Vend price × cash down sensitivity grid")]
struct Args {
    #[arg(long, help = "Structured JSON scenario; defaults to the canonical store")]
    input: Option<PathBuf>,

    #[arg(long, value_delimiter = ',', default_values_t = vec![0.9, 1.0, 1.1, 1.2])]
    vend: Vec<f64>,

    #[arg(long, value_delimiter = ',', default_values_t = vec![0.75, 1.0, 1.25])]
    cash: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let base = match &args.input {
        Some(path) => load_inputs_json(path).with_context(|| format!("loading scenario {}", path.display()))?,
        None => presets::canonical_store(),
    };
    let runner = ScenarioRunner::new(base);

    let grid: Vec<(f64, f64)> = args
        .vend
        .iter()
        .flat_map(|&v| args.cash.iter().map(move |&c| (v, c)))
        .collect();

    let start = Instant::now();
    let results = runner.sweep(&grid, |inputs, &(vend_mult, cash_mult)| {
        for washer in &mut inputs.washers {
            washer.vend *= vend_mult;
        }
        for dryer in &mut inputs.dryers {
            dryer.price_per_min *= vend_mult;
        }
        inputs.financing.cash_invested *= cash_mult;
    });

    println!(
        "{:>6} {:>6} {:>14} {:>10} {:>16} {:>12}",
        "Vend", "Cash", "EBITDA/mo", "CoC %", "NPV", "Payback"
    );
    println!("{}", "-".repeat(70));

    for ((vend_mult, cash_mult), result) in grid.iter().zip(results) {
        let proforma = result.context("running projection")?;
        println!(
            "{:>6.2} {:>6.2} {:>14.2} {:>10.2} {:>16.2} {:>12}",
            vend_mult,
            cash_mult,
            proforma.snapshot.ebitda,
            proforma.snapshot.cash_on_cash,
            proforma.projection.npv,
            payback_label(proforma.projection.payback_years)
        );
    }

    println!("\nEvaluated {} cases in {:?}", grid.len(), start.elapsed());
    Ok(())
}
