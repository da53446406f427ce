//! Laundromat Pro-Forma CLI
//!
//! Runs the monthly snapshot and multi-year projection for a scenario and
//! prints the results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use laundromat_proforma::equipment::loader::{load_dryers, load_equipment_costs, load_washers};
use laundromat_proforma::inputs::{load_form_json, load_inputs_json};
use laundromat_proforma::projection::MAX_HORIZON_YEARS;
use laundromat_proforma::report::{hot_water_line, kpi_summary, projection_table, save_projection_csv, ReportEnvelope};
use laundromat_proforma::{evaluate, presets, ProFormaInputs};

#[derive(Parser, Debug)]
#[command(
    name = "laundromat_proforma",
    about = "Monthly snapshot and multi-year pro-forma for a laundromat acquisition"
)]
struct Args {
    #[arg(long, help = "Structured JSON scenario; defaults to the canonical store")]
    input: Option<PathBuf>,

    #[arg(long, conflicts_with = "input", help = "Flat JSON form export (field id -> value)")]
    form: Option<PathBuf>,

    #[arg(long, help = "Washer table CSV (name,count,age,vend,turns,mins,kwh,therms,gals)")]
    washers: Option<PathBuf>,

    #[arg(long, help = "Dryer table CSV (name,count,age,price_per_min,avg_mins,cycles,kwh,therms)")]
    dryers: Option<PathBuf>,

    #[arg(long, help = "Equipment cost CSV (name,cost)")]
    costs: Option<PathBuf>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_HORIZON_YEARS as i64),
        help = "Projection horizon in years"
    )]
    horizon: Option<u32>,

    #[arg(long, help = "Print the full report as JSON")]
    json: bool,

    #[arg(long, help = "Write projection rows to this CSV file")]
    csv: Option<PathBuf>,
}

fn load_scenario(args: &Args) -> Result<ProFormaInputs> {
    let mut inputs = if let Some(path) = &args.input {
        load_inputs_json(path).with_context(|| format!("loading scenario {}", path.display()))?
    } else if let Some(path) = &args.form {
        let form = load_form_json(path).with_context(|| format!("loading form {}", path.display()))?;
        info!("Loaded {} form fields from {}", form.len(), path.display());
        form.to_inputs(
            presets::canonical_washers(),
            presets::canonical_dryers(),
            presets::canonical_equipment_costs(),
        )
    } else {
        presets::canonical_store()
    };

    if let Some(path) = &args.washers {
        inputs.washers = load_washers(path).with_context(|| format!("loading washers {}", path.display()))?;
    }
    if let Some(path) = &args.dryers {
        inputs.dryers = load_dryers(path).with_context(|| format!("loading dryers {}", path.display()))?;
    }
    if let Some(path) = &args.costs {
        inputs.equipment_costs =
            load_equipment_costs(path).with_context(|| format!("loading equipment costs {}", path.display()))?;
    }
    if let Some(horizon) = args.horizon {
        inputs.growth.horizon_years = horizon;
    }

    Ok(inputs)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let inputs = load_scenario(&args)?;
    let result = evaluate(&inputs).context("running projection")?;

    if let Some(path) = &args.csv {
        save_projection_csv(path, &result.projection)
            .with_context(|| format!("writing projection CSV {}", path.display()))?;
        info!("Wrote {} projection rows to {}", result.projection.horizon(), path.display());
    }

    if args.json {
        let envelope = ReportEnvelope::new(result.snapshot, result.projection);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    println!("Laundromat Pro-Forma v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");

    for warning in &result.snapshot.warnings {
        println!("WARNING: {}", warning);
    }

    print!("{}", kpi_summary(&result.snapshot, &result.projection));
    println!("{}", hot_water_line(&result.snapshot.hot_water));
    println!();
    println!("Projection ({} years):", result.projection.horizon());
    print!("{}", projection_table(&result.projection));

    Ok(())
}
