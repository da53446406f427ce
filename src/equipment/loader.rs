//! Load equipment tables from CSV
//!
//! Washer columns: `name,count,age,vend,turns,mins,kwh,therms,gals`
//! Dryer columns: `name,count,age,pricePerMin,avgMins,cycles,kwh,therms`
//! (`price_per_min` / `avg_mins` are accepted too)
//! Cost columns: `name,cost`
//!
//! Missing columns and blank cells read as zero.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;

use super::{Dryer, EquipmentCosts, Washer};
use crate::error::LoadError;

/// Raw row of the equipment cost table
#[derive(Debug, serde::Deserialize)]
struct CostRow {
    name: String,
    #[serde(deserialize_with = "crate::inputs::form::lenient_f64")]
    cost: f64,
}

fn read_rows<T, R>(reader: R) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: T = result?;
        rows.push(row);
    }

    Ok(rows)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::io(path, e))
}

/// Load washer tiers from any reader
pub fn washers_from_reader<R: Read>(reader: R) -> Result<Vec<Washer>, LoadError> {
    read_rows(reader)
}

/// Load dryer tiers from any reader
pub fn dryers_from_reader<R: Read>(reader: R) -> Result<Vec<Dryer>, LoadError> {
    read_rows(reader)
}

/// Load the replacement cost table from any reader
pub fn equipment_costs_from_reader<R: Read>(reader: R) -> Result<EquipmentCosts, LoadError> {
    let rows: Vec<CostRow> = read_rows(reader)?;
    Ok(rows.into_iter().map(|row| (row.name, row.cost)).collect())
}

pub fn load_washers<P: AsRef<Path>>(path: P) -> Result<Vec<Washer>, LoadError> {
    washers_from_reader(open(path.as_ref())?)
}

pub fn load_dryers<P: AsRef<Path>>(path: P) -> Result<Vec<Dryer>, LoadError> {
    dryers_from_reader(open(path.as_ref())?)
}

pub fn load_equipment_costs<P: AsRef<Path>>(path: P) -> Result<EquipmentCosts, LoadError> {
    equipment_costs_from_reader(open(path.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_washers() {
        let data = "name,count,age,vend,turns,mins,kwh,therms,gals\n\
                    20lb Top-Load,8,5,3.25,2.2,28,0.4,0,20\n\
                    27lb Top-Load,6,4,4.25,2.3,32,0.5,,25\n";
        let washers = washers_from_reader(data.as_bytes()).unwrap();

        assert_eq!(washers.len(), 2);
        assert_eq!(washers[0].name, "20lb Top-Load");
        assert_eq!(washers[0].vend, 3.25);
        assert_eq!(washers[1].therms, 0.0);
        assert_eq!(washers[1].gals, 25.0);
    }

    #[test]
    fn test_load_dryers_with_missing_columns() {
        let data = "name,count,price_per_min,avg_mins,cycles\nStack Dryer,12,0.25,35,3.8\n";
        let dryers = dryers_from_reader(data.as_bytes()).unwrap();

        assert_eq!(dryers.len(), 1);
        assert_eq!(dryers[0].count, 12.0);
        assert_eq!(dryers[0].price_per_min, 0.25);
        assert_eq!(dryers[0].age, 0.0);
        assert_eq!(dryers[0].kwh, 0.0);
    }

    #[test]
    fn test_load_costs() {
        let data = "name,cost\nStack Dryer,9000\nSingle Dryer, 12000\n";
        let costs = equipment_costs_from_reader(data.as_bytes()).unwrap();

        assert_eq!(costs.len(), 2);
        assert_eq!(costs.cost_of("Single Dryer"), 12000.0);
    }
}
