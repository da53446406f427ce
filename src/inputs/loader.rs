//! JSON scenario loading
//!
//! Two file shapes are supported:
//! - a structured scenario matching [`ProFormaInputs`] (any group may be omitted)
//! - a flat form export `{ "days": "30", "rateElec": 0.32, ... }` read through [`FormValues`]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde_json::Value;

use super::{FormValues, ProFormaInputs};
use crate::error::LoadError;

/// Load a structured scenario file
pub fn load_inputs_json<P: AsRef<Path>>(path: P) -> Result<ProFormaInputs, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let inputs = inputs_from_reader(BufReader::new(file))?;
    debug!(
        "Loaded scenario from {} ({} washer tiers, {} dryer tiers)",
        path.display(),
        inputs.washers.len(),
        inputs.dryers.len()
    );
    Ok(inputs)
}

/// Parse a structured scenario from any reader
pub fn inputs_from_reader<R: Read>(reader: R) -> Result<ProFormaInputs, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a flat form export
pub fn load_form_json<P: AsRef<Path>>(path: P) -> Result<FormValues, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    form_from_value(&value)
}

/// Convert a JSON object of scalars into form values
///
/// Strings are kept verbatim, numbers and booleans are stored as their text,
/// null becomes blank. Nested values are rejected.
pub fn form_from_value(value: &Value) -> Result<FormValues, LoadError> {
    let object = value.as_object().ok_or_else(|| LoadError::InvalidValue {
        field: "form".to_string(),
        message: "expected a JSON object of field values".to_string(),
    })?;

    let mut form = FormValues::new();
    for (id, field) in object {
        let text = match field {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(LoadError::InvalidValue {
                    field: id.clone(),
                    message: "expected a scalar value".to_string(),
                })
            }
        };
        form.set(id.as_str(), text);
    }

    Ok(form)
}
