//! Loaders for the item list and configuration files.
//!
//! Item file: one `<weight> <value>` pair per line, whitespace separated.
//! Line order is catalog order. Blank lines are skipped.
//!
//! ```text
//! 12 4
//! 2 2
//! 1 1
//! ```
//!
//! Config file: `name = value` lines in any order. `#` starts a comment
//! line.
//!
//! ```text
//! knapsack_capacity = 15
//! initial_population_count = 40
//! mutation_probability = 0.1
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{GaError, Result};
use crate::ga::{Catalog, GaConfig, Item};

/// Parses an item list.
pub fn parse_items(text: &str) -> Result<Catalog> {
    let mut items = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(weight) = fields.next() else {
            continue;
        };
        let Some(value) = fields.next() else {
            return Err(parse_error(line_no, "expected `<weight> <value>`"));
        };
        if fields.next().is_some() {
            return Err(parse_error(line_no, "expected exactly two fields"));
        }
        items.push(Item::new(
            parse_field(weight, "weight", line_no)?,
            parse_field(value, "value", line_no)?,
        ));
    }
    Ok(Catalog::new(items))
}

/// Parses a configuration file into a [`GaConfig`].
///
/// Recognised names:
///
/// | name | aliases |
/// |------|---------|
/// | `capacity` | `knapsack_capacity` |
/// | `population_count` | `initial_population_count`, `population_size` |
/// | `mutation_rate` | `mutation_probability` |
/// | `generations` (optional) | `max_generations` |
/// | `seed` (optional) | |
///
/// The first three are required.
pub fn parse_config(text: &str) -> Result<GaConfig> {
    let mut config = GaConfig::default();
    let mut capacity = None;
    let mut population = None;
    let mut mutation = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            return Err(parse_error(line_no, "expected `name = value`"));
        };
        let (name, value) = (name.trim(), value.trim());

        match name {
            "capacity" | "knapsack_capacity" => {
                capacity = Some(parse_field(value, name, line_no)?);
            }
            "population_count" | "initial_population_count" | "population_size" => {
                population = Some(parse_field(value, name, line_no)?);
            }
            "mutation_rate" | "mutation_probability" => {
                mutation = Some(parse_field::<f64>(value, name, line_no)?);
            }
            "generations" | "max_generations" => {
                config.max_generations = parse_field(value, name, line_no)?;
            }
            "seed" => {
                config.seed = Some(parse_field(value, name, line_no)?);
            }
            other => {
                return Err(parse_error(line_no, format!("unknown setting `{other}`")));
            }
        }
    }

    config.capacity = capacity.ok_or_else(|| missing("capacity"))?;
    config.population_size = population.ok_or_else(|| missing("population_count"))?;
    config.mutation_rate = mutation.ok_or_else(|| missing("mutation_rate"))?;
    config.validate()?;
    Ok(config)
}

/// Reads and parses an item file.
pub fn load_items(path: impl AsRef<Path>) -> Result<Catalog> {
    parse_items(&read(path.as_ref())?)
}

/// Reads and parses a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<GaConfig> {
    parse_config(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GaError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field<T: FromStr>(raw: &str, name: &str, line: usize) -> Result<T> {
    raw.parse()
        .map_err(|_| parse_error(line, format!("invalid {name} `{raw}`")))
}

fn parse_error(line: usize, message: impl Into<String>) -> GaError {
    GaError::Parse {
        line,
        message: message.into(),
    }
}

fn missing(name: &str) -> GaError {
    GaError::MissingSetting(name.to_string())
}
