//! `ael eval`: evaluate an expression against a record built from the command line

use ael::{AelError, EngineConfig};
use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub struct EvalOptions {
    pub attributes: Vec<String>,
    pub record: Option<PathBuf>,
    pub boolean: bool,
    pub json: bool,
}

pub fn eval(source: &str, options: &EvalOptions, config: &EngineConfig) -> Result<()> {
    let mut record = match &options.record {
        Some(path) => load_record(path)?,
        None => IndexMap::new(),
    };
    // Flags override attributes loaded from the file
    record.extend(parse_attributes(&options.attributes)?);
    log::debug!("evaluating against {} attributes", record.len());

    let expression = ael::compile_with(source, config, None)?;

    if options.boolean {
        let value = expression.evaluate_boolean(&record).map_err(AelError::from)?;
        if options.json {
            println!("{}", serde_json::to_string(&value)?);
        } else {
            println!("{value}");
        }
        return Ok(());
    }

    let value = expression.evaluate(&record).map_err(AelError::from)?;
    if options.json {
        let report = serde_json::json!({
            "type": expression.result_type(),
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{value}");
        log::debug!("result type {}", expression.result_type());
    }
    Ok(())
}

/// Parse `name=value` pairs; the value may itself contain `=`
pub fn parse_attributes(pairs: &[String]) -> Result<IndexMap<String, String>> {
    let mut attributes = IndexMap::with_capacity(pairs.len());
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid attribute '{pair}', expected name=value");
        };
        if name.is_empty() {
            bail!("invalid attribute '{pair}', the name is empty");
        }
        attributes.insert(name.to_owned(), value.to_owned());
    }
    Ok(attributes)
}

/// Read a JSON object whose values are strings
fn load_record(path: &Path) -> Result<IndexMap<String, String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object of string values", path.display()))
}
