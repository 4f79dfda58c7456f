//! `ael check`: compile an expression and report what it produces and reads

use crate::output;
use ael::EngineConfig;
use anyhow::Result;

pub fn check(source: &str, declared: &[String], json: bool, config: &EngineConfig) -> Result<()> {
    let declared: Vec<&str> = declared.iter().map(String::as_str).collect();
    let declared = (!declared.is_empty()).then_some(declared.as_slice());

    let expression = ael::compile_with(source, config, declared)?;

    if json {
        let report = serde_json::json!({
            "type": expression.result_type(),
            "boolean": expression.is_valid_for_boolean(),
            "attributes": expression.referenced_attributes(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", output::format_field("type", expression.result_type()));
    println!("{}", output::format_field("boolean", expression.is_valid_for_boolean()));
    let attributes = expression.referenced_attributes();
    if attributes.is_empty() {
        println!("{}", output::format_field("attributes", "(none)"));
    } else {
        println!("{}", output::format_field("attributes", attributes.join(", ")));
    }
    Ok(())
}
