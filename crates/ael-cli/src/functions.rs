//! `ael functions`: list the built-in catalogue

use ael::Function;
use ael::eval::Signature;
use anyhow::Result;
use colored::Colorize;

pub fn list() -> Result<()> {
    for function in Function::ALL {
        let signature = function.signature();
        println!("{:<24} {}", function.name().cyan(), describe(function.name(), &signature));
    }
    Ok(())
}

/// Render a signature as `SUBJECT:name(PARAMS) -> RESULT`
fn describe(name: &str, signature: &Signature) -> String {
    let mut out = String::new();
    if let Some(subject) = signature.subject {
        out.push_str(&format!("{subject}:"));
    }

    let required = signature.min_args();
    let params: Vec<String> = signature
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let mut text = param.to_string();
            if signature.variadic && i + 1 == signature.params.len() {
                text.push_str("...");
            }
            if i >= required {
                text = format!("[{text}]");
            }
            text
        })
        .collect();
    out.push_str(&format!("{name}({})", params.join(", ")));

    match signature.returns {
        Some(returns) => out.push_str(&format!(" -> {returns}")),
        None => out.push_str(" -> type of argument"),
    }
    out
}
