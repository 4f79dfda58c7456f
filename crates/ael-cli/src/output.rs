//! Output formatting utilities

use ael::AelError;
use colored::Colorize;
use std::io::IsTerminal;

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stderr().is_terminal()),
    }
}

/// Install a `RUST_LOG`-filtered subscriber on stderr; `log` records are forwarded to it
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Format an error for display, with a source excerpt for expression errors
pub fn format_error(error: &anyhow::Error, source: Option<&str>) -> String {
    match (error.downcast_ref::<AelError>(), source) {
        (Some(ael), Some(source)) => {
            let diagnostic = ael.to_diagnostic();
            let mut out = diagnostic.render(source);
            if diagnostic.location.is_none() {
                if let Some(token) = diagnostic.token.filter(|t| !t.is_empty()) {
                    out.push_str(&format!("\n   = in: {}", token.cyan()));
                }
            }
            out
        }
        _ => format!("{} {:#}", "Error:".red().bold(), error),
    }
}

/// Format a labelled line of a report
pub fn format_field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:>12} {}", label.green().bold(), value)
}
