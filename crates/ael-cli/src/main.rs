//! AEL command-line interface

mod check;
mod eval;
mod functions;
mod output;

use ael::EngineConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AEL command-line tool
#[derive(Parser)]
#[command(name = "ael")]
#[command(author, version, about = "Attribute Expression Language tools", long_about = None)]
struct Cli {
    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    /// Date pattern for toDate() (overrides AEL_DATE_FORMAT)
    #[arg(long, global = true)]
    date_format: Option<String>,

    /// Instant pattern for toInstant() (overrides AEL_INSTANT_FORMAT)
    #[arg(long, global = true)]
    instant_format: Option<String>,

    /// Offset for instants without a zone, e.g. +02:00 (overrides AEL_DEFAULT_OFFSET)
    #[arg(long, global = true)]
    offset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against attributes
    Eval {
        /// Expression or template, e.g. '${filename:toUpper()}'
        expression: String,

        /// Attributes (name=value)
        #[arg(short, long = "attr")]
        attributes: Vec<String>,

        /// JSON object of attributes to start from
        #[arg(short, long)]
        record: Option<PathBuf>,

        /// Read the result as a boolean
        #[arg(short, long)]
        boolean: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile an expression and report its type
    Check {
        /// Expression or template
        expression: String,

        /// Restrict references to these attribute names
        #[arg(short, long = "declared")]
        declared: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in functions
    Functions,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(date) = &self.date_format {
            config.date_format.clone_from(date);
        }
        if let Some(instant) = &self.instant_format {
            config.instant_format = Some(instant.clone());
        }
        if let Some(offset) = &self.offset {
            config.default_offset.clone_from(offset);
        }
        config
    }
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    output::setup_colors(&cli.color);
    output::setup_logging();

    let config = cli.engine_config();
    log::debug!("engine configuration: {config:?}");

    let (source, result) = match cli.command {
        Commands::Eval {
            expression,
            attributes,
            record,
            boolean,
            json,
        } => {
            let options = eval::EvalOptions {
                attributes,
                record,
                boolean,
                json,
            };
            let result = eval::eval(&expression, &options, &config);
            (Some(expression), result)
        }
        Commands::Check {
            expression,
            declared,
            json,
        } => {
            let result = check::check(&expression, &declared, json, &config);
            (Some(expression), result)
        }
        Commands::Functions => (None, functions::list()),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e, source.as_deref()));
        std::process::exit(1);
    }
}
