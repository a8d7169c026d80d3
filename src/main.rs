use std::io;

use clap::Parser;
use log::info;
use tracing_subscriber::{fmt, EnvFilter};

use ripple::config::{Cli, OutputFormat};
use ripple::error::Error;
use ripple::pipeline;

fn main() -> Result<(), Error> {
    // Stdout carries the report, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let (augend, addend) = cli.operands()?;
    info!("augend {}, addend {}", augend, addend);

    let report = pipeline::run(&augend, &addend)?;
    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
