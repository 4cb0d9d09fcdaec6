//! colstat CLI entry point

use anyhow::Result;
use colstat::config::{cli::Cli, toml, validator};
use colstat::coordinator::Coordinator;
use colstat::error::ColstatError;
use colstat::output;
use colstat::util::logging;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Pipeline errors already carry their cause in the message
            if e.downcast_ref::<ColstatError>().is_some() {
                eprintln!("Error: {}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = toml::load_config(cli)?;
    debug!(?config, "resolved configuration");

    let plan = validator::validate_config(&config)?;
    let summary = Coordinator::new(plan).run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_summary(&mut out, &summary, config.output)?;
    out.flush()?;

    Ok(())
}
