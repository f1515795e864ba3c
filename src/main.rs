use std::process::ExitCode;

use clap::Parser;
use quadwarp::{init_logging, run, Cli, Outcome};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.settings()?;

    init_logging(config.logging.format, &config.logging.level)?;
    tracing::debug!(
        version = quadwarp::VERSION,
        build_date = quadwarp::BUILD_DATE,
        "starting"
    );

    match run(&cli, &config)? {
        Outcome::Applied(_) => Ok(ExitCode::SUCCESS),
        Outcome::Rejected(err) => {
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
