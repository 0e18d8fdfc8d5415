//! vsts-cd entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: command-line flags, optionally layered over a
//!    TOML file named by `--config`.
//! 2. **Wire observability**: configure `tracing-subscriber` with a pretty or
//!    JSON layer and, when an endpoint is set, an OpenTelemetry OTLP exporter.
//!    All `tracing` spans and structured events emitted by every crate in the
//!    workspace flow through this layer.
//! 3. **Construct infrastructure**: create the Team Services clients and
//!    inject them into `ContinuousDeliveryManager`.
//! 4. **Print the result** on stdout, as text or JSON. Progress and logs go to
//!    stderr.

use clap::Parser;

mod args;
mod config;
mod observability;
mod output;
mod progress;
mod setup;

use args::{Cli, Command};
use config::Settings;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::AppId => {
            println!("{}", delivery::VSTS_APP_ID);
            Ok(())
        }
        Command::Setup(args) => {
            let telemetry = observability::init(&settings.log)?;
            let outcome = setup::run(args, &settings).await;
            telemetry.shutdown();

            let result = outcome?;
            if json {
                println!("{}", output::render_json(&result)?);
            } else {
                println!("{}", output::render_text(&result));
            }
            Ok(())
        }
    }
}
