use std::process::ExitCode;
use clap::Parser;
use sc_app::{Generator, ServiceConfig, cli, telemetry};

/// Generate one 3D model and print the result record as JSON
#[derive(Parser, Debug)]
#[command(name = "shape-generate", version)]
struct Args {
    /// Object description, e.g. '{"name": "elephant", "concept": "mammals"}'
    object_data: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    let args = Args::parse();

    let outcome = cli::run(&args.object_data, || async {
        let config = ServiceConfig::load()?;
        Generator::connect(&config).await
    })
    .await;

    println!("{}", outcome.body);
    outcome.exit_code()
}
