use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use formicary_app::config::{Args, RunConfig};
use formicary_app::game_loop;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("formicary: {err}");
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    match game_loop::run(&config, &mut stdout.lock()) {
        Ok(outcome) => ExitCode::from(game_loop::exit_code(outcome)),
        Err(err) => {
            eprintln!("formicary: {err}");
            ExitCode::from(2)
        }
    }
}
