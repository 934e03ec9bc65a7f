use anyhow::Result;
use clap::Parser;

mod cmd;

use cmd::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match cli.command {
        Commands::Run(a) => a.run(),
        Commands::Export(a) => a.run(),
        Commands::Show(a) => a.run(),
        Commands::Table(a) => a.run(),
    }
}
