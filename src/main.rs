use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;
use waltz_icons::cli::{Cli, Commands};
use waltz_icons::output::Printer;

/// Environment variable holding the log filter, e.g. `WALTZ_LOG=debug`.
const LOG_ENV: &str = "WALTZ_LOG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => waltz_icons::cli::build::run(args, &printer)?,
        Commands::Scan(args) => waltz_icons::cli::scan::run(args, &printer)?,
        Commands::Watch(args) => waltz_icons::cli::watch::run(args, &printer)?,
        Commands::Init(args) => waltz_icons::cli::init::run(args, &printer)?,
        Commands::Completions(args) => waltz_icons::cli::completions::run(args)?,
    }

    Ok(())
}
