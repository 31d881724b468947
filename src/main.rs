mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("checkreg=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => cli::convert::run(args),
        Commands::Init {
            organization,
            category,
            preview_limit,
            output_name,
        } => cli::init::run(organization, category, preview_limit, output_name),
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
