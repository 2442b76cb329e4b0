use clap::Parser;
use keyvault::cli::commands::{completions, lock, newkey, unlock};
use keyvault::cli::{resolve_key_path, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // -v info, -vv debug, -vvv trace; RUST_LOG wins when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let key_path = || resolve_key_path(&cli);

    let result = match &cli.command {
        Commands::NewKey => key_path().and_then(|path| newkey::execute(&path)),
        Commands::Lock { file } => key_path().and_then(|path| lock::execute(&path, file)),
        Commands::Unlock { file } => key_path().and_then(|path| unlock::execute(&path, file)),
        Commands::Completions { shell } => completions::execute(*shell),
    };

    if let Err(e) = result {
        keyvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
