use clap::Parser;
use tracing_subscriber::EnvFilter;

use artwork_search::{Cli, run};

fn main() {
    let cli = Cli::parse();

    // -v flags win over RUST_LOG; logs go to stderr so robot output
    // stays parseable.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
