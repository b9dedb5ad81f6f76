//! depgraph binary entry point

use depgraph::cli::{args::Args, commands};
use depgraph::error::ErrorSeverity;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(&args);

    if let Err(err) = commands::run(&args) {
        eprintln!("error: {}", err.user_message());
        let code = match err.severity() {
            ErrorSeverity::Critical => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

/// Log to stderr; RUST_LOG overrides the verbosity flags
fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "depgraph=debug"
    } else if args.quiet {
        "depgraph=error"
    } else {
        "depgraph=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
