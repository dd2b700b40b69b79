mod cli;
mod commands;

use cli::{DumpParams, GenerateParams, build_cli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            init_tracing(params.verbosity);
            commands::generate::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            init_tracing(params.verbosity);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr; stdout may carry generated code.
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
