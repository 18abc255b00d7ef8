#![forbid(unsafe_code)]

pub mod cli;
pub mod command;
pub mod error;
pub mod session;

pub use cli::{Cli, run, run_from_env};
pub use command::{Command, CommandError, parse_line};
pub use error::{DemoError, Result};
pub use session::{Flow, Session};

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
