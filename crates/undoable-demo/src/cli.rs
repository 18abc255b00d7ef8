#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use undoable_runtime::{HistoryLimit, MutationBehavior, ResetFallbackPolicy, UndoableOptions};

use crate::error::{DemoError, Result};
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "undoable-demo",
    about = "Counter with undo/redo, driven by line commands (`help` lists them)",
    version
)]
pub struct Cli {
    /// Starting value of the counter.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub initial: i64,

    /// Behavior for updates made after an undo.
    #[arg(long)]
    pub behavior: Option<MutationBehavior>,

    /// Past states to keep: a positive count or `unbounded`.
    #[arg(long)]
    pub history_limit: Option<HistoryLimit>,

    /// Make `reset` without a value an error instead of returning to the initial value.
    #[arg(long)]
    pub strict_reset: bool,

    /// Load options from a TOML file. Flags override it.
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Read commands from a file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Options from `--config`, then the individual flags.
    pub fn options(&self) -> Result<UndoableOptions> {
        let mut options = match &self.config {
            Some(path) => {
                UndoableOptions::from_toml_file(path).map_err(|source| DemoError::Config {
                    path: path.clone(),
                    source,
                })?
            }
            None => UndoableOptions::default(),
        };
        if let Some(behavior) = self.behavior {
            options = options.with_behavior(behavior);
        }
        if let Some(limit) = self.history_limit {
            options = options.with_history_limit(limit);
        }
        if self.strict_reset {
            options = options.with_reset_fallback(ResetFallbackPolicy::Strict);
        }
        Ok(options.validated()?)
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let options = cli.options()?;
    tracing::info!(
        target: "undoable.demo",
        initial = cli.initial,
        behavior = %options.behavior,
        history_limit = %options.history_limit,
        "starting session"
    );

    let stdout = io::stdout();
    let mut session = Session::new(cli.initial, options, stdout.lock());
    match &cli.script {
        Some(path) => session.run(BufReader::new(File::open(path)?))?,
        None => session.run(io::stdin().lock())?,
    }

    let stats = session.counter().stats();
    tracing::info!(
        target: "undoable.demo",
        dispatched = stats.dispatched,
        changed = stats.changed,
        failed = stats.failed,
        errors = session.errors(),
        "session finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "undoable-demo",
            "--initial",
            "-3",
            "--behavior",
            "keepFuture",
            "--history-limit",
            "unbounded",
            "--strict-reset",
        ])
        .unwrap();
        assert_eq!(cli.initial, -3);
        let options = cli.options().unwrap();
        assert_eq!(options.behavior, MutationBehavior::KeepFuture);
        assert_eq!(options.history_limit, HistoryLimit::Unbounded);
        assert_eq!(options.reset_fallback, ResetFallbackPolicy::Strict);
    }

    #[test]
    fn bad_behavior_is_rejected_by_clap() {
        let err = Cli::try_parse_from(["undoable-demo", "--behavior", "mergeFuture"]).unwrap_err();
        assert!(err.to_string().contains("mergeFuture"));
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        assert!(Cli::try_parse_from(["undoable-demo", "--history-limit", "0"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undoable.toml");
        std::fs::write(&path, "behavior = \"mergePast\"\nhistory_limit = 7\n").unwrap();

        let cli = Cli::try_parse_from([
            "undoable-demo",
            "--config",
            path.to_str().unwrap(),
            "--history-limit",
            "3",
        ])
        .unwrap();
        let options = cli.options().unwrap();
        assert_eq!(options.behavior, MutationBehavior::MergePast);
        assert_eq!(options.history_limit, HistoryLimit::Bounded(3));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let cli = Cli::try_parse_from(["undoable-demo", "--config", "/nonexistent/undoable.toml"])
            .unwrap();
        let err = cli.options().unwrap_err();
        assert!(matches!(err, DemoError::Config { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
