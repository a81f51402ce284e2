use std::path::{Path, PathBuf};

mod check;
mod report;
mod terminal;

use check::Check;
use clap::ArgAction;
use compliance::{Config, Needs, NeedsFile};
use report::Report;
use tracing::instrument;

/// The name of the configuration file looked up next to the needs export.
const CONFIG_FILE: &str = "compliance.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the sphinx-needs export
    #[arg(short, long, default_value = "needs.json", global = true)]
    needs: PathBuf,

    /// Configuration file [default: compliance.toml next to the export]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Documentation version to check [default: the export's current version]
    #[arg(long, value_name = "VERSION", global = true)]
    needs_version: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.needs, self.config.as_deref())?;

        let mut file = NeedsFile::new(self.needs);
        if let Some(version) = self.needs_version {
            file = file.with_version(version);
        }
        let needs = file.load()?;

        self.command
            .unwrap_or_else(|| Command::Check(Check::default()))
            .run(&needs, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the configuration.
///
/// An explicitly named file must load. Otherwise `compliance.toml` next to the
/// export is used if it exists, falling back to the defaults.
#[instrument(level = "debug")]
fn load_config(needs: &Path, explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()));
    }

    let path = needs
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    Config::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run consistency checks (default)
    Check(Check),

    /// Print the tallies behind the compliance charts
    Report(Report),
}

impl Command {
    fn run(self, needs: &Needs, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Check(command) => command.run(needs, config)?,
            Self::Report(command) => command.run(needs, config)?,
        }
        Ok(())
    }
}
