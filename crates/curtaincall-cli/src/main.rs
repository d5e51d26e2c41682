mod run;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use curtaincall_core::Phase;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "curtaincall")]
#[command(about = "Nearby, open venue recommendations around a performance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Curate recommendations for a show and print them as JSON
    Curate {
        /// Theatre configuration file (YAML)
        #[arg(long)]
        config: PathBuf,

        /// Show timing file (JSON)
        #[arg(long)]
        show: PathBuf,

        /// Which phase(s) to curate
        #[arg(long, value_enum, default_value_t = PhaseArg::All)]
        phase: PhaseArg,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the availability checkpoints derived from a show file
    Checkpoints {
        /// Show timing file (JSON)
        #[arg(long)]
        show: PathBuf,

        #[arg(long, value_enum, default_value_t = PhaseArg::All)]
        phase: PhaseArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PhaseArg {
    All,
    PreShow,
    PostShow,
}

impl PhaseArg {
    fn phases(self) -> &'static [Phase] {
        match self {
            Self::All => &Phase::ALL,
            Self::PreShow => &[Phase::PreShow],
            Self::PostShow => &[Phase::PostShow],
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over `default_level`.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Curate {
            config: theatre_path,
            show,
            phase,
            pretty,
        } => {
            let config =
                curtaincall_core::load_app_config().context("failed to load configuration")?;
            init_tracing(&config.log_level)?;
            let output =
                run::run_curate(&config, &theatre_path, &show, phase.phases(), pretty).await?;
            println!("{output}");
        }
        Commands::Checkpoints { show, phase } => {
            init_tracing("info")?;
            let output = run::run_checkpoints(&show, phase.phases())?;
            println!("{output}");
        }
    }

    Ok(())
}
