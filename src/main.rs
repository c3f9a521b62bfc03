//! dx-rocks - roll Double Cross style `NDX` dice from the command line

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dx_rocks::{
    parse, seeded, Command, Engine, RandomSource, RollOutcome, Settings,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Subcommand)]
enum Cmd {
    /// Roll a dice expression such as 8DX+5, 7DX8+3 or 7DX+3@8
    Roll {
        /// The expression; several words are joined without spaces
        #[arg(required = true)]
        expr: Vec<String>,
    },
    /// Handle a raw chat line such as "!dx 8DX+5" or "/dxhelp"
    Chat {
        /// The chat message; words are joined with spaces
        #[arg(required = true)]
        line: Vec<String>,
    },
    /// Show roller information
    Info,
}

#[derive(Parser)]
#[command(name = "dx-rocks", version)]
#[command(about = "Double Cross NDX dice roller", after_help = Command::usage())]
struct Cli {
    /// RNG seed for reproducible rolls (overrides settings)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Stop a cascade after this many rounds (overrides settings)
    #[arg(long, global = true)]
    max_rounds: Option<NonZeroU32>,
    /// Refuse rolls with more dice than this (overrides settings)
    #[arg(long, global = true)]
    max_pool: Option<NonZeroU32>,
    /// Settings file
    #[arg(long, global = true, default_value = dx_rocks::CONFIG_FILE)]
    config: String,
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(max_rounds) = cli.max_rounds {
        settings.max_rounds = max_rounds.get();
        settings.uncapped = false;
    }
    if let Some(max_pool) = cli.max_pool {
        settings.max_pool = max_pool.get();
    }
    let engine = settings.engine();

    let mut rng: Box<dyn RandomSource> = match cli.seed.or(settings.seed) {
        Some(seed) => {
            info!(seed, "using seeded dice");
            Box::new(seeded(seed))
        }
        None => Box::new(rand::rng()),
    };

    let reply = match cli.cmd {
        Cmd::Roll { expr } => roll(&engine, &expr.concat(), rng.as_mut()),
        Cmd::Chat { line } => match Command::parse(&line.join(" ")) {
            Some(Command::Roll(expr)) => roll(&engine, &expr, rng.as_mut()),
            Some(Command::Help) => Command::usage().to_string(),
            Some(Command::Info) => Command::about(),
            None => {
                info!("line is not a dx command, ignoring");
                return Ok(());
            }
        },
        Cmd::Info => Command::about(),
    };

    println!("{reply}");
    Ok(())
}

fn roll(engine: &Engine, expr: &str, rng: &mut dyn RandomSource) -> String {
    let outcome = match parse(expr) {
        Ok(request) => engine.resolve(request, rng),
        Err(err) => {
            info!(%err, "rejected dice expression");
            RollOutcome::invalid(err.source_text(), err.to_string())
        }
    };

    if outcome.valid {
        outcome.to_string()
    } else {
        format!("{outcome}\n\n{}", Command::usage())
    }
}
