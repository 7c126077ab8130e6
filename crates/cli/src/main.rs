mod play;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use digitduel_autoplay::{run_simulation, write_report, AutoplayConfig, Strategy};
use digitduel_core::{search, Digit, Operator, SearchOptions, MAX_DIGIT_COUNT};
use digitduel_data::{resolve_levels, UiLocale};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Parser)]
#[command(name = "digitduel")]
#[command(about = "Digit arithmetic duel against a random AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Line-based text game (default)
    Play {
        #[arg(long)]
        seed: Option<u64>,

        /// Level table JSON (default: assets/levels.json, else built-in)
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,

        /// UI language: en or es (falls back to DIGITDUEL_LANG)
        #[arg(long, short = 'l')]
        lang: Option<String>,
    },

    /// Full-screen terminal UI
    Cui {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,

        #[arg(long, short = 'l')]
        lang: Option<String>,
    },

    /// Best play for a pool and budget
    Solve {
        /// Pool digits, comma separated (e.g. 3,7,1)
        #[arg(
            long,
            value_delimiter = ',',
            required = true,
            value_parser = clap::value_parser!(u8).range(0..=9)
        )]
        pool: Vec<Digit>,

        #[arg(long, allow_negative_numbers = true)]
        budget: i64,

        /// Allowed operators, comma separated (e.g. +,-); all four by default
        #[arg(long, value_delimiter = ',')]
        ops: Vec<Operator>,

        /// Largest selection size
        #[arg(
            long,
            default_value_t = MAX_DIGIT_COUNT,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DIGIT_COUNT as u64)
        )]
        digits: usize,

        /// Only selections of exactly --digits digits
        #[arg(long)]
        exact: bool,

        /// Do not add a zero to the pool when it has none
        #[arg(long)]
        no_zero: bool,
    },

    /// Headless games with a scripted player; prints a JSON report
    Simulate {
        #[arg(long, default_value_t = DEFAULT_RUN_SEED)]
        seed: u64,

        #[arg(long, default_value_t = 20)]
        rounds: u32,

        /// solver or random
        #[arg(long, default_value = "solver")]
        strategy: Strategy,

        #[arg(long, default_value_t = 1)]
        start_level: u8,

        #[arg(long, default_value_t = 200)]
        max_steps: u32,

        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,

        /// Write the report here (text for .txt, JSON otherwise) and print a text summary instead
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play {
        seed: None,
        levels: None,
        lang: None,
    });
    if !matches!(command, Commands::Cui { .. }) {
        init_tracing();
    }

    match command {
        Commands::Play { seed, levels, lang } => {
            let locale = resolve_locale(lang);
            let table = resolve_levels(levels.as_deref()).context("load levels")?;
            play::run(locale, seed.unwrap_or(DEFAULT_RUN_SEED), table)
        }
        Commands::Cui { seed, levels, lang } => {
            let launch = digitduel_cui::LaunchOptions {
                locale: Some(resolve_locale(lang).code().to_string()),
                seed,
                levels,
            };
            digitduel_cui::run(launch).context("cui launch")
        }
        Commands::Solve {
            pool,
            budget,
            ops,
            digits,
            exact,
            no_zero,
        } => {
            let operators = if ops.is_empty() {
                Operator::ALL.to_vec()
            } else {
                ops
            };
            let mut options = if exact {
                SearchOptions::playable(digits)
            } else {
                SearchOptions::explanation(digits)
            };
            options.augment_zero = !no_zero && !exact;
            tracing::debug!(?pool, budget, ?operators, ?options, "solve");
            match search(&pool, budget, &operators, options) {
                Some(play) => println!("{play}"),
                None => println!("no play"),
            }
            Ok(())
        }
        Commands::Simulate {
            seed,
            rounds,
            strategy,
            start_level,
            max_steps,
            levels,
            out,
        } => {
            let table = resolve_levels(levels.as_deref()).context("load levels")?;
            let config = AutoplayConfig {
                seed,
                rounds,
                strategy,
                max_steps,
                start_level,
            };
            let report = run_simulation(table, &config).context("simulate")?;
            match out {
                Some(path) => {
                    write_report(&path, &report)
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("{}", report.to_text_report());
                }
                None => {
                    let body = serde_json::to_string_pretty(&report).context("serialize report")?;
                    println!("{body}");
                }
            }
            Ok(())
        }
    }
}

fn resolve_locale(flag: Option<String>) -> UiLocale {
    let value = flag.or_else(|| std::env::var("DIGITDUEL_LANG").ok());
    UiLocale::from_opt(value.as_deref())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("DIGITDUEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
