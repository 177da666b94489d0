//! bsm-quote - Black-Scholes-Merton premiums and Greeks from the command line
//!
//! # Commands
//!
//! - `bsm-quote price --spot 100 --strike 95 ...` - quote one set of inputs
//! - `bsm-quote stream` - quote every line read from stdin

use bsm_quote::config::{build_config, CliArgs, InputOverrides, LogLevel, QuoteConfig};
use bsm_quote::{report, stream, Result};
use clap::{Args, Parser, Subcommand};
use pricing::{BlackScholesMerton, OptionPricer};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bsm-quote")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BSM_QUOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a single set of inputs; missing ones come from the config file or defaults
    Price(InputArgs),

    /// Quote every line of stdin: spot strike expiry volatility rate dividend
    Stream,
}

#[derive(Args)]
struct InputArgs {
    /// Underlying price
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Time to expiry in days
    #[arg(long)]
    expiry: Option<f64>,

    /// Annualized volatility in percent
    #[arg(long)]
    volatility: Option<f64>,

    /// Risk-free rate in percent per year
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Continuous dividend yield in percent per year
    #[arg(long, allow_negative_numbers = true)]
    dividend: Option<f64>,
}

impl From<&InputArgs> for InputOverrides {
    fn from(args: &InputArgs) -> Self {
        InputOverrides {
            spot: args.spot,
            strike: args.strike,
            expiry: args.expiry,
            volatility: args.volatility,
            rate: args.rate,
            dividend: args.dividend,
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn price(config: &QuoteConfig) -> Result<()> {
    info!(inputs = ?config.inputs, "pricing");
    let quote = BlackScholesMerton::quote(&config.inputs)?;
    let rendered = report::render(config.format, &config.inputs, &quote)?;

    let mut out = io::stdout().lock();
    write!(out, "{}", rendered)?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let inputs = match &cli.command {
        Commands::Price(args) => InputOverrides::from(args),
        Commands::Stream => InputOverrides::default(),
    };
    let config = build_config(&CliArgs {
        config_file: cli.config,
        inputs,
        log_level: cli.log_level,
        format: cli.format,
    })?;

    init_tracing(config.log_level);

    match cli.command {
        Commands::Price(_) => price(&config),
        Commands::Stream => {
            let stdin = io::stdin().lock();
            let mut out = io::stdout().lock();
            let mut err = io::stderr().lock();
            stream::run(stdin, &mut out, &mut err, config.format).map(|_| ())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
