//! msum CLI
//!
//! Moving sums over numbers read from a file or stdin.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use msum::{
    core::{window_from_value, windowed_sum_value},
    input::read_input,
    Config, OutputFormat, VERSION,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "msum")]
#[command(version = VERSION)]
#[command(about = "Moving (sliding window) sums over numeric sequences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute moving sums
    Sum {
        /// Window size (falls back to the configured default)
        #[arg(long, short)]
        window: Option<String>,

        /// Input file; reads stdin when omitted or "-"
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Field name or JSON pointer (e.g. /point/x) to sum from each record
        #[arg(long, short)]
        field: Option<String>,

        /// Reuse the input buffer for the output
        #[arg(long)]
        in_place: bool,

        /// Output format (json or lines)
        #[arg(long)]
        format: Option<String>,

        /// Decimal places for non-integral sums in lines output
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Show or update configuration
    Config {
        /// Set the default window size
        #[arg(long)]
        set_window: Option<usize>,

        /// Set the default output format (json or lines)
        #[arg(long)]
        set_format: Option<String>,

        /// Set the default precision for lines output
        #[arg(long)]
        set_precision: Option<usize>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sum {
            window,
            input,
            field,
            in_place,
            format,
            precision,
        } => cmd_sum(window, input, field, in_place, format, precision),
        Commands::Config {
            set_window,
            set_format,
            set_precision,
        } => cmd_config(set_window, set_format, set_precision),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_sum(
    window: Option<String>,
    input: Option<PathBuf>,
    field: Option<String>,
    in_place: bool,
    format: Option<String>,
    precision: Option<usize>,
) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config, using defaults: {e}");
        Config::default()
    });

    let window = resolve_window(window.as_deref(), &config)?;
    let format = match format {
        Some(name) => OutputFormat::parse(&name)
            .with_context(|| format!("unknown output format: {name}"))?,
        None => config.format,
    };
    let precision = precision.or(config.precision);

    let mut data = read_input(input.as_deref()).context("Failed to read input")?;

    let mut options = serde_json::Map::new();
    if let Some(field) = field {
        options.insert("accessor".to_string(), Value::String(field));
    }
    options.insert("copy".to_string(), Value::Bool(!in_place));
    let options = Value::Object(options);

    debug!(window = %window, ?format, in_place, "running sum command");
    let sums = windowed_sum_value(&mut data, &window, Some(&options))?;

    println!("{}", render(&sums, format, precision)?);
    Ok(())
}

fn cmd_config(
    set_window: Option<usize>,
    set_format: Option<String>,
    set_precision: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if set_window.is_none() && set_format.is_none() && set_precision.is_none() {
        println!("Configuration");
        println!("=============");
        println!();
        println!("Config file: {:?}", Config::config_path());
        println!();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if let Some(window) = set_window {
        // Same rule as the window argument of `sum`.
        window_from_value(&json!(window))?;
        config.default_window = Some(window);
    }
    if let Some(name) = set_format {
        config.format = OutputFormat::parse(&name)
            .with_context(|| format!("unknown output format: {name}"))?;
    }
    if let Some(precision) = set_precision {
        config.precision = Some(precision);
    }

    config.save().context("Error saving config")?;
    println!("Configuration saved to {:?}", Config::config_path());
    Ok(())
}

/// Window from `--window`, else the configured default.
fn resolve_window(arg: Option<&str>, config: &Config) -> anyhow::Result<Value> {
    match (arg, config.default_window) {
        (Some(w), _) => Ok(parse_window_arg(w)),
        (None, Some(w)) => Ok(json!(w)),
        (None, None) => bail!("no window given and no default_window configured"),
    }
}

/// Interpret the raw window argument as JSON so that `2.7` or `abc` are
/// reported by the same validation as any other caller.
fn parse_window_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render(sums: &[Value], format: OutputFormat, precision: Option<usize>) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(sums)?),
        OutputFormat::Lines => Ok(sums
            .iter()
            .map(|v| render_line(v, precision))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_line(value: &Value, precision: Option<usize>) -> String {
    match (value, precision) {
        (Value::Null, _) => "NaN".to_string(),
        (Value::Number(n), Some(p)) if !n.is_i64() && !n.is_u64() => {
            format!("{:.p$}", n.as_f64().unwrap_or(f64::NAN))
        }
        (other, _) => other.to_string(),
    }
}
