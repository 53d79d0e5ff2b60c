//! # kpi-cli
//!
//! Command-line interface for the KPI analysis engine.

use clap::{Parser, Subcommand};
use kpi_facade::{
    collect_narrative, forecast_with_residuals, pearson_correlation, series_stats, AnalysisConfig,
    AnalyzerBuilder, LinearTrendDetector, NarrativeContext, NarrativeGenerator, TemplateNarrator,
    TrendDetector,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "kpi")]
#[command(about = "KPI trend, forecast and correlation analysis", long_about = None)]
struct Cli {
    /// JSON configuration file (horizon, thresholds, seed)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary statistics of a series
    Stats {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Column name or index for series values
        #[arg(short, long)]
        column: Option<String>,
    },

    /// Fit a linear trend and label it
    Trend {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        column: Option<String>,
    },

    /// Project the trend forward with seasonal residuals
    Forecast {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        column: Option<String>,

        /// Number of periods to forecast
        #[arg(long, env = "KPI_HORIZON")]
        horizon: Option<usize>,
    },

    /// Pearson correlation between two series
    Correlate {
        #[arg(short, long)]
        input: PathBuf,

        /// Second input file
        #[arg(long)]
        other: PathBuf,

        #[arg(short, long)]
        column: Option<String>,
    },

    /// Full analysis: trend, forecast and drivers
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        /// KPI category, e.g. "Финансы"
        #[arg(short = 'k', long)]
        category: String,

        #[arg(short, long)]
        column: Option<String>,

        #[arg(long, env = "KPI_HORIZON")]
        horizon: Option<usize>,

        /// Seed for driver sampling
        #[arg(long, env = "KPI_SEED")]
        seed: Option<u64>,

        /// Also print a template narrative
        #[arg(long)]
        narrate: bool,
    },
}

/// Load series values from a CSV file
fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let col_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) => headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
        None => 0,
    };

    // Rows are equally spaced periods; a gap would shift every later index
    let mut data = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let line = record.position().map_or(row as u64 + 2, |p| p.line());
        let value = record
            .get(col_idx)
            .ok_or_else(|| format!("Line {}: missing column {}", line, col_idx))?;
        let num = value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Line {}: '{}' is not a number", line, value))?;
        data.push(num);
    }

    if data.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }

    Ok(data)
}

/// Every element must be a number
fn numeric_array(arr: &[serde_json::Value]) -> CliResult<Vec<f64>> {
    arr.iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| format!("Element {}: {} is not a number", i, v))
        })
        .collect()
}

/// Load series values from a JSON file
fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;

    if let Some(arr) = json.as_array() {
        if arr.iter().any(|v| v.is_number()) {
            return numeric_array(arr);
        }

        let key = match column {
            Some(col) => Some(col),
            None => ["value", "values", "y"]
                .into_iter()
                .find(|key| arr.iter().any(|obj| obj.get(*key).is_some())),
        };
        if let Some(key) = key {
            return arr
                .iter()
                .enumerate()
                .map(|(i, obj)| {
                    obj.get(key)
                        .and_then(|v| v.as_f64())
                        .ok_or_else(|| format!("Element {}: no numeric '{}'", i, key))
                })
                .collect();
        }
    }

    if let Some(obj) = json.as_object() {
        for key in &["data", "values", "series"] {
            if let Some(arr) = obj.get(*key).and_then(|v| v.as_array()) {
                if !arr.is_empty() {
                    return numeric_array(arr);
                }
            }
        }
    }

    Err("Could not extract numeric data from JSON".to_string())
}

/// Load data from file (format from extension, CSV then JSON otherwise)
fn load_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let data = match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_csv_data(path, column).or_else(|_| load_json_data(path, column)),
    }?;

    debug!(points = data.len(), path = %path.display(), "loaded series");
    Ok(data)
}

fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    AnalysisConfig::from_json_str(&text).map_err(|e| e.to_string())
}

/// Detector honouring the configured label thresholds
fn trend_detector(config: &AnalysisConfig) -> LinearTrendDetector {
    LinearTrendDetector::with_thresholds(config.thresholds())
}

/// Narrative goes to stdout only when the JSON went to a file, so piped
/// JSON output stays parseable.
fn write_narrative(
    text: &str,
    output: Option<&Path>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> CliResult<()> {
    let sink: &mut dyn Write = if output.is_some() { stdout } else { stderr };
    writeln!(sink, "{}", text).map_err(|e| format!("Failed to write narrative: {}", e))
}

/// Write pretty JSON to the output file or stdout
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> CliResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {}", e))?;

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| format!("Failed to write output: {}", e))?;
            info!(path = %path.display(), "results written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = load_config(cli.config.as_deref())?;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Stats { input, column } => {
            let data = load_data(&input, column.as_deref())?;
            write_json(&series_stats(&data), output)
        }
        Commands::Trend { input, column } => {
            let data = load_data(&input, column.as_deref())?;
            let trend = trend_detector(&config)
                .detect(&data)
                .map_err(|e| e.to_string())?;
            write_json(&trend, output)
        }
        Commands::Forecast {
            input,
            column,
            horizon,
        } => {
            let data = load_data(&input, column.as_deref())?;
            let horizon = horizon.unwrap_or(config.horizon);
            let trend = trend_detector(&config)
                .detect(&data)
                .map_err(|e| e.to_string())?;
            let forecast =
                forecast_with_residuals(&data, &trend.line, horizon).map_err(|e| e.to_string())?;
            write_json(&forecast, output)
        }
        Commands::Correlate {
            input,
            other,
            column,
        } => {
            let x = load_data(&input, column.as_deref())?;
            let y = load_data(&other, column.as_deref())?;
            let r = pearson_correlation(&x, &y);
            write_json(&serde_json::json!({ "correlation": r }), output)
        }
        Commands::Analyze {
            input,
            category,
            column,
            horizon,
            seed,
            narrate,
        } => {
            if let Some(horizon) = horizon {
                config.horizon = horizon;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            let data = load_data(&input, column.as_deref())?;
            let analyzer = AnalyzerBuilder::new()
                .config(config)
                .build()
                .map_err(|e| e.to_string())?;
            let analysis = analyzer
                .analyze(&data, &category, None)
                .map_err(|e| e.to_string())?;
            info!(label = %analysis.trend.label, category = %category, "analysis finished");
            write_json(&analysis, output)?;

            if narrate {
                let name = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("KPI")
                    .to_string();
                let context = NarrativeContext::from_analysis(name, &analysis, None);
                let stream = TemplateNarrator::new()
                    .generate(&context)
                    .map_err(|e| e.to_string())?;
                let text = collect_narrative(stream, &AtomicBool::new(false));
                write_narrative(
                    &text,
                    output,
                    &mut std::io::stdout().lock(),
                    &mut std::io::stderr().lock(),
                )?;
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kpi=info,kpi_core=info,kpi_api=info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
