//! Command-line interface components.

use crate::config::ParserConfig;
use crate::display::render_column_info;
use crate::parser::TradingViewParser;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "tradingview-csv")]
#[command(about = "Parse, format and categorize TradingView CSV exports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Decimal places for numeric columns
    #[arg(long, global = true)]
    pub decimal_places: Option<u32>,

    /// JSON file with parser configuration (decimal places, category table)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_path: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show row/column counts, date range and missing data
    Summary {
        /// CSV file exported from TradingView
        file: PathBuf,
    },
    /// Show formatted data, optionally for one category
    Show {
        file: PathBuf,

        /// Category to show (e.g. OHLC, Signals)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum rows to show (defaults to the configured limit)
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// List the categories found and their columns
    Categories { file: PathBuf },
    /// Describe every column
    Columns {
        file: PathBuf,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export formatted data to CSV or JSON
    Export {
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (defaults to the output file extension, then CSV)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Export only this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from the output path extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Build the parser configuration from the config file and flags
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let mut config = match &self.config_path {
            Some(path) => ParserConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ParserConfig::default(),
        };
        if let Some(decimal_places) = self.decimal_places {
            config = config.with_decimal_places(decimal_places);
        }
        Ok(config)
    }

    fn input_file(&self) -> &Path {
        match &self.command {
            Command::Summary { file }
            | Command::Show { file, .. }
            | Command::Categories { file }
            | Command::Columns { file, .. }
            | Command::Export { file, .. } => file,
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tradingview_csv={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run the selected command
pub fn run(args: &Args) -> Result<()> {
    let mut parser = TradingViewParser::new(args.parser_config()?)?;
    let file = args.input_file();
    parser
        .parse_csv(file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    match &args.command {
        Command::Summary { .. } => println!("{}", parser.display_summary()),
        Command::Show { category, rows, .. } => {
            println!("{}", parser.display_data(category.as_deref(), *rows));
        }
        Command::Categories { .. } => {
            if let Some(organized) = parser.organized() {
                for (label, table) in organized.iter() {
                    println!(
                        "{} {}",
                        format!("{}:", label).bright_cyan().bold(),
                        table.column_names().join(", ")
                    );
                }
            }
        }
        Command::Columns { json, .. } => {
            let info = parser.column_info().unwrap_or_default();
            if *json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", render_column_info(&info));
            }
        }
        Command::Export {
            output,
            format,
            category,
            ..
        } => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(output));
            match format {
                ExportFormat::Csv => parser.export_to_csv(output, category.as_deref())?,
                ExportFormat::Json => parser.export_to_json(output, category.as_deref())?,
            }
            println!(
                "{} {}",
                "Exported to".bright_green(),
                output.display().to_string().bright_white()
            );
        }
    }

    Ok(())
}
