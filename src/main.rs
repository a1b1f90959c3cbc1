mod config;
mod render;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use planimport_core::classify::{classify, classify_grid_cell};
use planimport_core::{IdGenerator, ParseResult, SequentialIds, UuidIds};
use render::Render;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use config::IdStrategy;

#[derive(Parser)]
#[command(name = "planimport")]
#[command(about = "Turn calendar exports (.ics, .xlsx, .xls, .csv) into availability events")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a calendar export
    Parse {
        file: PathBuf,

        /// Subject identifier stamped on every event (defaults to config `subject`)
        #[arg(short, long)]
        subject: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,

        /// Identifier generation strategy
        #[arg(long, value_enum)]
        ids: Option<IdStrategy>,
    },
    /// Show the status a label is classified as
    Classify {
        label: String,

        /// Use the weekly-grid cell codes instead of the text rules
        #[arg(long)]
        grid: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(cli.verbose, &cfg.log_level)?;

    match cli.command {
        Commands::Parse {
            file,
            subject,
            json,
            pretty,
            ids,
        } => {
            let subject = subject.or(cfg.subject.clone()).context(
                "No subject given.\n\n\
                Pass one with --subject <ID> or set `subject` in config.toml",
            )?;
            let mut ids: Box<dyn IdGenerator> = match ids.unwrap_or(cfg.ids) {
                IdStrategy::Uuid => Box::new(UuidIds),
                IdStrategy::Sequential => Box::new(SequentialIds::new(cfg.id_prefix.clone())),
            };

            let result = planimport_core::parse_path(&file, &subject, ids.as_mut()).await;
            print_result(&result, json, pretty || cfg.pretty)?;

            if !result.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Classify { label, grid } => {
            let status = if grid {
                classify_grid_cell(&label)
            } else {
                classify(&label)
            };
            println!("{}", status.render());
            Ok(())
        }
    }
}

fn print_result(result: &ParseResult, json: bool, pretty: bool) -> Result<()> {
    if json {
        let out = if pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        }
        .context("Failed to serialize result")?;
        println!("{out}");
    } else {
        println!("{}", result.render());
    }
    Ok(())
}

fn init_logging(verbose: bool, configured: &str) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(configured)
            .with_context(|| format!("Invalid log_level '{configured}' in config"))?
    };

    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")
}
