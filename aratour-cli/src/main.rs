mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use aratour_core::{Catalog, GuideRateTable, QuoteService};

#[derive(Debug, Parser)]
#[command(name = "aratour-cli", version)]
#[command(about = "Terminal transport and QA driver for the AraTour excursion quote bot")]
struct Args {
    /// Path to a catalog JSON file (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to a guide-rate table JSON file (defaults to the built-in rates)
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Drive the dialogue from a file of input lines instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Optional path to write the transcript instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = load_catalog(args.catalog.as_deref())?;
    let rates = load_rates(args.rates.as_deref())?;
    let mut service = QuoteService::new(catalog, rates);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("create transcript file {}", path.display()))?,
        )),
        None => Box::new(stdout().lock()),
    };

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open script file {}", path.display()))?;
            repl::run(&mut service, BufReader::new(file), &mut out)
                .context("run scripted dialogue")?;
        }
        None => {
            println!("{}", "AraTour Quote Bot".bold());
            println!(
                "Commands: {} begins a quote, {} abandons it. Ctrl-D exits.",
                repl::START_COMMAND.green(),
                repl::CANCEL_COMMAND.yellow()
            );
            repl::run(&mut service, stdin().lock(), &mut out).context("run dialogue")?;
        }
    }
    out.flush().context("flush transcript")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read catalog file {}", path.display()))?;
            Catalog::from_json(&json)
                .with_context(|| format!("parse catalog file {}", path.display()))
        }
        None => Ok(Catalog::default()),
    }
}

fn load_rates(path: Option<&Path>) -> Result<GuideRateTable> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read rates file {}", path.display()))?;
            GuideRateTable::from_json(&json)
                .with_context(|| format!("parse rates file {}", path.display()))
        }
        None => Ok(GuideRateTable::default()),
    }
}
