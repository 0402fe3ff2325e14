//! # isatab CLI
//!
//! Command-line front end for the ISA-Tab mapping engine.
//!
//! ## Usage
//!
//! ```bash
//! # Assemble a raw parse tree and write the investigation file
//! isatab convert raw_tree.json -o i_Investigation.txt
//!
//! # Fetch a MetaboLights study
//! isatab fetch MTBLS1 -o ./mtbls1
//!
//! # Summarise an assembled investigation
//! isatab summary raw_tree.json
//!
//! # Run the external validator
//! isatab validate ./mtbls1 -c ./isaconfig
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use isatab::graph;
use isatab::net::MtblsClient;
use isatab::summary::InvestigationSummary;
use isatab::tree::RawTree;
use isatab::validator;
use isatab::writer::{dump_investigation, dump_investigation_to_path};

/// isatab - ISA-Tab Investigation Graph Converter
#[derive(Parser)]
#[command(name = "isatab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a raw parse tree (JSON) into an investigation file
    Convert {
        /// Raw parse tree JSON path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output path (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Emit the assembled graph as JSON instead of ISA-Tab sections
        #[arg(long)]
        json: bool,
    },

    /// Download a study's ISA-Tab files from MetaboLights
    Fetch {
        /// Study accession, e.g. MTBLS1
        #[arg(value_name = "STUDY")]
        study: String,

        /// Target directory (defaults to a kept temporary directory)
        #[arg(short = 'o', long, value_name = "DIR")]
        target: Option<PathBuf>,
    },

    /// Print summary statistics for an assembled investigation
    Summary {
        /// Raw parse tree JSON path
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Run the external validator against an ISA-Tab directory
    Validate {
        /// ISA-Tab directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Configuration directory
        #[arg(short = 'c', long, value_name = "CONFIG")]
        config: PathBuf,

        /// Validator executable
        #[arg(long, default_value = "validate.sh")]
        validator: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            json,
        } => run_convert(input, output, json),
        Commands::Fetch { study, target } => run_fetch(study, target),
        Commands::Summary { input } => run_summary(input),
        Commands::Validate {
            dir,
            config,
            validator,
        } => run_validate(dir, config, validator),
    }
}

fn load_investigation(input: &PathBuf) -> Result<Option<isatab::model::Investigation>> {
    if !input.exists() {
        anyhow::bail!("input file does not exist: {}", input.display());
    }
    let tree = RawTree::from_json_file(input)
        .with_context(|| format!("failed to load raw tree from {}", input.display()))?;
    graph::assemble(&tree).context("conversion failed")
}

fn run_convert(input: PathBuf, output: Option<PathBuf>, json: bool) -> Result<()> {
    let Some(investigation) = load_investigation(&input)? else {
        println!("Nothing to convert: the raw tree carries no investigation metadata.");
        return Ok(());
    };

    match (output, json) {
        (Some(path), true) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &investigation)
                .context("failed to serialize investigation graph")?;
            info!("wrote investigation graph {}", path.display());
        }
        (Some(path), false) => {
            dump_investigation_to_path(&investigation, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        (None, true) => {
            let rendered = serde_json::to_string_pretty(&investigation)
                .context("failed to serialize investigation graph")?;
            println!("{rendered}");
        }
        (None, false) => {
            let mut stdout = std::io::stdout().lock();
            dump_investigation(&investigation, &mut stdout)
                .context("failed to write investigation file")?;
        }
    }
    Ok(())
}

fn run_fetch(study: String, target: Option<PathBuf>) -> Result<()> {
    let client = MtblsClient::new().context("failed to build MetaboLights client")?;
    let fetched = client
        .fetch_study(&study, target.as_deref())
        .with_context(|| format!("failed to retrieve study '{study}'"))?;

    println!("Retrieved {} at {}", fetched.study_id, fetched.fetched_at.to_rfc3339());
    for file in &fetched.files {
        println!("  {file}");
    }
    let dir = fetched.keep();
    println!("Files written to {}", dir.display());
    Ok(())
}

fn run_summary(input: PathBuf) -> Result<()> {
    let Some(investigation) = load_investigation(&input)? else {
        println!("Nothing to summarise: the raw tree carries no investigation metadata.");
        return Ok(());
    };
    print!("{}", InvestigationSummary::from_investigation(&investigation));
    Ok(())
}

fn run_validate(dir: PathBuf, config: PathBuf, validator_path: PathBuf) -> Result<()> {
    let outcome = validator::validate(&dir, &config, &validator_path)
        .context("validator could not be run")?;
    println!("{outcome}");
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
