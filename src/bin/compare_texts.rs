use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};

use intihal::config::FinderKind;
use intihal::{ComparisonOptions, ComparisonPipeline, Error, IntihalConfig, Result};

/// Compare two text files and print the alignment report as JSON.
#[derive(Debug, Parser)]
#[command(name = "compare_texts")]
struct Args {
    /// First document (role A).
    file_a: PathBuf,

    /// Second document (role B).
    file_b: PathBuf,

    /// Treat FILE_A and FILE_B as literal text instead of paths.
    #[arg(long)]
    literal: bool,

    /// Minimum match length; defaults to the configured value.
    #[arg(long)]
    min_len: Option<usize>,

    /// Similarity-ratio threshold in (0, 1]; defaults to the configured
    /// value.
    #[arg(long)]
    ratio: Option<f64>,

    /// Budget of tolerated character edits per match; defaults to the
    /// configured value.
    #[arg(long)]
    strikes: Option<usize>,

    /// Finder implementation: levenshtein or exact.
    #[arg(long)]
    finder: Option<String>,

    /// Path to an INI configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace or none.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    // Convert config string to LevelFilter
    let log_level = match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "none" => LevelFilter::Off,
        _ => {
            println!("Invalid log level '{}', defaulting to Warn", level);
            LevelFilter::Warn
        }
    };

    Builder::new().filter(None, log_level).init();
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => IntihalConfig::from_ini(path)?,
        None => IntihalConfig::default(),
    };
    if let Some(name) = &args.finder {
        config.matcher.finder = FinderKind::from_str(name)
            .ok_or_else(|| Error::config(format!("Invalid finder: {}", name)))?;
    }

    let (text_a, text_b) = if args.literal {
        (
            args.file_a.to_string_lossy().into_owned(),
            args.file_b.to_string_lossy().into_owned(),
        )
    } else {
        (
            fs::read_to_string(&args.file_a)?,
            fs::read_to_string(&args.file_b)?,
        )
    };

    let pipeline = ComparisonPipeline::new(config);
    let mut options: ComparisonOptions = pipeline.default_options();
    if let Some(min_len) = args.min_len {
        options.min_len = min_len;
    }
    if let Some(ratio) = args.ratio {
        options.ratio = ratio;
    }
    if args.strikes.is_some() {
        options.max_strikes = args.strikes;
    }

    info!(
        "Comparing {:?} and {:?} with minLen {} and ratio {}",
        args.file_a, args.file_b, options.min_len, options.ratio
    );

    let report = pipeline.analyse(&text_a, &text_b, &options)?;
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
