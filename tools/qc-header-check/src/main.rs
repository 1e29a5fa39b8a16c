//! QC-Header-Check: validate a block header against a rule schedule
//!
//! Loads a schedule and headers from JSON files, runs the rule set active at
//! the header's height and prints the verdict as JSON.
//!
//! Exit codes: `0` header valid, `1` header rejected, `2` configuration or
//! engine error.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use qc_18_header_validation::ports::{FixedTimeSource, SystemTimeSource, TimeSource};
use qc_18_header_validation::{
    BlockHeader, ChainContext, HeaderValidationApi, HeaderValidationService, InMemoryChain,
    RuleSchedule, ScheduleConfig, ValidationConfig, Verdict,
};
use quantum_telemetry::{init_logging, log_event, TelemetryConfig};

const SUBSYSTEM: &str = "header-validation";

/// QC-Header-Check: run header validation rules from the command line
#[derive(Parser, Debug)]
#[command(name = "qc-header-check")]
#[command(about = "Validate a block header against a Quantum-Chain rule schedule")]
struct Args {
    /// Rule schedule JSON file
    #[arg(short, long)]
    schedule: PathBuf,

    /// Candidate header JSON file
    #[arg(long)]
    header: PathBuf,

    /// Parent header JSON file (omit only for genesis)
    #[arg(short, long)]
    parent: Option<PathBuf>,

    /// JSON array of known headers, starting at genesis, used as chain context
    #[arg(short, long)]
    ancestors: Option<PathBuf>,

    /// Override the context clock (unix seconds)
    #[arg(long)]
    now: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let telemetry = TelemetryConfig::for_subsystem("18", SUBSYSTEM);
    if let Err(e) = init_logging(&telemetry) {
        eprintln!("qc-header-check: {}", e);
    }

    match run(&args) {
        Ok(verdict) => {
            match serde_json::to_string_pretty(&verdict) {
                Ok(json) => println!("{}", json),
                Err(e) => log_event!(error, SUBSYSTEM, "Failed to render verdict", error = %e),
            }
            if verdict.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            log_event!(error, SUBSYSTEM, "Header check failed", error = %format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Verdict> {
    let schedule_json = fs::read_to_string(&args.schedule)
        .with_context(|| format!("Failed to read schedule {}", args.schedule.display()))?;
    let schedule_config = ScheduleConfig::from_json(&schedule_json)
        .with_context(|| format!("Invalid schedule {}", args.schedule.display()))?;
    let schedule = RuleSchedule::from_config(&schedule_config, ValidationConfig::process())
        .context("Failed to build rule schedule")?;

    let header: BlockHeader = read_json(&args.header)?;
    let parent = args
        .parent
        .as_deref()
        .map(read_json::<BlockHeader>)
        .transpose()?;

    let service = HeaderValidationService::with_tracing(Arc::new(schedule));
    let context = if service.schedule().rules_for(header.number).requires_context() {
        Some(build_context(args, parent.as_ref())?)
    } else {
        None
    };

    log_event!(
        info,
        SUBSYSTEM,
        "Validating header",
        block_number = header.number,
        rules = ?service.rules_at(header.number)
    );

    let verdict = service
        .validate_header(
            &header,
            parent.as_ref(),
            context.as_ref().map(|chain| chain as &dyn ChainContext),
        )
        .context("Header validation engine fault")?;
    Ok(verdict)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Chain context seeded from `--ancestors`, or from the parent alone
fn build_context(args: &Args, parent: Option<&BlockHeader>) -> Result<InMemoryChain> {
    let time_source: Arc<dyn TimeSource> = match args.now {
        Some(now) => Arc::new(FixedTimeSource(now)),
        None => Arc::new(SystemTimeSource),
    };

    let mut known: Vec<BlockHeader> = match &args.ancestors {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    if let Some(parent) = parent {
        known.push(parent.clone());
    }

    let mut known = known.into_iter();
    let Some(root) = known.next() else {
        bail!("Rule set needs chain context: pass --parent or --ancestors");
    };
    let chain = InMemoryChain::with_time_source(root, time_source);
    for header in known {
        chain.insert(header);
    }
    Ok(chain)
}
