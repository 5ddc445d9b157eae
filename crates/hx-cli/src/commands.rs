use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hx_cli::summary::lookup_tables;
use hx_cli::types::RunOverrides;
use hx_core::{LookupIndex, RunOutput, run};
use hx_ingest::{default_config_toml, load_config, read_escalations, read_reference, read_report};
use hx_model::RunConfig;

use crate::cli::{LookupArgs, RunArgs};

/// Output of the `run` subcommand.
pub struct RunResult {
    pub output: RunOutput,
    pub config: RunConfig,
}

pub fn run_allocation(args: &RunArgs) -> Result<RunResult> {
    let run_span = info_span!("run", report = %args.report.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let config = resolve_config(args.config.as_deref())?;
    let escalated_accounts = match &args.escalations {
        Some(path) => read_escalations(path)
            .with_context(|| format!("read escalations {}", path.display()))?,
        None => Default::default(),
    };
    let overrides = RunOverrides {
        agents: args.agents.clone(),
        visit_status_filter: args.visit_status_filter,
        new_patient_marker: args.new_patient_marker.clone(),
        escalated_accounts,
    };
    let config = overrides.apply(config);

    let report = read_report(&args.report)
        .with_context(|| format!("read report {}", args.report.display()))?;
    let reference = read_reference(&args.reference)
        .with_context(|| format!("read reference sheet {}", args.reference.display()))?;
    let output = run(&report, &reference, &config).context("allocate report rows")?;

    info!(
        input_rows = output.summary.input_rows,
        output_rows = output.summary.final_rows,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult { output, config })
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let reference = read_reference(&args.reference)
        .with_context(|| format!("read reference sheet {}", args.reference.display()))?;
    let lookup =
        LookupIndex::build(&reference, &config.reference).context("build lookup index")?;
    let (states, visit_types) = lookup_tables(&lookup);
    println!("{states}");
    println!("{visit_types}");
    println!(
        "{} valid states, {} visit types ({} workable)",
        lookup.valid_states().count(),
        lookup.visit_types().count(),
        lookup.workable_count()
    );
    Ok(())
}

pub fn run_config() -> Result<()> {
    let text = default_config_toml().context("render default configuration")?;
    print!("{text}");
    Ok(())
}

fn resolve_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("load config {}", path.display()))
        }
        None => Ok(RunConfig::default()),
    }
}
