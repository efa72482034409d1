//! src/cli.rs
use crate::accumulators::Accumulator;
use crate::configuration::{get_configuration, Settings};
use crate::control::{CancellationFlag, RunControl};
use crate::emitter::FileEmitter;
use crate::executors::{ParallelExecutor, SequentialExecutor};
use crate::extractors::FieldExtractor;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::telemetry::init_tracing;
use anyhow::Context;
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct JobArgs {
    /// Comma delimited listing export to read
    pub input: PathBuf,
    /// Directory to write results into; must not exist yet
    pub output: PathBuf,
}

/// Entry point shared by the job binaries. Wrong arguments exit through
/// clap's usage error path before anything else happens.
pub fn run_job<E, A>(service_name: &'static str, job: Pipeline<E, A>) -> ExitCode
where
    E: FieldExtractor,
    A: Accumulator<Measure = E::Measure>,
{
    let args = JobArgs::parse();
    let settings = match get_configuration() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to read configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let tracer_provider = match init_tracing(service_name, &settings.telemetry) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Failed to set up tracing: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let job = job.with_settings(&settings.pipeline);
    let code = match execute(&args, &settings, &job) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Job failed");
            ExitCode::FAILURE
        }
    };

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            eprintln!("Failed to flush traces: {e}");
        }
    }
    code
}

pub fn execute<E, A>(args: &JobArgs, settings: &Settings, job: &Pipeline<E, A>) -> anyhow::Result<PipelineReport>
where
    E: FieldExtractor,
    A: Accumulator<Measure = E::Measure>,
{
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("Job", job = job.name(), %run_id);
    let _guard = span.enter();

    let cancellation = CancellationFlag::new();
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, cancellation.as_arc())
            .context("Failed to register signal handler")?;
    }

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;
    let mut emitter = FileEmitter::create(&args.output, settings.pipeline.reduce_tasks)
        .with_context(|| format!("Failed to prepare output {}", args.output.display()))?;
    let control = RunControl::new(cancellation, settings.pipeline.max_rejected_records);
    let reader = BufReader::new(input);

    let report = if settings.pipeline.workers <= 1 {
        job.run(reader, &SequentialExecutor, &mut emitter, &control)
    } else {
        let executor = ParallelExecutor::new(settings.pipeline.workers)?;
        job.run(reader, &executor, &mut emitter, &control)
    }
    .context("Job did not complete")?;

    Ok(report)
}
