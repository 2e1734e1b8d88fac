use anyhow::*;
use clap::Parser;
use mrreduce::cmd::reduce::Args;
use mrreduce::tasklog::LogFacade;
use mrreduce::*;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let reduce_fn = workload::named(&args.workload)?;
    let job = args.to_job();

    let summary = perform_reduce(&job, reduce_fn, &LogFacade)
        .with_context(|| format!("reduce task {} of job {}", job.reduce_idx, job.name))?;
    tracing::info!(
        output = %summary.output.display(),
        groups = summary.groups,
        "results ready"
    );
    Ok(())
}
