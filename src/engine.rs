//! Runs one reduce task: read, group, reduce, write.
//!
//! A task is strictly sequential. Concurrent tasks are isolated only by their
//! output files, so the same (job, partition) pair must never run twice at
//! once.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ReduceError;
use crate::group::group_records;
use crate::naming::result_name;
use crate::reader::read_partition;
use crate::tasklog::TaskLog;
use crate::writer::write_results;
use crate::{Group, KeyValue};

/// Everything a reduce task needs to know about its partition.
#[derive(Debug, Clone)]
pub struct ReduceJob {
    /// Name of the whole MapReduce job.
    pub name: String,
    /// Which partition this task reduces.
    pub reduce_idx: usize,
    /// How many map tasks ran, which is how many shards to read.
    pub n_map: usize,
    /// Where shards live. Relative output paths resolve against it as well.
    pub dir: PathBuf,
    pub out_file: PathBuf,
}

impl ReduceJob {
    pub fn new(name: impl Into<String>, reduce_idx: usize, n_map: usize) -> Self {
        let name = name.into();
        let out_file = PathBuf::from(result_name(&name, reduce_idx));
        Self {
            name,
            reduce_idx,
            n_map,
            dir: PathBuf::from("."),
            out_file,
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_out_file(mut self, out_file: impl Into<PathBuf>) -> Self {
        self.out_file = out_file.into();
        self
    }

    /// The output file, resolved against [`ReduceJob::dir`].
    pub fn out_path(&self) -> PathBuf {
        self.dir.join(&self.out_file)
    }
}

/// What a finished reduce task did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceSummary {
    pub records: usize,
    pub groups: usize,
    pub output: PathBuf,
}

/// Calls `reduce_fn` once per group, in order, and pairs each key with its
/// aggregate. Stops at the first failure.
pub fn invoke_reduce<F>(groups: Vec<Group>, mut reduce_fn: F) -> Result<Vec<KeyValue>, ReduceError>
where
    F: FnMut(&str, &[String]) -> anyhow::Result<String>,
{
    groups
        .into_iter()
        .map(|Group { key, values }| match reduce_fn(&key, &values) {
            Ok(aggregate) => Ok(KeyValue::new(key, aggregate)),
            Err(err) => Err(ReduceError::UserFunction {
                key,
                source: err.into(),
            }),
        })
        .collect()
}

/// Runs the reduce task described by `job`.
///
/// Any output left at the destination by an earlier run is removed first, so
/// a failed task never leaves a result file behind that could pass for a
/// complete one.
pub fn perform_reduce<F>(
    job: &ReduceJob,
    reduce_fn: F,
    log: &dyn TaskLog,
) -> Result<ReduceSummary, ReduceError>
where
    F: FnMut(&str, &[String]) -> anyhow::Result<String>,
{
    log.info(format_args!(
        "starting reduce task {} of job {} over {} shards",
        job.reduce_idx, job.name, job.n_map
    ));
    match reduce_partition(job, reduce_fn, log) {
        Ok(summary) => {
            log.info(format_args!(
                "reduce task {} of job {} done: {} records in {} groups",
                job.reduce_idx, job.name, summary.records, summary.groups
            ));
            Ok(summary)
        }
        Err(err) => {
            log.error(format_args!(
                "reduce task {} of job {} failed: {}",
                job.reduce_idx, job.name, err
            ));
            Err(err)
        }
    }
}

fn reduce_partition<F>(
    job: &ReduceJob,
    reduce_fn: F,
    log: &dyn TaskLog,
) -> Result<ReduceSummary, ReduceError>
where
    F: FnMut(&str, &[String]) -> anyhow::Result<String>,
{
    let output = job.out_path();
    remove_stale(&output)?;

    let records = read_partition(job, log)?;
    let n_records = records.len();
    let groups = group_records(records);
    let n_groups = groups.len();
    log.info(format_args!(
        "sorted {} records into {} groups",
        n_records, n_groups
    ));

    let results = invoke_reduce(groups, reduce_fn)?;
    write_results(&output, &results, log)?;

    Ok(ReduceSummary {
        records: n_records,
        groups: n_groups,
        output,
    })
}

fn remove_stale(output: &Path) -> Result<(), ReduceError> {
    match fs::remove_file(output) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReduceError::encode(output, e)),
    }
}

/// Entry point used by a worker that was handed a reduce task.
///
/// Shards are looked up in the current directory and the results are
/// written to `out_file`.
pub fn run_reduce_task<F>(
    log: &dyn TaskLog,
    job_name: &str,
    reduce_idx: usize,
    out_file: impl AsRef<Path>,
    n_map: usize,
    reduce_fn: F,
) -> Result<ReduceSummary, ReduceError>
where
    F: FnMut(&str, &[String]) -> anyhow::Result<String>,
{
    let job = ReduceJob::new(job_name, reduce_idx, n_map).with_out_file(out_file.as_ref());
    perform_reduce(&job, reduce_fn, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn group(key: &str, values: &[&str]) -> Group {
        Group {
            key: key.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn one_call_per_group_in_order() {
        let groups = vec![group("a", &["1", "2"]), group("b", &["3"])];
        let mut seen = Vec::new();
        let results = invoke_reduce(groups, |key, values| {
            seen.push((key.to_string(), values.to_vec()));
            Ok(values.join("+"))
        })
        .unwrap();
        assert_eq!(
            results,
            vec![KeyValue::new("a", "1+2"), KeyValue::new("b", "3")]
        );
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), vec!["1".to_string(), "2".to_string()]),
                ("b".to_string(), vec!["3".to_string()]),
            ]
        );
    }

    #[test]
    fn user_failure_stops_the_task() {
        let groups = vec![group("a", &["1"]), group("b", &["x"]), group("c", &["2"])];
        let mut calls = 0;
        let err = invoke_reduce(groups, |_, values| {
            calls += 1;
            let n: u64 = values[0].parse()?;
            Ok(n.to_string())
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserFunction);
        assert_eq!(calls, 2);
        match err {
            ReduceError::UserFunction { key, .. } => assert_eq!(key, "b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn job_defaults() {
        let job = ReduceJob::new("wc", 4, 3);
        assert_eq!(job.out_file, PathBuf::from("mrtmp.wc-res-4"));
        assert_eq!(job.out_path(), Path::new(".").join("mrtmp.wc-res-4"));

        let job = job.with_dir("/work").with_out_file("custom");
        assert_eq!(job.out_path(), PathBuf::from("/work/custom"));
        let job = job.with_out_file("/elsewhere/out");
        assert_eq!(job.out_path(), PathBuf::from("/elsewhere/out"));
    }
}
