use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::codec::RecordReader;
use crate::engine::ReduceJob;
use crate::error::ReduceError;
use crate::naming::shard_name;
use crate::tasklog::TaskLog;
use crate::KeyValue;

/// Reads every shard of `job`'s partition, in map task order, and returns
/// their records concatenated.
///
/// A shard that cannot be opened means its map task has not finished, so it
/// fails the whole read instead of being skipped.
pub fn read_partition(job: &ReduceJob, log: &dyn TaskLog) -> Result<Vec<KeyValue>, ReduceError> {
    let mut records = Vec::new();
    for map_idx in 0..job.n_map {
        let path = job.dir.join(shard_name(&job.name, map_idx, job.reduce_idx));
        let count = read_shard(&path, &mut records)?;
        log.info(format_args!(
            "read {} records from {}",
            count,
            path.display()
        ));
    }
    Ok(records)
}

/// Appends the records of the shard at `path` to `records`.
///
/// The file is closed before this returns, whether or not decoding
/// succeeded.
pub fn read_shard(path: &Path, records: &mut Vec<KeyValue>) -> Result<usize, ReduceError> {
    let file = File::open(path).map_err(|source| ReduceError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut count = 0;
    for item in RecordReader::new(BufReader::new(file)) {
        let kv = item.map_err(|source| ReduceError::Decode {
            path: path.to_path_buf(),
            record: count,
            source,
        })?;
        records.push(kv);
        count += 1;
    }
    Ok(count)
}
