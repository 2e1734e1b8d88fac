//! File names shared with the map phase and the final merge step.

/// Name of the intermediate file that map task `map_idx` produces for
/// reduce task `reduce_idx`.
pub fn shard_name(job: &str, map_idx: usize, reduce_idx: usize) -> String {
    format!("mrtmp.{}-{}-{}", job, map_idx, reduce_idx)
}

/// Name of the output file of reduce task `reduce_idx`.
pub fn result_name(job: &str, reduce_idx: usize) -> String {
    format!("mrtmp.{}-res-{}", job, reduce_idx)
}
