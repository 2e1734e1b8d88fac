//! Sorting and grouping of a partition's records.

use itertools::Itertools;

use crate::{Group, KeyValue};

/// Sorts by key, comparing bytes. Records that share a key keep the order
/// they were read in.
pub fn sort_records(records: &mut [KeyValue]) {
    records.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));
}

/// Sorts `records` and collapses each run of equal keys into one [`Group`].
///
/// Groups come out in ascending key order.
pub fn group_records(mut records: Vec<KeyValue>) -> Vec<Group> {
    sort_records(&mut records);
    records
        .into_iter()
        .chunk_by(|kv| kv.key.clone())
        .into_iter()
        .map(|(key, run)| Group {
            key,
            values: run.map(KeyValue::into_value).collect(),
        })
        .collect()
}
