//! The reduce side of a MapReduce (lite) system.
//!
//! A reduce task collects the intermediate shards that every map task wrote
//! for one partition, groups their records by key and hands each group to an
//! application reduce function. Results are written in ascending key order to
//! a single output file that the final merge step picks up.

use serde::{Deserialize, Serialize};

pub mod cmd;
pub mod codec;
pub mod engine;
pub mod error;
pub mod group;
pub mod naming;
pub mod reader;
pub mod tasklog;
pub mod workload;
pub mod writer;

pub use engine::{perform_reduce, run_reduce_task, ReduceJob, ReduceSummary};
pub use error::{ErrorKind, ReduceError};

/////////////////////////////////////////////////////////////////////////////
// MapReduce application types
/////////////////////////////////////////////////////////////////////////////

/// A reduce function takes in a key and every value recorded for that key,
/// in read order. It returns an [`anyhow::Result`] containing the aggregate.
pub type ReduceFn = fn(key: &str, values: &[String]) -> anyhow::Result<String>;

/////////////////////////////////////////////////////////////////////////////
// Key-value pairs
/////////////////////////////////////////////////////////////////////////////

/// A single key-value pair.
///
/// This is both the intermediate record read from shards and the output
/// record written by a reduce task (where `value` holds the aggregate).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct KeyValue {
    /// The key.
    #[serde(rename = "Key")]
    pub key: String,
    /// The value.
    #[serde(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Construct a new key-value pair from the given key and value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key of this key-value pair.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value of this key-value pair.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the key-value pair and returns the value.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }
}

/// All values recorded under one key within a partition.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Group {
    pub key: String,
    /// Values in shard order, then file order within a shard.
    pub values: Vec<String>,
}
