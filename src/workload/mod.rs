//! Converts reduce application names to actual application code.
//!
//! # Example
//!
//! To get the word count application:
//! ```
//! # use anyhow::Result;
//! use mrreduce::workload;
//! # fn main() -> Result<()> {
//! let wc = workload::named("wc")?;
//! assert_eq!(wc("a", &["1".to_string(), "2".to_string()])?, "3");
//! # Ok(())
//! # }
//! ```

use crate::ReduceFn;
use anyhow::{bail, Result};

pub mod ii;
pub mod wc;

/// Gets the reduce function named `name`.
///
/// Returns [`None`] if no application with the given name was found.
pub fn try_named(name: &str) -> Option<ReduceFn> {
    match name {
        "wc" => Some(wc::reduce as ReduceFn),
        "ii" => Some(ii::reduce as ReduceFn),
        _ => None,
    }
}

/// Gets the reduce function named `name`.
///
/// Returns an [`anyhow::Error`] if no application with the given name was found.
pub fn named(name: &str) -> Result<ReduceFn> {
    match try_named(name) {
        Some(app) => Ok(app),
        None => bail!("No app named `{}` found.", name),
    }
}
