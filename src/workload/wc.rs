//! The reduce half of word count.
//!

use anyhow::{Context, Result};

/// Sums the values, each a decimal count emitted by the map phase.
pub fn reduce(key: &str, values: &[String]) -> Result<String> {
    let mut count: u64 = 0;
    for value in values {
        let n: u64 = value
            .parse()
            .with_context(|| format!("count {:?} for {:?} is not a number", value, key))?;
        count = count
            .checked_add(n)
            .with_context(|| format!("count for {:?} overflows", key))?;
    }
    Ok(count.to_string())
}
