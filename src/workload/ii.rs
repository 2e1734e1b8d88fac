//! The reduce half of an inverted index.
//!
//! The map phase emits `(word, document)` pairs. For each word this produces
//! `"<n> <doc>,<doc>,..."`, listing the `n` distinct documents it appears in.

use anyhow::Result;
use itertools::Itertools;

pub fn reduce(_key: &str, values: &[String]) -> Result<String> {
    let docs = values.iter().sorted().dedup().collect::<Vec<_>>();
    Ok(format!("{} {}", docs.len(), docs.iter().join(",")))
}
