use anyhow::{anyhow, Result};

use crate::model::record::WorkMode;

const WORK_MODES: [&str; 2] = ["office", "remote"];

/// Expands an unambiguous prefix to one of `candidates`.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

pub fn parse_work_mode(input: &str) -> Result<WorkMode> {
    let key = input.trim().to_lowercase();
    if key.is_empty() {
        return Err(anyhow!("Empty work mode"));
    }
    match expand_key(&key, &WORK_MODES)?.as_str() {
        "office" => Ok(WorkMode::Office),
        _ => Ok(WorkMode::Remote),
    }
}
