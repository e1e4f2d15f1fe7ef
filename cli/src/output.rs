//! Reading and writing documents as JSON or YAML, chosen by file extension.

use crate::error::CliResult;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Loads a JSON or YAML document from disk.
pub fn read_document(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

/// Serializes `value` for `output` (`.yaml`/`.yml` -> YAML, anything else -> JSON).
pub fn render(value: &Value, output: Option<&Path>) -> CliResult<String> {
    match output {
        Some(path) if is_yaml(path) => Ok(serde_yaml::to_string(value)?),
        _ => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Writes `value` to `output`, or prints JSON to stdout when no path is given.
pub fn write_document(value: &Value, output: Option<&Path>) -> CliResult<()> {
    let rendered = render(value, output)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
