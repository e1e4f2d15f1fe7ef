//! Local file loading.

use super::parse_text::normalize;
use super::SourceError;
use serde_json::Value;
use tracing::debug;

/// Reads and parses a local JSON or YAML file.
///
/// The syntax is detected from the content (JSON first, YAML as fallback),
/// whatever the extension says.
pub async fn read_file(path: &str) -> Result<Value, SourceError> {
    debug!(path, "reading local source");
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    normalize(&text, path)
}
