#![deny(missing_docs)]

//! # Source Plugins
//!
//! Turns a reference target (URL, file path or inline text) into a parsed value.
//!
//! Plugins are tagged strategies held in an ordered list. The first plugin whose
//! `validate` accepts the input handles it; nothing else is tried afterwards.

use derive_more::Display;
use serde_json::Value;
use tracing::debug;

/// Remote loading over HTTP(S).
pub mod fetch_urls;

/// Concurrency limiter for network calls.
pub mod limiter;

/// Inline JSON / YAML detection and parsing.
pub mod parse_text;

/// Local file loading.
pub mod read_files;

pub use fetch_urls::{
    fetch_url, headers_for, is_remote_url, FetchOptions, FetchResponse, FetchTransport, FetchUrls,
    HeaderRule, ReqwestTransport,
};
pub use limiter::{Limiter, DEFAULT_CONCURRENCY};
pub use read_files::read_file;

/// A recoverable failure while loading one source.
///
/// Attached to the reference that needed the source; never aborts a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SourceError {
    /// The request could not be performed.
    #[display("Failed to fetch {url}: {reason}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Transport message.
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[display("Fetching {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The content is neither valid JSON nor valid YAML.
    #[display("Failed to parse {input}: {reason}")]
    Parse {
        /// Source the content came from.
        input: String,
        /// Parser message.
        reason: String,
    },

    /// A local file could not be read.
    #[display("Failed to read {path}: {reason}")]
    Io {
        /// File path.
        path: String,
        /// OS message.
        reason: String,
    },

    /// No plugin accepted the input.
    #[display("No plugin can load '{_0}'")]
    Unsupported(String),
}

impl std::error::Error for SourceError {}

/// One loading strategy.
#[derive(Debug, Clone)]
pub enum LoaderPlugin {
    /// `http://` and `https://` URLs.
    FetchUrls(FetchUrls),
    /// Anything that is not a URL and not inline text.
    ReadFiles,
    /// Inline JSON object or array text.
    ParseJson,
    /// Inline YAML mapping text.
    ParseYaml,
}

impl LoaderPlugin {
    /// Short identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchUrls(_) => "fetch-urls",
            Self::ReadFiles => "read-files",
            Self::ParseJson => "parse-json",
            Self::ParseYaml => "parse-yaml",
        }
    }

    /// Whether the input names a location (URL or path) rather than carrying content.
    ///
    /// Locations become the origin for relative references found in the loaded document.
    pub fn is_locator(&self) -> bool {
        matches!(self, Self::FetchUrls(_) | Self::ReadFiles)
    }

    /// Whether this plugin recognizes `value`.
    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::FetchUrls(_) => is_remote_url(value),
            Self::ReadFiles => {
                !value.trim().is_empty()
                    && !is_remote_url(value)
                    && !parse_text::is_json_text(value)
                    && !parse_text::is_yaml_text(value)
            }
            Self::ParseJson => parse_text::is_json_text(value),
            Self::ParseYaml => parse_text::is_yaml_text(value),
        }
    }

    /// Loads `value` into a document.
    pub async fn exec(&self, value: &str) -> Result<Value, SourceError> {
        match self {
            Self::FetchUrls(state) => fetch_url(value, &state.limiter, &state.options).await,
            Self::ReadFiles => read_file(value).await,
            Self::ParseJson => parse_text::parse_json(value, "inline JSON"),
            Self::ParseYaml => parse_text::parse_yaml(value, "inline YAML"),
        }
    }
}

/// The standard pipeline: URLs, inline JSON, inline YAML, then files.
pub fn default_plugins() -> Vec<LoaderPlugin> {
    plugins_with_fetch(FetchUrls::default())
}

/// The standard pipeline with a custom URL loader.
pub fn plugins_with_fetch(fetch: FetchUrls) -> Vec<LoaderPlugin> {
    vec![
        LoaderPlugin::FetchUrls(fetch),
        LoaderPlugin::ParseJson,
        LoaderPlugin::ParseYaml,
        LoaderPlugin::ReadFiles,
    ]
}

/// Returns the first plugin that recognizes `value`.
pub fn find_plugin<'a>(value: &str, plugins: &'a [LoaderPlugin]) -> Option<&'a LoaderPlugin> {
    plugins.iter().find(|plugin| plugin.validate(value))
}

/// Loads `value` with the first plugin that recognizes it.
///
/// # Errors
///
/// [`SourceError::Unsupported`] when no plugin matches, otherwise whatever the
/// selected plugin reports. Later plugins are never tried after a match fails.
pub async fn resolve_with_plugins(
    value: &str,
    plugins: &[LoaderPlugin],
) -> Result<Value, SourceError> {
    let Some(plugin) = find_plugin(value, plugins) else {
        return Err(SourceError::Unsupported(value.to_string()));
    };
    debug!(plugin = plugin.name(), source = value, "loading source");
    plugin.exec(value).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_order_routes_inputs() {
        let plugins = default_plugins();
        let pick = |value: &str| find_plugin(value, &plugins).map(LoaderPlugin::name);

        assert_eq!(pick("https://example.com/a.yaml"), Some("fetch-urls"));
        assert_eq!(pick(r#"{"openapi":"3.1.0"}"#), Some("parse-json"));
        assert_eq!(pick("openapi: 3.1.0\n"), Some("parse-yaml"));
        assert_eq!(pick("./specs/openapi.yaml"), Some("read-files"));
        assert_eq!(pick("   "), None);
    }

    #[test]
    fn test_locators() {
        assert!(LoaderPlugin::ReadFiles.is_locator());
        assert!(LoaderPlugin::FetchUrls(FetchUrls::default()).is_locator());
        assert!(!LoaderPlugin::ParseJson.is_locator());
        assert!(!LoaderPlugin::ParseYaml.is_locator());
    }

    #[tokio::test]
    async fn test_resolve_inline_text() {
        let plugins = default_plugins();
        assert_eq!(
            resolve_with_plugins(r#"{"a": [1]}"#, &plugins).await.unwrap(),
            json!({ "a": [1] })
        );
        assert_eq!(
            resolve_with_plugins("a:\n  b: c\n", &plugins).await.unwrap(),
            json!({ "a": { "b": "c" } })
        );
    }

    #[tokio::test]
    async fn test_first_match_wins_and_does_not_fall_through() {
        // A failing file read is reported as is, the YAML plugin is not retried
        let plugins = vec![LoaderPlugin::ReadFiles, LoaderPlugin::ParseYaml];
        let err = resolve_with_plugins("/definitely/missing/file.yaml", &plugins)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_no_plugin_is_unsupported() {
        let err = resolve_with_plugins("https://example.com/a.json", &[LoaderPlugin::ParseJson])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::Unsupported("https://example.com/a.json".to_string())
        );
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Status {
            url: "https://example.com/a.json".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Fetching https://example.com/a.json returned status 500"
        );
    }
}
