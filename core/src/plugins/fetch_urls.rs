//! Remote source loading over HTTP(S).
//!
//! Every request goes through the injected [`Limiter`]. Header rules are scoped
//! per domain and only attached when the request host is listed by the rule.

use super::limiter::Limiter;
use super::parse_text::parse_by_content_type;
use super::SourceError;
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Whether `value` is an `http://` or `https://` URL.
pub fn is_remote_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Headers to send to a set of domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRule {
    /// Header name -> value.
    pub headers: IndexMap<String, String>,
    /// Hosts (`example.com` or `example.com:8080`) the headers may be sent to.
    pub domains: Vec<String>,
}

impl HeaderRule {
    /// Creates a rule for the given domains with no headers yet.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: IndexMap::new(),
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a header to the rule.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn matches(&self, host: &str, host_with_port: Option<&str>) -> bool {
        self.domains.iter().any(|domain| {
            domain.eq_ignore_ascii_case(host)
                || host_with_port.is_some_and(|hp| domain.eq_ignore_ascii_case(hp))
        })
    }
}

/// The raw outcome of one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

/// The network primitive used by [`fetch_url`]. Replaceable for tests or custom stacks.
#[async_trait]
pub trait FetchTransport: Send + Sync {
    /// Performs a GET request. Transport failures are reported as a message.
    async fn fetch(
        &self,
        url: &str,
        headers: &IndexMap<String, String>,
    ) -> Result<FetchResponse, String>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (timeouts, proxies, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchTransport for ReqwestTransport {
    async fn fetch(
        &self,
        url: &str,
        headers: &IndexMap<String, String>,
    ) -> Result<FetchResponse, String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| e.to_string())?;

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Options for [`fetch_url`].
#[derive(Clone)]
pub struct FetchOptions {
    /// Per-domain header rules.
    pub headers: Vec<HeaderRule>,
    /// Network primitive.
    pub transport: Arc<dyn FetchTransport>,
}

impl FetchOptions {
    /// Adds a header rule.
    pub fn with_header_rule(mut self, rule: HeaderRule) -> Self {
        self.headers.push(rule);
        self
    }

    /// Replaces the network primitive.
    pub fn with_transport(mut self, transport: Arc<dyn FetchTransport>) -> Self {
        self.transport = transport;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            transport: Arc::new(ReqwestTransport::new()),
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// The `FetchUrls` plugin state: a limiter plus fetch options.
#[derive(Debug, Clone, Default)]
pub struct FetchUrls {
    /// Limiter applied to every request.
    pub limiter: Limiter,
    /// Header rules and transport.
    pub options: FetchOptions,
}

impl FetchUrls {
    /// Creates the plugin state.
    pub fn new(limiter: Limiter, options: FetchOptions) -> Self {
        Self { limiter, options }
    }
}

/// Collects the headers whose rule lists the host of `url`.
///
/// The first matching rule wins. Unparseable URLs get no headers.
pub fn headers_for(url: &str, rules: &[HeaderRule]) -> IndexMap<String, String> {
    let Ok(parsed) = Url::parse(url) else {
        return IndexMap::new();
    };
    let Some(host) = parsed.host_str() else {
        return IndexMap::new();
    };
    let host_with_port = parsed.port().map(|port| format!("{host}:{port}"));

    rules
        .iter()
        .find(|rule| rule.matches(host, host_with_port.as_deref()))
        .map(|rule| rule.headers.clone())
        .unwrap_or_default()
}

/// Fetches and parses a remote document.
///
/// Never panics or aborts: transport failures, non-2xx statuses and parse
/// failures all come back as [`SourceError`].
pub async fn fetch_url(
    url: &str,
    limiter: &Limiter,
    options: &FetchOptions,
) -> Result<Value, SourceError> {
    let headers = headers_for(url, &options.headers);
    debug!(url, scoped_headers = headers.len(), "fetching remote source");

    let response = limiter
        .run(options.transport.fetch(url, &headers))
        .await
        .map_err(|reason| SourceError::Fetch {
            url: url.to_string(),
            reason,
        })?;

    if !(200..300).contains(&response.status) {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    parse_by_content_type(response.content_type.as_deref(), &response.body, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn options_with(rules: Vec<HeaderRule>) -> FetchOptions {
        rules
            .into_iter()
            .fold(FetchOptions::default(), FetchOptions::with_header_rule)
    }

    #[test]
    fn test_is_remote_url() {
        assert!(is_remote_url("https://example.com/schema.json"));
        assert!(is_remote_url("http://api.example.com/schemas/user.json"));
        assert!(!is_remote_url("#/components/schemas/User"));
        assert!(!is_remote_url("./local-schema.json"));
    }

    #[test]
    fn test_headers_for_scopes_by_host() {
        let rules = vec![
            HeaderRule::new(["api.example.com"]).header("Authorization", "Bearer a"),
            HeaderRule::new(["localhost:8080"]).header("X-Local", "1"),
        ];

        let scoped = headers_for("https://api.example.com/openapi.yaml", &rules);
        assert_eq!(scoped.get("Authorization").map(String::as_str), Some("Bearer a"));

        assert!(headers_for("https://evil.example.org/openapi.yaml", &rules).is_empty());
        assert!(headers_for("https://example.com/openapi.yaml", &rules).is_empty());

        let local = headers_for("http://localhost:8080/a.json", &rules);
        assert_eq!(local.get("X-Local").map(String::as_str), Some("1"));
        assert!(headers_for("http://localhost:9090/a.json", &rules).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_url_parses_json_and_sends_scoped_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .and(header("X-Token", "secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string(r#"{"openapi":"3.1.0"}"#),
            )
            .mount(&server)
            .await;

        let host = server.address().to_string();
        let options = options_with(vec![HeaderRule::new([host]).header("X-Token", "secret")]);

        let url = format!("{}/openapi.json", server.uri());
        let value = fetch_url(&url, &Limiter::default(), &options).await.unwrap();
        assert_eq!(value, json!({ "openapi": "3.1.0" }));
    }

    #[tokio::test]
    async fn test_fetch_url_never_leaks_headers_to_other_hosts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spec.yaml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/yaml")
                    .set_body_string("openapi: 3.1.0\n"),
            )
            .mount(&server)
            .await;

        let options = options_with(vec![
            HeaderRule::new(["api.example.com"]).header("X-Token", "secret")
        ]);
        let url = format!("{}/spec.yaml", server.uri());
        let value = fetch_url(&url, &Limiter::default(), &options).await.unwrap();
        assert_eq!(value, json!({ "openapi": "3.1.0" }));

        let received: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("X-Token").is_none());
    }

    #[tokio::test]
    async fn test_fetch_url_reports_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.json", server.uri());
        let err = fetch_url(&url, &Limiter::default(), &FetchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, SourceError::Status { url, status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_url_reports_parse_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string("{ not json"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/broken.json", server.uri());
        let err = fetch_url(&url, &Limiter::default(), &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_url_reports_network_failures() {
        // Port 9 (discard) on localhost is not served in the test environment
        let err = fetch_url(
            "http://127.0.0.1:9/openapi.json",
            &Limiter::default(),
            &FetchOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SourceError::Fetch { .. }));
    }
}
