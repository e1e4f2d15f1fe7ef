#![deny(missing_docs)]

//! # Bundle Engine
//!
//! Produces one self-contained document from an entrypoint whose references may
//! point at other files or URLs.
//!
//! External content is hoisted once per source under `x-ext/<key>` and every
//! reference to it is rewritten to a local pointer. The walk runs in waves:
//! collect the external references reachable so far, fetch the missing sources
//! concurrently, hoist them, then walk the newly hoisted content. A source is
//! hoisted at most once, so cyclic graphs stay references and the run ends.
//!
//! References back to the entrypoint's own source become plain local pointers.
//! A reference node marked `"$global": true` hoists a chunk whose local
//! references already point at the root document, so they are left as written.

use crate::error::{AppError, AppResult};
use crate::plugins::{
    default_plugins, find_plugin, resolve_with_plugins, LoaderPlugin, SourceError,
};
use crate::pointer::{
    get_by_path, get_by_path_mut, parse_pointer, set_value_at_path, to_pointer, Path,
};
use crate::value_generator::{generate_unique_value, UniqueValueMap, ValueHasher, Xxh64Hasher};
use derive_more::Display;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reference string helpers.
pub mod references;

/// Reachability pass over hoisted content.
pub mod tree_shake;

pub use references::{
    is_local_ref, prefix_internal_ref, prefix_internal_refs_recursive, resolve_reference_path,
    split_reference,
};
pub use tree_shake::tree_shake;

/// Root key holding hoisted external documents.
pub const EXTERNAL_KEY: &str = "x-ext";

/// Root key mapping hoisted keys back to their sources.
pub const EXTERNAL_URLS_KEY: &str = "x-ext-urls";

/// Reference node flag marking a chunk whose local references target the root document.
pub const GLOBAL_KEY: &str = "$global";

const REF_KEY: &str = "$ref";

/// What to bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum Entrypoint {
    /// An already parsed document. Bundled in place of a copy.
    Document(Value),
    /// A URL, a file path, or inline JSON / YAML text.
    Source(String),
}

impl From<Value> for Entrypoint {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

impl From<String> for Entrypoint {
    fn from(value: String) -> Self {
        Self::Source(value)
    }
}

impl From<&str> for Entrypoint {
    fn from(value: &str) -> Self {
        Self::Source(value.to_string())
    }
}

/// A reference that could not be resolved. The rest of the bundle is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{location} ({reference}): {error}")]
pub struct ReferenceError {
    /// Pointer to the reference node in the output document.
    pub location: String,
    /// The `$ref` value as written.
    pub reference: String,
    /// Why loading failed.
    pub error: SourceError,
}

/// Callbacks into a bundle run. All methods default to no-ops.
///
/// The node callbacks receive every object the walk visits, hoisted content
/// included, and may mutate it.
pub trait BundleHooks: Send + Sync {
    /// An external reference is about to be resolved.
    fn on_resolve_start(&self, _location: &str, _reference: &str) {}

    /// An external reference was resolved and rewritten.
    fn on_resolve_success(&self, _location: &str, _reference: &str) {}

    /// An external reference failed and was left untouched.
    fn on_resolve_error(&self, _error: &ReferenceError) {}

    /// An object is about to be walked. Keys added here are walked as well.
    fn on_before_node_process(&self, _node: &mut Map<String, Value>, _location: &str) {}

    /// Everything below an object was walked. Changes made here are not walked.
    fn on_after_node_process(&self, _node: &mut Map<String, Value>, _location: &str) {}
}

/// Configuration of one bundle run.
#[derive(Clone)]
pub struct BundleOptions {
    /// Loaders, tried in order.
    pub plugins: Vec<LoaderPlugin>,
    /// Drop hoisted content nothing references.
    pub tree_shake: bool,
    /// Emit the `x-ext-urls` map.
    pub url_map: bool,
    /// Base for relative references of the entrypoint. Defaults to the entrypoint location.
    pub origin: Option<String>,
    /// Only bundle the references below this path and the local targets they lead to.
    pub subtree: Option<Path>,
    /// Leave references nested deeper than this many levels untouched.
    pub depth: Option<usize>,
    /// Names hoisted sources.
    pub hasher: Arc<dyn ValueHasher>,
    /// Resolution observer.
    pub hooks: Option<Arc<dyn BundleHooks>>,
}

impl BundleOptions {
    /// Replaces the plugin list.
    pub fn with_plugins(mut self, plugins: Vec<LoaderPlugin>) -> Self {
        self.plugins = plugins;
        self
    }

    /// Enables or disables tree shaking.
    pub fn with_tree_shake(mut self, enabled: bool) -> Self {
        self.tree_shake = enabled;
        self
    }

    /// Enables or disables the `x-ext-urls` map.
    pub fn with_url_map(mut self, enabled: bool) -> Self {
        self.url_map = enabled;
        self
    }

    /// Sets the base for relative references of the entrypoint.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Restricts bundling to one sub-path (implies the URL map).
    pub fn with_subtree<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtree = Some(path.into_iter().map(Into::into).collect());
        self
    }

    /// Limits how deep below the root references are resolved (implies the URL map).
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Replaces the naming hasher.
    pub fn with_hasher(mut self, hasher: impl ValueHasher + 'static) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Installs resolution hooks.
    pub fn with_hooks(mut self, hooks: Arc<dyn BundleHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            plugins: default_plugins(),
            tree_shake: false,
            url_map: false,
            origin: None,
            subtree: None,
            depth: None,
            hasher: Arc::new(Xxh64Hasher::new()),
            hooks: None,
        }
    }
}

impl fmt::Debug for BundleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleOptions")
            .field("plugins", &self.plugins)
            .field("tree_shake", &self.tree_shake)
            .field("url_map", &self.url_map)
            .field("origin", &self.origin)
            .field("subtree", &self.subtree)
            .field("depth", &self.depth)
            .field("hooks", &self.hooks.is_some())
            .finish_non_exhaustive()
    }
}

/// Result of a bundle run.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleOutput {
    /// The bundled document.
    pub document: Value,
    /// Non-fatal failures, one per unresolved reference site.
    pub errors: Vec<ReferenceError>,
}

/// Bundles `entrypoint` into one self-contained document.
///
/// # Errors
///
/// * [`AppError::InvalidEntrypoint`] if the entrypoint cannot be loaded or is not an object.
/// * [`AppError::CollisionDepthExceeded`] if a source cannot be given a unique key.
///
/// Failures of individual references are reported in [`BundleOutput::errors`].
pub async fn bundle(
    entrypoint: impl Into<Entrypoint>,
    options: &BundleOptions,
) -> AppResult<BundleOutput> {
    let (document, origin) = load_entrypoint(entrypoint.into(), options).await?;
    let origin = options.origin.clone().or(origin);

    let mut run = BundleRun::new(document, options, origin);
    let start = options.subtree.clone().unwrap_or_default();
    if get_by_path(&run.document, &start).is_none() {
        return Err(AppError::InvalidEntrypoint(format!(
            "subtree {} does not exist",
            to_pointer(&start)
        )));
    }
    run.schedule_root(start);

    run.resolve_all().await?;
    Ok(run.finish())
}

async fn load_entrypoint(
    entrypoint: Entrypoint,
    options: &BundleOptions,
) -> AppResult<(Value, Option<String>)> {
    let (document, origin) = match entrypoint {
        Entrypoint::Document(document) => (document, None),
        Entrypoint::Source(source) => {
            let plugin = find_plugin(&source, &options.plugins).ok_or_else(|| {
                AppError::InvalidEntrypoint(format!("no plugin can load '{source}'"))
            })?;
            let document = plugin
                .exec(&source)
                .await
                .map_err(|e| AppError::InvalidEntrypoint(e.to_string()))?;
            let origin = plugin.is_locator().then_some(source);
            (document, origin)
        }
    };

    if !document.is_object() {
        return Err(AppError::InvalidEntrypoint(
            "the entrypoint is not a document object".to_string(),
        ));
    }
    Ok((document, origin))
}

/// A subtree still to be walked, with the origin its relative references resolve against.
#[derive(Debug)]
struct Visit {
    path: Path,
    origin: Option<String>,
    /// Nesting level of `path` as counted for `BundleOptions::depth`.
    level: usize,
}

/// An external reference site found by the walk.
#[derive(Debug)]
struct PendingRef {
    path: Path,
    reference: String,
    source: String,
    fragment: String,
    global: bool,
    level: usize,
}

/// Walk stack entry. Objects are exited after their children.
enum Step {
    Enter(Path),
    Exit(Path),
}

/// State of one bundle invocation. Nothing here outlives the call.
struct BundleRun<'a> {
    options: &'a BundleOptions,
    document: Value,
    /// Loaded sources, keyed by normalized source identifier.
    cache: HashMap<String, Result<Value, SourceError>>,
    names: UniqueValueMap,
    /// Source identifier -> key under `x-ext`.
    hoisted: HashMap<String, String>,
    queue: VecDeque<Visit>,
    /// Root document paths already scheduled for walking.
    walked: Vec<Path>,
    /// Base for relative references of the root document.
    origin: Option<String>,
    /// Normalized identifier of the root document's own source.
    root_source: Option<String>,
    errors: Vec<ReferenceError>,
}

impl<'a> BundleRun<'a> {
    fn new(document: Value, options: &'a BundleOptions, origin: Option<String>) -> Self {
        let root_source = origin
            .as_deref()
            .map(|origin| resolve_reference_path("", origin));
        let mut run = Self {
            options,
            document,
            cache: HashMap::new(),
            names: UniqueValueMap::new(),
            hoisted: HashMap::new(),
            queue: VecDeque::new(),
            walked: Vec::new(),
            origin,
            root_source,
            errors: Vec::new(),
        };
        run.seed_from_url_map();
        run
    }

    /// Queues a root document path unless it lies in an area already scheduled.
    fn schedule_root(&mut self, path: Path) {
        if self.walked.iter().any(|done| path.starts_with(done)) {
            return;
        }
        if get_by_path(&self.document, &path).is_none() {
            return;
        }
        self.walked.push(path.clone());
        self.queue.push_back(Visit {
            level: path.len(),
            path,
            origin: self.origin.clone(),
        });
    }

    /// Reuses keys recorded by a previous run so sources are never hoisted twice.
    fn seed_from_url_map(&mut self) {
        let Some(urls) = self.document.get(EXTERNAL_URLS_KEY).and_then(Value::as_object) else {
            return;
        };
        let present: Vec<(String, String)> = urls
            .iter()
            .filter_map(|(key, source)| Some((source.as_str()?.to_string(), key.clone())))
            .filter(|(_, key)| {
                get_by_path(&self.document, &[EXTERNAL_KEY, key.as_str()]).is_some()
            })
            .collect();

        self.names = present.iter().cloned().collect();
        for (source, key) in present {
            if self.names.get(&source) == Some(key.as_str()) {
                self.hoisted.insert(source, key);
            }
        }
    }

    async fn resolve_all(&mut self) -> AppResult<()> {
        loop {
            let pending = self.walk();
            if pending.is_empty() {
                return Ok(());
            }

            if let Some(hooks) = &self.options.hooks {
                for site in &pending {
                    hooks.on_resolve_start(&to_pointer(&site.path), &site.reference);
                }
            }

            self.fetch_missing(&pending).await;
            for site in pending {
                self.hoist(site)?;
            }
        }
    }

    /// Drains the visit queue and returns every external reference site found.
    ///
    /// Siblings of a `$ref` are walked too. Local references lead the walk to
    /// their targets in the root document, which matters for partial bundles.
    /// The reserved root areas are skipped.
    fn walk(&mut self) -> Vec<PendingRef> {
        let mut pending = Vec::new();

        while let Some(visit) = self.queue.pop_front() {
            let base = visit.origin.clone().unwrap_or_default();
            let mut local_targets = Vec::new();
            let mut stack = vec![Step::Enter(visit.path.clone())];

            while let Some(step) = stack.pop() {
                let path = match step {
                    Step::Enter(path) => path,
                    Step::Exit(path) => {
                        self.run_node_hook(&path, false);
                        continue;
                    }
                };
                let level = visit.level + path.len() - visit.path.len();
                if self.options.depth.is_some_and(|depth| level > depth) {
                    continue;
                }
                self.run_node_hook(&path, true);

                let Some(node) = get_by_path(&self.document, &path) else {
                    continue;
                };
                match node {
                    Value::Object(map) => {
                        if let Some(reference) = map.get(REF_KEY).and_then(Value::as_str) {
                            let (source, fragment) = split_reference(reference);
                            if is_local_ref(reference) {
                                local_targets.push(parse_pointer(reference));
                            } else if !source.is_empty() {
                                pending.push(PendingRef {
                                    reference: reference.to_string(),
                                    source: resolve_reference_path(&base, source),
                                    fragment: fragment.to_string(),
                                    global: map
                                        .get(GLOBAL_KEY)
                                        .and_then(Value::as_bool)
                                        .unwrap_or(false),
                                    level,
                                    path: path.clone(),
                                });
                            }
                        }
                        stack.push(Step::Exit(path.clone()));
                        for key in map.keys().rev() {
                            if key == REF_KEY {
                                continue;
                            }
                            if path.is_empty() && (key == EXTERNAL_KEY || key == EXTERNAL_URLS_KEY) {
                                continue;
                            }
                            let mut child = path.clone();
                            child.push(key.clone());
                            stack.push(Step::Enter(child));
                        }
                    }
                    Value::Array(items) => {
                        for idx in (0..items.len()).rev() {
                            let mut child = path.clone();
                            child.push(idx.to_string());
                            stack.push(Step::Enter(child));
                        }
                    }
                    _ => {}
                }
            }

            for target in local_targets {
                let reserved = target
                    .first()
                    .is_some_and(|key| key == EXTERNAL_KEY || key == EXTERNAL_URLS_KEY);
                if !reserved {
                    self.schedule_root(target);
                }
            }
        }

        pending
    }

    fn run_node_hook(&mut self, path: &[String], before: bool) {
        let options = self.options;
        let Some(hooks) = &options.hooks else {
            return;
        };
        if let Some(Value::Object(node)) = get_by_path_mut(&mut self.document, path) {
            let location = to_pointer(path);
            if before {
                hooks.on_before_node_process(node, &location);
            } else {
                hooks.on_after_node_process(node, &location);
            }
        }
    }

    /// Loads every source the sites need that is neither hoisted nor cached yet.
    ///
    /// Each source is requested once, all of them concurrently.
    async fn fetch_missing(&mut self, pending: &[PendingRef]) {
        let mut seen = HashSet::new();
        let sources: Vec<&str> = pending
            .iter()
            .map(|site| site.source.as_str())
            .filter(|source| self.root_source.as_deref() != Some(*source))
            .filter(|source| !self.hoisted.contains_key(*source))
            .filter(|source| !self.cache.contains_key(*source))
            .filter(|source| seen.insert(*source))
            .collect();

        if sources.is_empty() {
            return;
        }
        debug!(count = sources.len(), "loading external sources");

        let plugins = &self.options.plugins;
        let loaded = join_all(sources.into_iter().map(|source| async move {
            (source.to_string(), resolve_with_plugins(source, plugins).await)
        }))
        .await;

        self.cache.extend(loaded);
    }

    /// Hoists the source of `site` if needed and rewrites its reference.
    fn hoist(&mut self, site: PendingRef) -> AppResult<()> {
        let location = to_pointer(&site.path);
        let fragment = match site.fragment.as_str() {
            "" => String::from("#"),
            f if f.starts_with('/') => format!("#{f}"),
            f => format!("#/{f}"),
        };

        if self.root_source.as_deref() == Some(site.source.as_str()) {
            debug!(source = %site.source, "reference to the root document");
            self.rewrite(&site, &location, fragment);
            return Ok(());
        }

        let key = match self.hoisted.get(&site.source) {
            Some(key) => {
                debug!(source = %site.source, key = %key, "source already hoisted");
                key.clone()
            }
            None => {
                let content = match self.cache.get(&site.source) {
                    Some(Ok(content)) => content.clone(),
                    Some(Err(error)) => {
                        let error = error.clone();
                        self.record_error(location, site.reference, error);
                        return Ok(());
                    }
                    None => {
                        let error = SourceError::Unsupported(site.source.clone());
                        self.record_error(location, site.reference, error);
                        return Ok(());
                    }
                };
                let options = self.options;
                let key = generate_unique_value(
                    |value| options.hasher.hash(value),
                    &site.source,
                    &mut self.names,
                )?;
                self.insert_hoisted(&site, &key, content)?;
                key
            }
        };

        let target = prefix_internal_ref(&fragment, &[EXTERNAL_KEY, key.as_str()]);
        self.rewrite(&site, &location, target);
        Ok(())
    }

    fn rewrite(&mut self, site: &PendingRef, location: &str, target: String) {
        if let Some(Value::Object(node)) = get_by_path_mut(&mut self.document, &site.path) {
            node.insert(REF_KEY.to_string(), Value::String(target));
        }
        if let Some(hooks) = &self.options.hooks {
            hooks.on_resolve_success(location, &site.reference);
        }
    }

    fn insert_hoisted(
        &mut self,
        site: &PendingRef,
        key: &str,
        mut content: Value,
    ) -> AppResult<()> {
        let path = [EXTERNAL_KEY, key];
        if !site.global {
            prefix_internal_refs_recursive(&mut content, &path);
        }

        if !set_value_at_path(&mut self.document, &path, content) {
            return Err(AppError::InvalidEntrypoint(format!(
                "'{EXTERNAL_KEY}' exists but is not an object"
            )));
        }
        debug!(source = %site.source, key, global = site.global, "hoisted external source");

        self.hoisted.insert(site.source.clone(), key.to_string());
        self.queue.push_back(Visit {
            path: path.iter().map(|s| s.to_string()).collect(),
            origin: Some(site.source.clone()),
            level: site.level,
        });
        Ok(())
    }

    fn record_error(&mut self, location: String, reference: String, error: SourceError) {
        warn!(%location, %reference, %error, "failed to resolve reference");
        let error = ReferenceError {
            location,
            reference,
            error,
        };
        if let Some(hooks) = &self.options.hooks {
            hooks.on_resolve_error(&error);
        }
        self.errors.push(error);
    }

    fn finish(mut self) -> BundleOutput {
        if self.options.tree_shake {
            tree_shake(&mut self.document);
        }

        let partial = self.options.subtree.is_some() || self.options.depth.is_some();
        if self.options.url_map || partial {
            self.write_url_map();
        }

        BundleOutput {
            document: self.document,
            errors: self.errors,
        }
    }

    fn write_url_map(&mut self) {
        let mut urls = Map::new();
        for (source, key) in self.names.iter() {
            if get_by_path(&self.document, &[EXTERNAL_KEY, key]).is_some() {
                urls.insert(key.to_string(), Value::String(source.to_string()));
            }
        }
        if urls.is_empty() {
            return;
        }
        if let Some(root) = self.document.as_object_mut() {
            root.insert(EXTERNAL_URLS_KEY.to_string(), Value::Object(urls));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{FetchOptions, FetchResponse, FetchTransport, FetchUrls, Limiter};
    use crate::plugins::plugins_with_fetch;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    /// Serves fixed bodies and records every requested URL.
    #[derive(Default)]
    struct StaticTransport {
        bodies: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticTransport {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl FetchTransport for StaticTransport {
        async fn fetch(
            &self,
            url: &str,
            _headers: &IndexMap<String, String>,
        ) -> Result<FetchResponse, String> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(match self.bodies.get(url) {
                Some(body) => FetchResponse {
                    status: 200,
                    content_type: None,
                    body: body.clone(),
                },
                None => FetchResponse {
                    status: 404,
                    content_type: None,
                    body: String::new(),
                },
            })
        }
    }

    fn options_for(transport: Arc<StaticTransport>) -> BundleOptions {
        let fetch = FetchUrls::new(
            Limiter::default(),
            FetchOptions::default().with_transport(transport),
        );
        BundleOptions::default()
            .with_plugins(plugins_with_fetch(fetch))
            .with_hasher(|value: &str| match value {
                "http://h/a.json" => "a".to_string(),
                "http://h/b.json" => "b".to_string(),
                other => format!("{other}!"),
            })
    }

    #[tokio::test]
    async fn test_hoists_and_rewrites() {
        let transport = Arc::new(
            StaticTransport::default().with("http://h/a.json", r#"{"Foo":{"type":"string"}}"#),
        );
        let doc = json!({ "schema": { "$ref": "http://h/a.json#/Foo" } });

        let out = bundle(doc, &options_for(transport)).await.unwrap();

        assert_eq!(
            out.document,
            json!({
                "schema": { "$ref": "#/x-ext/a/Foo" },
                "x-ext": { "a": { "Foo": { "type": "string" } } }
            })
        );
        assert!(out.errors.is_empty());
    }

    #[tokio::test]
    async fn test_whole_document_reference_without_fragment() {
        let transport =
            Arc::new(StaticTransport::default().with("http://h/b.json", r#"{"type":"integer"}"#));
        let doc = json!({ "n": { "$ref": "http://h/b.json" } });

        let out = bundle(doc, &options_for(transport)).await.unwrap();

        assert_eq!(out.document["n"], json!({ "$ref": "#/x-ext/b" }));
        assert_eq!(out.document["x-ext"]["b"], json!({ "type": "integer" }));
    }

    #[tokio::test]
    async fn test_missing_source_is_recorded_and_left_untouched() {
        let transport = Arc::new(StaticTransport::default());
        let doc = json!({ "a": { "$ref": "http://h/missing.json#/X" }, "keep": 1 });

        let out = bundle(doc.clone(), &options_for(transport)).await.unwrap();

        assert_eq!(out.document, doc);
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].location, "#/a");
        assert_eq!(
            out.errors[0].error,
            SourceError::Status {
                url: "http://h/missing.json".to_string(),
                status: 404
            }
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failures_are_logged() {
        let transport = Arc::new(StaticTransport::default());
        let doc = json!({ "a": { "$ref": "http://h/missing.json" } });

        bundle(doc, &options_for(transport)).await.unwrap();

        assert!(logs_contain("failed to resolve reference"));
        assert!(logs_contain("http://h/missing.json"));
    }

    #[tokio::test]
    async fn test_non_object_entrypoint_is_fatal() {
        let err = bundle(json!([1, 2]), &BundleOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidEntrypoint(_)));
    }

    #[tokio::test]
    async fn test_missing_subtree_is_fatal() {
        let options = BundleOptions::default().with_subtree(["paths", "/nope"]);
        let err = bundle(json!({ "paths": {} }), &options).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidEntrypoint(_)));
    }

    #[tokio::test]
    async fn test_inline_text_entrypoint() {
        let out = bundle(
            "openapi: 3.1.0\ninfo:\n  title: Demo\n",
            &BundleOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(
            out.document,
            json!({ "openapi": "3.1.0", "info": { "title": "Demo" } })
        );
    }
}
