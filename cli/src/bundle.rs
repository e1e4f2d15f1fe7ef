#![deny(missing_docs)]

//! # Bundle Command
//!
//! Bundles a local or remote OpenAPI document with all its external references
//! into a single file.

use crate::error::{CliError, CliResult};
use crate::output;
use refbundle_core::plugins::{plugins_with_fetch, DEFAULT_CONCURRENCY};
use refbundle_core::{bundle, BundleOptions, FetchOptions, FetchUrls, HeaderRule, Limiter};
use std::path::PathBuf;

/// One `--header DOMAIN=NAME:VALUE` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderArg {
    /// Host the header is sent to.
    pub domain: String,
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Arguments for the bundle command.
#[derive(clap::Args, Debug, Clone)]
pub struct BundleArgs {
    /// URL or file path of the entry document.
    pub input: String,

    /// Remove hoisted content that nothing references.
    #[clap(long)]
    pub tree_shake: bool,

    /// Emit the `x-ext-urls` map of hoisted keys to their sources.
    #[clap(long)]
    pub url_map: bool,

    /// Header to send to one domain, as `DOMAIN=NAME:VALUE`. Repeatable.
    #[clap(long = "header", value_parser = parse_header)]
    pub headers: Vec<HeaderArg>,

    /// Leave references nested deeper than this many levels untouched.
    #[clap(long)]
    pub depth: Option<usize>,

    /// Maximum number of concurrent fetches.
    #[clap(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Output path. Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Parses `DOMAIN=NAME:VALUE`.
pub fn parse_header(raw: &str) -> Result<HeaderArg, String> {
    let (domain, header) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DOMAIN=NAME:VALUE, got '{raw}'"))?;
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE after '=', got '{header}'"))?;

    if domain.trim().is_empty() || name.trim().is_empty() {
        return Err(format!("domain and header name must not be empty in '{raw}'"));
    }

    Ok(HeaderArg {
        domain: domain.trim().to_string(),
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

/// Groups header flags into one rule per domain, keeping first-seen order.
pub fn header_rules(headers: &[HeaderArg]) -> Vec<HeaderRule> {
    let mut rules: Vec<HeaderRule> = Vec::new();
    for arg in headers {
        let existing = rules
            .iter_mut()
            .find(|rule| rule.domains.iter().any(|d| d.eq_ignore_ascii_case(&arg.domain)));
        match existing {
            Some(rule) => {
                rule.headers.insert(arg.name.clone(), arg.value.clone());
            }
            None => rules.push(HeaderRule::new([arg.domain.clone()]).header(&arg.name, &arg.value)),
        }
    }
    rules
}

/// Executes the bundle command.
///
/// Unresolved references are reported on stderr; only fatal errors fail the command.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub async fn execute(args: &BundleArgs) -> CliResult<()> {
    if args.concurrency == 0 {
        return Err(CliError::General(
            "--concurrency must be at least 1".to_string(),
        ));
    }

    let fetch_options = header_rules(&args.headers)
        .into_iter()
        .fold(FetchOptions::default(), FetchOptions::with_header_rule);
    let fetch = FetchUrls::new(Limiter::new(args.concurrency), fetch_options);

    let mut options = BundleOptions::default()
        .with_plugins(plugins_with_fetch(fetch))
        .with_tree_shake(args.tree_shake)
        .with_url_map(args.url_map);
    if let Some(depth) = args.depth {
        options = options.with_depth(depth);
    }

    let result = bundle(args.input.as_str(), &options).await?;

    for error in &result.errors {
        eprintln!("warning: {error}");
    }

    output::write_document(&result.document, args.output.as_deref())
}
