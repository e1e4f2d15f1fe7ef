#![deny(missing_docs)]

//! # Refbundle Core
//!
//! Core library for bundling OpenAPI / JSON documents with external references
//! and for computing, merging and applying structural differences between them.

/// Shared error types.
pub mod error;

/// JSON pointer helpers.
pub mod pointer;

/// Source loading plugins.
pub mod plugins;

/// Collision-free key generation.
pub mod value_generator;

/// Reference bundling.
pub mod bundle;

/// Diff calculation.
pub mod diff;

pub use bundle::{
    bundle, BundleHooks, BundleOptions, BundleOutput, Entrypoint, ReferenceError, EXTERNAL_KEY,
    EXTERNAL_URLS_KEY, GLOBAL_KEY,
};
pub use diff::{apply, diff, merge, Conflict, DiffType, Difference, MergeResult, Trie};
pub use error::{AppError, AppResult};
pub use plugins::{
    default_plugins, resolve_with_plugins, FetchOptions, FetchTransport, FetchUrls, HeaderRule,
    Limiter, LoaderPlugin, SourceError,
};
pub use pointer::{
    create_path_from_segments, get_by_path, get_resolved_ref, parse_pointer, set_value_at_path,
    Path,
};
pub use value_generator::{
    generate_unique_value, UniqueValueMap, ValueHasher, Xxh64Hasher, MAX_COLLISION_DEPTH,
};
