//! Reference string helpers: classification, splitting, relative resolution and prefixing.

use crate::plugins::is_remote_url;
use crate::pointer::escape_segment;
use serde_json::Value;
use url::Url;

/// Whether `reference` points into the current document (`#...`).
pub fn is_local_ref(reference: &str) -> bool {
    reference.starts_with('#')
}

/// Splits `http://host/a.yaml#/Foo` into `("http://host/a.yaml", "/Foo")`.
///
/// The fragment is returned without its `#`. A reference without `#` has an empty fragment.
pub fn split_reference(reference: &str) -> (&str, &str) {
    match reference.split_once('#') {
        Some((source, fragment)) => (source, fragment),
        None => (reference, ""),
    }
}

/// Resolves `relative` against the source it was found in.
///
/// # Arguments
///
/// * `base` - Origin of the containing document: a URL, a file path, or empty.
/// * `relative` - The source part of a reference.
///
/// Remote references are returned normalized. Against a remote base the
/// reference is joined as a URL; against a file base it is joined to the base
/// directory and normalized lexically.
pub fn resolve_reference_path(base: &str, relative: &str) -> String {
    if is_remote_url(relative) {
        return Url::parse(relative)
            .map(String::from)
            .unwrap_or_else(|_| relative.to_string());
    }

    if is_remote_url(base) {
        return Url::parse(base)
            .and_then(|url| url.join(relative))
            .map(String::from)
            .unwrap_or_else(|_| relative.to_string());
    }

    if base.is_empty() || relative.starts_with('/') {
        return normalize_path(relative);
    }

    let directory = match base.rfind('/') {
        Some(idx) => &base[..=idx],
        None => "",
    };
    normalize_path(&format!("{directory}{relative}"))
}

/// Collapses `.` and `..` segments and duplicate separators without touching the filesystem.
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if !absolute => parts.push(".."),
                _ => {}
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Moves a local reference under `prefix`: `#/a` with `[x-ext, k]` becomes `#/x-ext/k/a`.
///
/// Non-local references are returned unchanged.
pub fn prefix_internal_ref<S: AsRef<str>>(reference: &str, prefix: &[S]) -> String {
    let Some(rest) = reference.strip_prefix('#') else {
        return reference.to_string();
    };

    let mut out = String::from("#");
    for segment in prefix {
        out.push('/');
        out.push_str(&escape_segment(segment.as_ref()));
    }
    if !rest.is_empty() && !rest.starts_with('/') {
        out.push('/');
    }
    out.push_str(rest);
    out
}

/// Applies [`prefix_internal_ref`] to every local `$ref` inside `value`.
pub fn prefix_internal_refs_recursive<S: AsRef<str>>(value: &mut Value, prefix: &[S]) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "$ref" {
                    if let Value::String(reference) = child {
                        if is_local_ref(reference) {
                            *reference = prefix_internal_ref(reference, prefix);
                        }
                    }
                } else {
                    prefix_internal_refs_recursive(child, prefix);
                }
            }
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|item| prefix_internal_refs_recursive(item, prefix)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_split_reference() {
        assert_eq!(
            split_reference("http://host/a.yaml#/Foo"),
            ("http://host/a.yaml", "/Foo")
        );
        assert_eq!(split_reference("./b.json"), ("./b.json", ""));
        assert_eq!(split_reference("#/components"), ("", "/components"));
    }

    #[test]
    fn test_resolve_against_urls() {
        assert_eq!(
            resolve_reference_path("https://example.com/specs/root.yaml", "./models/user.yaml"),
            "https://example.com/specs/models/user.yaml"
        );
        assert_eq!(
            resolve_reference_path("https://example.com/specs/root.yaml", "../shared.json"),
            "https://example.com/shared.json"
        );
        assert_eq!(
            resolve_reference_path("/tmp/root.yaml", "https://example.com/a.json"),
            "https://example.com/a.json"
        );
    }

    #[test]
    fn test_resolve_against_files() {
        assert_eq!(
            resolve_reference_path("specs/openapi.yaml", "./schemas/user.yaml"),
            "specs/schemas/user.yaml"
        );
        assert_eq!(
            resolve_reference_path("/srv/specs/openapi.yaml", "../common/error.json"),
            "/srv/common/error.json"
        );
        assert_eq!(resolve_reference_path("openapi.yaml", "user.yaml"), "user.yaml");
        assert_eq!(resolve_reference_path("", "./a/../b.yaml"), "b.yaml");
        assert_eq!(resolve_reference_path("a/b.yaml", "../../c.yaml"), "../c.yaml");
    }

    #[test]
    fn test_prefix_internal_ref() {
        assert_eq!(
            prefix_internal_ref("#/components/schemas/User", &["definitions"]),
            "#/definitions/components/schemas/User"
        );
        assert_eq!(prefix_internal_ref("#", &["x-ext", "abc"]), "#/x-ext/abc");
        assert_eq!(prefix_internal_ref("#Foo", &["x-ext", "abc"]), "#/x-ext/abc/Foo");
        assert_eq!(
            prefix_internal_ref("https://example.com/a.json", &["x-ext"]),
            "https://example.com/a.json"
        );
    }

    #[test]
    fn test_prefix_internal_refs_recursive_skips_external() {
        let mut doc = json!({
            "a": { "$ref": "#/b" },
            "list": [{ "$ref": "#/c" }, { "$ref": "other.yaml#/d" }]
        });
        prefix_internal_refs_recursive(&mut doc, &["x-ext", "k"]);
        assert_eq!(
            doc,
            json!({
                "a": { "$ref": "#/x-ext/k/b" },
                "list": [{ "$ref": "#/x-ext/k/c" }, { "$ref": "other.yaml#/d" }]
            })
        );
    }
}
