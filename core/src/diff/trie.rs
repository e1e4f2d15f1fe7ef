//! Prefix tree keyed by path segments.

use indexmap::IndexMap;

/// Stores one value per path and answers "everything at or around this path" queries.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    root: TrieNode<T>,
    len: usize,
}

#[derive(Debug, Clone)]
struct TrieNode<T> {
    value: Option<T>,
    children: IndexMap<String, TrieNode<T>>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        Self {
            value: None,
            children: IndexMap::new(),
        }
    }

    fn visit<F: FnMut(&T)>(&self, callback: &mut F) {
        if let Some(value) = &self.value {
            callback(value);
        }
        for child in self.children.values() {
            child.visit(callback);
        }
    }
}

impl<T> Trie<T> {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` at `path`, replacing any value already there.
    pub fn add_path<S: AsRef<str>>(&mut self, path: &[S], value: T) {
        let mut node = &mut self.root;
        for segment in path {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_insert_with(TrieNode::new);
        }
        if node.value.replace(value).is_none() {
            self.len += 1;
        }
    }

    /// Calls `callback` for every value stored on the way to `path` and below it.
    ///
    /// Values at strict ancestors of `path` come first, walking down. When `path`
    /// itself is not in the trie nothing below it is visited. Otherwise the
    /// subtree rooted at `path` is visited depth first, starting with `path`.
    pub fn find_match<S, F>(&self, path: &[S], mut callback: F)
    where
        S: AsRef<str>,
        F: FnMut(&T),
    {
        let mut node = &self.root;
        for segment in path {
            if let Some(value) = &node.value {
                callback(value);
            }
            match node.children.get(segment.as_ref()) {
                Some(child) => node = child,
                None => return,
            }
        }
        node.visit(&mut callback);
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(trie: &Trie<&'static str>, path: &[&str]) -> Vec<&'static str> {
        let mut found = Vec::new();
        trie.find_match(path, |value| found.push(*value));
        found
    }

    fn sample() -> Trie<&'static str> {
        let mut trie = Trie::new();
        trie.add_path(&["paths"], "paths");
        trie.add_path(&["paths", "/users", "get"], "get");
        trie.add_path(&["paths", "/users", "post"], "post");
        trie.add_path(&["info", "title"], "title");
        trie
    }

    #[test]
    fn test_empty_prefix_yields_everything_once() {
        let trie = sample();
        let mut all = collect(&trie, &[]);
        all.sort();
        assert_eq!(all, vec!["get", "paths", "post", "title"]);
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_ancestors_then_subtree() {
        let trie = sample();
        assert_eq!(collect(&trie, &["paths", "/users"]), vec!["paths", "get", "post"]);
        assert_eq!(collect(&trie, &["paths", "/users", "get"]), vec!["paths", "get"]);
    }

    #[test]
    fn test_missing_branch_stops_the_walk() {
        let trie = sample();
        assert_eq!(collect(&trie, &["paths", "/pets", "get"]), vec!["paths"]);
        assert!(collect(&trie, &["components"]).is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut trie = Trie::new();
        trie.add_path(&["a"], 1);
        trie.add_path(&["a"], 2);

        let mut found = Vec::new();
        trie.find_match(&["a"], |value| found.push(*value));
        assert_eq!(found, vec![2]);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_root_value() {
        let mut trie = Trie::new();
        trie.add_path::<&str>(&[], "root");
        trie.add_path(&["a"], "a");
        assert_eq!(collect(&trie, &["a"]), vec!["root", "a"]);
    }
}
