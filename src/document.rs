//! Path-indexed view of a decoded document.
//!
//! Every object in the input becomes an internal node with one child per
//! key; every other value (arrays included) becomes a leaf holding the value
//! verbatim. Paths are dot-prefixed and joined in traversal order:
//!
//! ```text
//! {"data": {"id": 1, "name": "Vincent"}}
//!
//! .              (root)
//! .data
//! .data.id       -> 1
//! .data.name     -> "Vincent"
//! ```
//!
//! The path index is filled while the tree is built, so a [`Document`] is
//! immutable afterwards and can be shared between threads freely.

use std::collections::HashMap;

use crate::Value;

/// Index of a node in the document arena.
pub type NodeId = usize;

/// Path of the root node
pub const ROOT_PATH: &str = ".";

#[derive(Debug, Clone)]
enum Content {
    Leaf(Value),
    Fields(Vec<NodeId>),
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    path: String,
    content: Content,
}

/// Tree built from a decoded object, with every path precomputed.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Entry>,
    paths: HashMap<String, NodeId>,
}

impl Document {
    /// Build the tree for a decoded value.
    ///
    /// Returns `None` unless the top-level value is an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldq::{Document, Value};
    ///
    /// assert!(Document::build(&Value::Array(vec![])).is_none());
    /// ```
    pub fn build(value: &Value) -> Option<Self> {
        let map = value.as_object()?;

        let mut doc = Document {
            nodes: Vec::new(),
            paths: HashMap::new(),
        };
        let root = doc.push(String::new(), ROOT_PATH.to_string());
        let fields = doc.insert_fields(ROOT_PATH, map);
        doc.nodes[root].content = Content::Fields(fields);

        Some(doc)
    }

    fn push(&mut self, name: String, path: String) -> NodeId {
        let id = self.nodes.len();
        // First node to claim a path keeps it
        self.paths.entry(path.clone()).or_insert(id);
        self.nodes.push(Entry {
            name,
            path,
            content: Content::Fields(Vec::new()),
        });
        id
    }

    fn insert_fields(&mut self, parent_path: &str, map: &HashMap<String, Value>) -> Vec<NodeId> {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let mut ids = Vec::with_capacity(keys.len());
        for key in keys {
            let path = child_path(parent_path, key);
            let id = self.push(key.clone(), path.clone());

            let content = match &map[key] {
                Value::Object(child) => Content::Fields(self.insert_fields(&path, child)),
                other => Content::Leaf(other.clone()),
            };
            self.nodes[id].content = content;
            ids.push(id);
        }
        ids
    }

    /// True iff `path` is exactly the path of some node.
    pub fn has_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Value at `path`: the leaf value, or the rebuilt object for an internal node.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.find_subtree(path).map(|subtree| subtree.value())
    }

    /// The node at `path`.
    pub fn find_subtree(&self, path: &str) -> Option<Subtree<'_>> {
        self.paths
            .get(path)
            .map(|&id| Subtree { doc: self, id })
    }

    pub fn root(&self) -> Subtree<'_> {
        Subtree { doc: self, id: 0 }
    }

    /// Every path in the document, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root object has no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!(".{}", name)
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Borrowed handle on one node of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Subtree<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Subtree<'a> {
    fn entry(&self) -> &'a Entry {
        &self.doc.nodes[self.id]
    }

    /// Key of the incoming edge; empty for the root.
    pub fn name(&self) -> &'a str {
        &self.entry().name
    }

    pub fn path(&self) -> &'a str {
        &self.entry().path
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.entry().content, Content::Leaf(_))
    }

    /// Path segments after the leading dot.
    ///
    /// `.data.id` yields `data`, `id`; the root yields a single empty segment.
    pub fn segments(self) -> impl Iterator<Item = &'a str> {
        self.path().split('.').skip(1)
    }

    pub fn children(self) -> impl Iterator<Item = Subtree<'a>> {
        let doc = self.doc;
        let ids: &'a [NodeId] = match &self.entry().content {
            Content::Fields(ids) => ids,
            Content::Leaf(_) => &[],
        };
        ids.iter().map(move |&id| Subtree { doc, id })
    }

    /// Rebuild the value this node was made from.
    pub fn value(&self) -> Value {
        match &self.entry().content {
            Content::Leaf(value) => value.clone(),
            Content::Fields(_) => Value::Object(
                self.children()
                    .map(|child| (child.name().to_string(), child.value()))
                    .collect(),
            ),
        }
    }
}
