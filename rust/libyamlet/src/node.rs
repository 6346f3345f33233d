//! Document tree representation.

use indexmap::IndexMap;

/// Shared sentinel returned by failed lookups.
///
/// Callers receive a reference to this node when indexing a position or key
/// that does not exist; it reads as an absent value and is never mutated.
static NONE_NODE: Node = Node::None;

/// Variant tag of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Absence of a value.
    None,
    /// Text value.
    Scalar,
    /// Ordered list of child nodes.
    Sequence,
    /// Insertion-ordered mapping from string keys to child nodes.
    Map,
}

/// A node in a parsed document.
///
/// Every node has exactly one kind. Mutating operations that require a
/// different kind reset the node to that kind, discarding prior contents;
/// coercion to the kind a node already has leaves its contents alone.
///
/// Lookups are total: a missing position or key reads as a [`Node::None`]
/// sentinel, which permits fluent navigation of partial documents:
///
/// ```
/// use libyamlet::parse;
///
/// let doc = parse("server:\n  port: 80\n").unwrap();
/// assert_eq!(doc["server"]["port"].as_str(), "80");
/// assert_eq!(doc["server"]["missing"].as_str(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// Absence of a value.
    #[default]
    None,
    /// Text value with escape sequences resolved and block folding applied.
    Scalar(String),
    /// Ordered list of child nodes.
    Sequence(Vec<Node>),
    /// Insertion-ordered mapping from string keys to child nodes.
    Map(IndexMap<String, Node>),
}

impl Node {
    /// Current variant tag.
    pub fn kind(&self) -> Kind {
        match self {
            Node::None => Kind::None,
            Node::Scalar(_) => Kind::Scalar,
            Node::Sequence(_) => Kind::Sequence,
            Node::Map(_) => Kind::Map,
        }
    }

    /// Returns `true` if this node is the absence of a value.
    pub fn is_none(&self) -> bool {
        matches!(self, Node::None)
    }

    /// Returns `true` if this node is a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    /// Returns `true` if this node is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    /// Returns `true` if this node is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// Number of children: entry count for maps, child count for sequences,
    /// 0 for scalars and none.
    pub fn size(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Scalar text, or the empty string for non-scalars.
    pub fn as_str(&self) -> &str {
        match self {
            Node::Scalar(s) => s,
            _ => "",
        }
    }

    /// Scalar text parsed as a boolean (`true` / `false`).
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Scalar text parsed as a signed integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_str().parse().ok()
    }

    /// Scalar text parsed as a float.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().parse().ok()
    }

    /// Reset to [`Node::None`], discarding contents.
    pub fn clear(&mut self) {
        *self = Node::None;
    }

    /// Become a scalar with the given text.
    pub fn set_scalar(&mut self, text: impl Into<String>) {
        *self = Node::Scalar(text.into());
    }

    /// Child at `index`, or the shared none sentinel when this node is not
    /// a sequence or the index is out of bounds.
    pub fn get(&self, index: usize) -> &Node {
        match self {
            Node::Sequence(items) => items.get(index).unwrap_or(&NONE_NODE),
            _ => &NONE_NODE,
        }
    }

    /// Mutable child at `index`, when this node is a sequence and the index
    /// is in bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        match self {
            Node::Sequence(items) => items.get_mut(index),
            _ => None,
        }
    }

    /// Child under `key`, or the shared none sentinel when this node is not
    /// a map or the key is absent.
    pub fn get_key(&self, key: &str) -> &Node {
        match self {
            Node::Map(entries) => entries.get(key).unwrap_or(&NONE_NODE),
            _ => &NONE_NODE,
        }
    }

    /// Child under `key`, inserted as [`Node::None`] if absent.
    ///
    /// Coerces this node to a map. Re-using an existing key returns the
    /// existing child; insertion order of first use is preserved.
    pub fn key_mut(&mut self, key: &str) -> &mut Node {
        if !self.is_map() {
            *self = Node::Map(IndexMap::new());
        }
        let Node::Map(entries) = self else {
            unreachable!()
        };
        entries.entry(key.to_string()).or_default()
    }

    /// Insert a new empty child at `index`, clamped to the current size.
    ///
    /// Coerces this node to a sequence; positions stay dense.
    pub fn insert_at(&mut self, index: usize) -> &mut Node {
        if !self.is_sequence() {
            *self = Node::Sequence(Vec::new());
        }
        let Node::Sequence(items) = self else {
            unreachable!()
        };
        let at = index.min(items.len());
        items.insert(at, Node::None);
        &mut items[at]
    }

    /// Insert a new empty child at the front of the sequence.
    pub fn push_front(&mut self) -> &mut Node {
        self.insert_at(0)
    }

    /// Insert a new empty child at the back of the sequence.
    pub fn push_back(&mut self) -> &mut Node {
        self.insert_at(usize::MAX)
    }

    /// Remove the child at `index`; no-op for non-sequences and
    /// out-of-bounds positions.
    pub fn erase_at(&mut self, index: usize) {
        if let Node::Sequence(items) = self {
            if index < items.len() {
                items.remove(index);
            }
        }
    }

    /// Remove the entry under `key`; no-op for non-maps and missing keys.
    /// The order of the remaining entries is preserved.
    pub fn erase_key(&mut self, key: &str) {
        if let Node::Map(entries) = self {
            entries.shift_remove(key);
        }
    }

    /// Iterate over children as `(key, child)` pairs.
    ///
    /// Sequence children carry an empty key; scalars and none yield
    /// nothing.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: match self {
                Node::Sequence(items) => IterInner::Sequence(items.iter()),
                Node::Map(entries) => IterInner::Map(entries.iter()),
                _ => IterInner::Empty,
            },
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(s)
    }
}

impl std::ops::Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.get(index)
    }
}

impl std::ops::Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get_key(key)
    }
}

/// Iterator over the children of a node.
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

enum IterInner<'a> {
    Empty,
    Sequence(std::slice::Iter<'a, Node>),
    Map(indexmap::map::Iter<'a, String, Node>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Empty => None,
            IterInner::Sequence(items) => items.next().map(|node| ("", node)),
            IterInner::Map(entries) => entries.next().map(|(key, node)| (key.as_str(), node)),
        }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (&'a str, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
