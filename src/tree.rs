//! Generic result tree shared by request parameters and decoded responses.
//!
//! The store APIs answer with XML for some endpoints and JSON for others, and
//! requests are built from nested key/value parameters. [`Tree`] is the one
//! value type all of them are expressed in.
//!
//! # Single vs. many
//!
//! A decoded element that appears once under its parent is a bare
//! [`Tree::Map`] or [`Tree::Leaf`]; only repeated siblings become a
//! [`Tree::List`]. The tree never guesses which one the caller expected, so
//! call sites that want a sequence normalize with [`Tree::into_list`] or
//! [`Tree::to_list`].
//!
//! # Example
//!
//! ```rust
//! use yahoo_shopping_api::Tree;
//!
//! let mut params = Tree::from_pairs([("seller_id", "snbx-store"), ("item_code", "t-shirt")]);
//! params.entry_map("Search").insert("Result", 10);
//!
//! assert_eq!(params.get("seller_id").and_then(Tree::as_str), Some("snbx-store"));
//! assert_eq!(params.pointer(&["Search", "Result"]).and_then(Tree::as_u64), Some(10));
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A recursive leaf / list / map value.
///
/// Map equality ignores key order; iteration follows insertion order, which is
/// the order children are written when the tree is encoded as XML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
    /// A scalar, always carried as text.
    Leaf(String),
    /// Ordered repeated values.
    List(Vec<Tree>),
    /// Named children.
    Map(IndexMap<String, Tree>),
}

impl Default for Tree {
    fn default() -> Self {
        Self::Map(IndexMap::new())
    }
}

impl Tree {
    /// Creates a leaf holding `value`.
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Creates an empty map.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::default()
    }

    /// Creates a map from key/value pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the child stored under `key` when this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            Self::Map(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Follows a path of map keys.
    ///
    /// ```rust
    /// use yahoo_shopping_api::Tree;
    ///
    /// let tree = Tree::from_pairs([("Result", Tree::from_pairs([("Status", "OK")]))]);
    /// assert_eq!(tree.pointer(&["Result", "Status"]).and_then(Tree::as_str), Some("OK"));
    /// assert!(tree.pointer(&["Result", "Missing"]).is_none());
    /// ```
    #[must_use]
    pub fn pointer(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Returns `true` if this is a map containing `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// A non-map tree is replaced by an empty map first, the same way nested
    /// parameters are created on first assignment.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Self>) -> Option<Self> {
        self.ensure_map().insert(key.into(), value.into())
    }

    /// Inserts `value` under `key` unless the key is already present.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<Self>) -> &mut Self {
        self.ensure_map()
            .entry(key.into())
            .or_insert_with(|| value.into())
    }

    /// Returns the map under `key`, creating it (or replacing a non-map value)
    /// when needed.
    pub fn entry_map(&mut self, key: impl Into<String>) -> &mut Self {
        let child = self.ensure_map().entry(key.into()).or_default();
        child.ensure_map();
        child
    }

    /// Removes `key` from a map, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Self> {
        match self {
            Self::Map(map) => map.shift_remove(key),
            _ => None,
        }
    }

    /// Returns the text of a leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Parses a leaf as an unsigned integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_str().and_then(|value| value.trim().parse().ok())
    }

    /// Returns the underlying map, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` for an empty leaf, list, or map.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(value) => value.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }

    /// Returns `true` for values the API treats as "nothing came back":
    /// empty containers, an empty string, or `"0"`.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Leaf(value) => value.is_empty() || value == "0",
            _ => self.is_empty(),
        }
    }

    /// Normalizes the single-vs-many ambiguity: a list yields its items, any
    /// other value yields itself as the only item.
    #[must_use]
    pub fn into_list(self) -> Vec<Self> {
        match self {
            Self::List(items) => items,
            other => vec![other],
        }
    }

    /// Borrowing variant of [`into_list`](Self::into_list).
    #[must_use]
    pub fn to_list(&self) -> Vec<&Self> {
        match self {
            Self::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    fn ensure_map(&mut self) -> &mut IndexMap<String, Self> {
        match self {
            Self::Map(map) => map,
            other => {
                *other = Self::empty_map();
                other.ensure_map()
            }
        }
    }
}

/// Leaves are written as JSON strings, including ones built from integers or
/// booleans: `Tree::from(5)` serializes as `"5"` and `Tree::from(true)` as
/// `"true"`. Lists become arrays and maps become objects in insertion order.
impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Leaf(value) => serializer.serialize_str(value),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Leaf(String::new()),
            Value::Bool(flag) => flag.into(),
            Value::Number(number) => Self::Leaf(number.to_string()),
            Value::String(text) => Self::Leaf(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<&String> for Tree {
    fn from(value: &String) -> Self {
        Self::Leaf(value.clone())
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::Leaf(if value { "true" } else { "false" }.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Tree {
                fn from(value: $ty) -> Self {
                    Self::Leaf(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u8, u16, u32, u64, usize);

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Self::List(items)
    }
}

impl From<IndexMap<String, Tree>> for Tree {
    fn from(map: IndexMap<String, Tree>) -> Self {
        Self::Map(map)
    }
}
