//! `application/x-www-form-urlencoded` encoding of parameter trees.
//!
//! Nested maps are flattened into bracketed keys (`Search[Result]=10`) and
//! list items are indexed (`hits[0]=a`), the shape the store APIs accept both
//! in query strings and in form bodies.

use crate::tree::Tree;

/// Encodes `params` as a urlencoded string.
///
/// Keys and values are percent-encoded; a leaf at the root has no key and
/// produces an empty string.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::codec::form;
/// use yahoo_shopping_api::Tree;
///
/// let mut params = Tree::from_pairs([("seller_id", "store"), ("item_code", "t shirt")]);
/// params.entry_map("Search").insert("Result", 10);
///
/// assert_eq!(
///     form::encode(&params),
///     "seller_id=store&item_code=t%20shirt&Search%5BResult%5D=10"
/// );
/// ```
#[must_use]
pub fn encode(params: &Tree) -> String {
    pairs(params)
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Flattens `params` into unencoded `(key, value)` pairs with bracketed
/// keys, in insertion order.
#[must_use]
pub fn pairs(params: &Tree) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    match params {
        Tree::Map(map) => {
            for (key, value) in map {
                flatten(key.clone(), value, &mut pairs);
            }
        }
        Tree::List(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(index.to_string(), value, &mut pairs);
            }
        }
        Tree::Leaf(_) => {}
    }
    pairs
}

fn flatten(prefix: String, value: &Tree, pairs: &mut Vec<(String, String)>) {
    match value {
        Tree::Leaf(text) => pairs.push((prefix, text.clone())),
        Tree::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{prefix}[{index}]"), item, pairs);
            }
        }
        Tree::Map(map) => {
            for (key, item) in map {
                flatten(format!("{prefix}[{key}]"), item, pairs);
            }
        }
    }
}

/// Appends an encoded query to `url`, choosing `?` or `&` as separator.
///
/// An empty query leaves the URL unchanged.
#[must_use]
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
