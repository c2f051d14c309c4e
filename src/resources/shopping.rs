//! Public item search.
//!
//! Unlike the store APIs this one has no sandbox and no seller account; the
//! application id goes in the `appid` parameter.

use crate::clients::{ClientError, HttpClient, HttpMethod, HttpRequest, Paginator};
use crate::resources::{list_at, Endpoint};
use crate::tree::Tree;

/// Default page size of [`ItemSearch::request_all`].
pub const ITEM_SEARCH_PAGE_SIZE: u64 = 20;

/// Searches the public catalog.
///
/// # Example
///
/// ```rust,ignore
/// use yahoo_shopping_api::resources::ItemSearch;
/// use yahoo_shopping_api::Tree;
///
/// let hits = ItemSearch::request_all(&client, Tree::from_pairs([
///     ("appid", "my-app-id"),
///     ("seller_id", "store"),
/// ])).await?;
///
/// let codes = ItemSearch::item_codes(&hits);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ItemSearch;

impl ItemSearch {
    /// The item search URL.
    pub const ENDPOINT: Endpoint =
        Endpoint::production_only("https://shopping.yahooapis.jp/ShoppingWebService/V3/itemSearch");

    /// Returns one page of results as the full response tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let request = HttpRequest::builder(HttpMethod::Get, Self::ENDPOINT.production())
            .payload(params)
            .build()?;
        client.request(request).await
    }

    /// Returns every hit, requesting the pages one by one.
    ///
    /// `results` sets the page size (default [`ITEM_SEARCH_PAGE_SIZE`]);
    /// `start` is overwritten for each page.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the page size is not a positive number or
    /// any page fails.
    pub async fn request_all(client: &HttpClient, mut params: Tree) -> Result<Vec<Tree>, ClientError> {
        let page_size = params
            .insert_default("results", ITEM_SEARCH_PAGE_SIZE)
            .as_u64()
            .unwrap_or(0);

        let paginator = Paginator::new(page_size, Self::total_count, Self::hits)?;
        paginator
            .fetch_all(|start| {
                let mut page_params = params.clone();
                page_params.insert("start", start);
                async move { Self::request(client, page_params).await }
            })
            .await
    }

    /// Extracts the item codes from search hits.
    ///
    /// Hit codes have the form `<seller_id>_<item_code>`; neither part may
    /// contain `_` itself. Hits without a well-formed code are skipped.
    #[must_use]
    pub fn item_codes(hits: &[Tree]) -> Vec<String> {
        hits.iter()
            .filter_map(|hit| hit.get("code").and_then(Tree::as_str))
            .filter_map(|code| code.split_once('_'))
            .map(|(_, item_code)| item_code.to_string())
            .collect()
    }

    fn total_count(page: &Tree) -> u64 {
        page.get("totalResultsAvailable")
            .and_then(Tree::as_u64)
            .unwrap_or(0)
    }

    fn hits(page: &Tree) -> Vec<Tree> {
        list_at(page, &["hits"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_codes_strip_seller_prefix() {
        let hits = vec![
            Tree::from_pairs([("code", "store_t-shirt")]),
            Tree::from_pairs([("code", "store_cap")]),
            Tree::from_pairs([("name", "no code")]),
            Tree::from_pairs([("code", "malformed")]),
        ];

        assert_eq!(ItemSearch::item_codes(&hits), vec!["t-shirt", "cap"]);
    }

    #[test]
    fn test_page_helpers() {
        let page = Tree::from_pairs([
            ("totalResultsAvailable", Tree::leaf("45")),
            ("hits", Tree::from_pairs([("code", "store_a")])),
        ]);

        assert_eq!(ItemSearch::total_count(&page), 45);
        assert_eq!(ItemSearch::hits(&page).len(), 1);
    }
}
