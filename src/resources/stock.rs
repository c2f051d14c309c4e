//! Stock lookup and update.

use crate::clients::{BodyEncoding, ClientError, HttpClient, HttpMethod, HttpRequest};
use crate::resources::{circus_endpoint, Endpoint, StoreEndpoint};
use crate::tree::Tree;

async fn post_form(client: &HttpClient, url: &str, params: Tree) -> Result<Tree, ClientError> {
    let request = HttpRequest::builder(HttpMethod::Post, url)
        .encoding(BodyEncoding::Form)
        .payload(params)
        .build()?;
    client.request(request).await
}

/// Reads the stock of one or more items.
#[derive(Clone, Copy, Debug)]
pub struct GetStock;

impl StoreEndpoint for GetStock {
    const NAME: &'static str = "getStock";
    const ENDPOINT: Endpoint = circus_endpoint!("getStock");
    const SELLER_KEY: &'static str = "seller_id";
}

impl GetStock {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_form(client, url, params).await
    }
}

/// Updates the stock of one or more items.
///
/// ```rust,ignore
/// use yahoo_shopping_api::resources::SetStock;
/// use yahoo_shopping_api::Tree;
///
/// let response = SetStock::request(&client, Tree::from_pairs([
///     ("seller_id", "snbx-store"),
///     ("item_code", "a,b"),
///     ("quantity", "5,+1"),
/// ])).await?;
///
/// for item in SetStock::error_items(&response) {
///     println!("{item:?}");
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SetStock;

impl StoreEndpoint for SetStock {
    const NAME: &'static str = "setStock";
    const ENDPOINT: Endpoint = circus_endpoint!("setStock");
    const SELLER_KEY: &'static str = "seller_id";
}

impl SetStock {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_form(client, url, params).await
    }

    /// Returns the results that carry an `ErrorCode`.
    ///
    /// A single-item update that failed is reported as an API error instead,
    /// so a response with one result never has error items.
    #[must_use]
    pub fn error_items(response: &Tree) -> Vec<Tree> {
        let returned = response
            .pointer(&["@attributes", "totalResultsReturned"])
            .and_then(Tree::as_u64);
        if returned == Some(1) {
            return Vec::new();
        }

        response
            .get("Result")
            .map(Tree::to_list)
            .unwrap_or_default()
            .into_iter()
            .filter(|item| item.contains_key("ErrorCode"))
            .cloned()
            .collect()
    }
}
