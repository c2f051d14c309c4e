//! Item registration and lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use yahoo_shopping_api::resources::{EditItem, GetItem};
//! use yahoo_shopping_api::Tree;
//!
//! let item = GetItem::request(&client, Tree::from_pairs([
//!     ("seller_id", "snbx-store"),
//!     ("item_code", "t-shirt"),
//! ])).await?;
//!
//! let result = EditItem::request(&client, Tree::from_pairs([
//!     ("seller_id", "snbx-store"),
//!     ("item_code", "t-shirt"),
//!     ("price", "1980"),
//! ])).await?;
//! if !EditItem::is_success(&result) {
//!     println!("{:?}", EditItem::errors(&result));
//! }
//! ```

use crate::clients::{BodyEncoding, ClientError, HttpClient, HttpMethod, HttpRequest};
use crate::resources::{circus_endpoint, list_at, status_ok, Endpoint, StoreEndpoint};
use crate::tree::Tree;

/// Values of the `expand_spec` parameter of [`GetItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExpandSpec {
    /// Specs are returned as the fixed `Spec1` to `Spec10` fields.
    Fixed = 0,
    /// Specs are returned as a repeated `Spec` element.
    Array = 1,
}

impl From<ExpandSpec> for Tree {
    fn from(value: ExpandSpec) -> Self {
        Self::from(value as u8)
    }
}

async fn get(client: &HttpClient, url: &str, params: Tree) -> Result<Tree, ClientError> {
    let request = HttpRequest::builder(HttpMethod::Get, url)
        .payload(params)
        .build()?;
    client.request(request).await
}

async fn post_form(client: &HttpClient, url: &str, params: Tree) -> Result<Tree, ClientError> {
    let request = HttpRequest::builder(HttpMethod::Post, url)
        .encoding(BodyEncoding::Form)
        .payload(params)
        .build()?;
    client.request(request).await
}

/// Fetches one item.
#[derive(Clone, Copy, Debug)]
pub struct GetItem;

impl StoreEndpoint for GetItem {
    const NAME: &'static str = "getItem";
    const ENDPOINT: Endpoint = circus_endpoint!("getItem");
    const SELLER_KEY: &'static str = "seller_id";
}

impl GetItem {
    /// Returns the item's `Result` subtree, or an empty map when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        let mut response = get(client, url, params).await?;
        Ok(response.remove("Result").unwrap_or_default())
    }
}

/// Creates or updates an item.
#[derive(Clone, Copy, Debug)]
pub struct EditItem;

impl StoreEndpoint for EditItem {
    const NAME: &'static str = "editItem";
    const ENDPOINT: Endpoint = circus_endpoint!("editItem");
    const SELLER_KEY: &'static str = "seller_id";
}

impl EditItem {
    /// Sends the item fields as a form and returns the `Result` subtree.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        let mut response = post_form(client, url, params).await?;
        Ok(response.remove("Result").unwrap_or_default())
    }

    /// Returns `true` when `Status` is `OK`.
    #[must_use]
    pub fn is_success(result: &Tree) -> bool {
        status_ok(result, &["Status"])
    }

    /// Returns the warnings attached to the result.
    #[must_use]
    pub fn warnings(result: &Tree) -> Vec<Tree> {
        list_at(result, &["Warning"])
    }

    /// Returns the errors attached to the result.
    #[must_use]
    pub fn errors(result: &Tree) -> Vec<Tree> {
        list_at(result, &["Error"])
    }
}

/// Publishes a pending item change to the storefront.
#[derive(Clone, Copy, Debug)]
pub struct SubmitItem;

impl StoreEndpoint for SubmitItem {
    const NAME: &'static str = "submitItem";
    const ENDPOINT: Endpoint = circus_endpoint!("submitItem");
    const SELLER_KEY: &'static str = "seller_id";
}

impl SubmitItem {
    /// Returns the full response tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_form(client, url, params).await
    }
}

/// Updates fields of several items at once.
#[derive(Clone, Copy, Debug)]
pub struct UpdateItems;

impl StoreEndpoint for UpdateItems {
    const NAME: &'static str = "updateItems";
    const ENDPOINT: Endpoint = circus_endpoint!("updateItems");
    const SELLER_KEY: &'static str = "seller_id";
}

impl UpdateItems {
    /// Returns the full response tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        post_form(client, url, params).await
    }

    /// Returns `true` when `Status` is `OK`.
    #[must_use]
    pub fn is_success(result: &Tree) -> bool {
        status_ok(result, &["Status"])
    }

    /// Returns the per-item results that failed, always as a list.
    #[must_use]
    pub fn errors(result: &Tree) -> Vec<Tree> {
        list_at(result, &["Result"])
    }
}

/// Lists the store's registered items.
#[derive(Clone, Copy, Debug)]
pub struct MyItemList;

impl StoreEndpoint for MyItemList {
    const NAME: &'static str = "myItemList";
    const ENDPOINT: Endpoint = circus_endpoint!("myItemList");
    const SELLER_KEY: &'static str = "seller_id";
}

impl MyItemList {
    /// Returns the full response tree, including paging attributes.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        get(client, url, params).await
    }
}
