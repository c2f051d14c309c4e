//! Endpoint wrappers for the Yahoo! Shopping store APIs.
//!
//! Each wrapper is a unit struct implementing [`StoreEndpoint`], with async
//! associated functions that validate the identifiers they need, pick the
//! sandbox or production URL from the seller id, and reshape the decoded
//! tree.
//!
//! # Available Endpoints
//!
//! ## Items ([`items`])
//!
//! - [`GetItem`], [`EditItem`], [`SubmitItem`], [`UpdateItems`], [`MyItemList`]
//!
//! ## Orders ([`orders`])
//!
//! - [`OrderInfo`], [`OrderList`], [`OrderCount`], [`OrderChange`],
//!   [`OrderItemAdd`], [`OrderPayStatusChange`], [`OrderShipStatusChange`]
//!
//! Order endpoints take a `<Req>` XML document sent as a form body.
//!
//! ## Stock ([`stock`])
//!
//! - [`GetStock`], [`SetStock`]
//!
//! ## Questions ([`questions`])
//!
//! - [`ExternalTalkList`], [`ExternalTalkDetail`], [`ExternalTalkAdd`],
//!   [`ExternalTalkRead`], [`ExternalTalkPrivate`], [`ExternalTalkFileAdd`],
//!   [`ExternalTalkFileDownload`]
//!
//! ## Selling ([`selling`])
//!
//! - [`ReservePublish`], [`PublishHistorySummary`]
//!
//! ## Shopping ([`shopping`])
//!
//! - [`ItemSearch`]: the public item search API, production only
//!
//! # Sandbox Routing
//!
//! Store accounts whose id contains `snbx-` are sandbox accounts and are sent
//! to `test.circus.shopping.yahooapis.jp` instead of
//! `circus.shopping.yahooapis.jp`.

pub mod items;
pub mod orders;
pub mod questions;
pub mod selling;
pub mod shopping;
pub mod stock;

pub use items::{EditItem, ExpandSpec, GetItem, MyItemList, SubmitItem, UpdateItems};
pub use orders::{
    OrderChange, OrderCount, OrderInfo, OrderItemAdd, OrderList, OrderPayStatusChange,
    OrderShipStatusChange,
};
pub use questions::{
    ExternalTalkAdd, ExternalTalkDetail, ExternalTalkFileAdd, ExternalTalkFileDownload,
    ExternalTalkList, ExternalTalkPrivate, ExternalTalkRead,
};
pub use selling::{PublishHistorySummary, ReserveMode, ReservePublish};
pub use shopping::ItemSearch;
pub use stock::{GetStock, SetStock};

use crate::clients::ValidationError;
use crate::config::SellerId;
use crate::tree::Tree;

/// The production and, for store APIs, sandbox URL of one endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    production: &'static str,
    sandbox: Option<&'static str>,
}

impl Endpoint {
    /// Creates an endpoint with both URLs.
    #[must_use]
    pub const fn new(production: &'static str, sandbox: &'static str) -> Self {
        Self {
            production,
            sandbox: Some(sandbox),
        }
    }

    /// Creates an endpoint that has no sandbox.
    #[must_use]
    pub const fn production_only(production: &'static str) -> Self {
        Self {
            production,
            sandbox: None,
        }
    }

    /// Returns the production URL.
    #[must_use]
    pub const fn production(&self) -> &'static str {
        self.production
    }

    /// Returns the sandbox URL, if the endpoint has one.
    #[must_use]
    pub const fn sandbox(&self) -> Option<&'static str> {
        self.sandbox
    }

    /// Returns the URL for `seller`: the sandbox one for sandbox accounts.
    ///
    /// ```rust
    /// use yahoo_shopping_api::resources::{GetItem, StoreEndpoint};
    /// use yahoo_shopping_api::SellerId;
    ///
    /// let sandbox = SellerId::new("snbx-store").unwrap();
    /// assert_eq!(
    ///     GetItem::ENDPOINT.url_for(&sandbox),
    ///     "https://test.circus.shopping.yahooapis.jp/ShoppingWebService/V1/getItem"
    /// );
    /// ```
    #[must_use]
    pub fn url_for(&self, seller: &SellerId) -> &'static str {
        match self.sandbox {
            Some(sandbox) if seller.is_sandbox() => sandbox,
            _ => self.production,
        }
    }
}

/// Builds the [`Endpoint`] of a store API from its name.
macro_rules! circus_endpoint {
    ($name:literal) => {
        $crate::resources::Endpoint::new(
            concat!(
                "https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/",
                $name
            ),
            concat!(
                "https://test.circus.shopping.yahooapis.jp/ShoppingWebService/V1/",
                $name
            ),
        )
    };
}
pub(crate) use circus_endpoint;

/// Static description of one store API endpoint.
pub trait StoreEndpoint {
    /// The API name, as it appears in the URL.
    const NAME: &'static str;

    /// Where requests are sent.
    const ENDPOINT: Endpoint;

    /// The parameter key holding the seller id; its spelling differs between
    /// API families.
    const SELLER_KEY: &'static str;

    /// Reads and validates the seller id from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingParameter`] naming
    /// [`SELLER_KEY`](Self::SELLER_KEY) when it is absent or empty.
    fn seller_id(params: &Tree) -> Result<SellerId, ValidationError> {
        let value = required(params, Self::SELLER_KEY)?;
        SellerId::new(value).map_err(|_| ValidationError::MissingParameter {
            name: Self::SELLER_KEY,
        })
    }

    /// Validates the seller id and returns the URL to use for it.
    ///
    /// # Errors
    ///
    /// Same as [`seller_id`](Self::seller_id).
    fn url(params: &Tree) -> Result<&'static str, ValidationError> {
        Ok(Self::ENDPOINT.url_for(&Self::seller_id(params)?))
    }
}

/// Returns the text under `key`, rejecting absent and empty values the way
/// the APIs do (`""` and `"0"` count as empty).
pub(crate) fn required(params: &Tree, key: &'static str) -> Result<String, ValidationError> {
    params
        .get(key)
        .filter(|value| !value.is_falsy())
        .and_then(Tree::as_str)
        .map(str::to_string)
        .ok_or(ValidationError::MissingParameter { name: key })
}

/// Returns the child under `key` as a list, or an empty list when absent.
pub(crate) fn list_at(tree: &Tree, path: &[&str]) -> Vec<Tree> {
    tree.pointer(path)
        .cloned()
        .map(Tree::into_list)
        .unwrap_or_default()
}

/// Returns `true` when the leaf at `path` is `OK`.
pub(crate) fn status_ok(tree: &Tree, path: &[&str]) -> bool {
    tree.pointer(path).and_then(Tree::as_str) == Some("OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sandbox_switch<E: StoreEndpoint>() {
        let production = SellerId::new("store").unwrap();
        let sandbox = SellerId::new("snbx-store").unwrap();

        let expected_production = format!(
            "https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/{}",
            E::NAME
        );
        let expected_sandbox = format!(
            "https://test.circus.shopping.yahooapis.jp/ShoppingWebService/V1/{}",
            E::NAME
        );

        assert_eq!(E::ENDPOINT.url_for(&production), expected_production);
        assert_eq!(E::ENDPOINT.url_for(&sandbox), expected_sandbox);

        let params = Tree::from_pairs([(E::SELLER_KEY, "snbx-store")]);
        assert_eq!(E::url(&params).unwrap(), expected_sandbox);
    }

    #[test]
    fn test_every_store_endpoint_switches_to_sandbox() {
        assert_sandbox_switch::<GetItem>();
        assert_sandbox_switch::<EditItem>();
        assert_sandbox_switch::<SubmitItem>();
        assert_sandbox_switch::<UpdateItems>();
        assert_sandbox_switch::<MyItemList>();

        assert_sandbox_switch::<OrderInfo>();
        assert_sandbox_switch::<OrderList>();
        assert_sandbox_switch::<OrderCount>();
        assert_sandbox_switch::<OrderChange>();
        assert_sandbox_switch::<OrderItemAdd>();
        assert_sandbox_switch::<OrderPayStatusChange>();
        assert_sandbox_switch::<OrderShipStatusChange>();

        assert_sandbox_switch::<GetStock>();
        assert_sandbox_switch::<SetStock>();

        assert_sandbox_switch::<ExternalTalkList>();
        assert_sandbox_switch::<ExternalTalkDetail>();
        assert_sandbox_switch::<ExternalTalkAdd>();
        assert_sandbox_switch::<ExternalTalkRead>();
        assert_sandbox_switch::<ExternalTalkPrivate>();
        assert_sandbox_switch::<ExternalTalkFileAdd>();
        assert_sandbox_switch::<ExternalTalkFileDownload>();

        assert_sandbox_switch::<ReservePublish>();
        assert_sandbox_switch::<PublishHistorySummary>();
    }

    #[test]
    fn test_production_only_endpoint_ignores_sandbox() {
        let sandbox = SellerId::new("snbx-store").unwrap();
        assert_eq!(
            ItemSearch::ENDPOINT.url_for(&sandbox),
            "https://shopping.yahooapis.jp/ShoppingWebService/V3/itemSearch"
        );
        assert!(ItemSearch::ENDPOINT.sandbox().is_none());
    }

    #[test]
    fn test_seller_keys_follow_each_api_family() {
        assert_eq!(GetItem::SELLER_KEY, "seller_id");
        assert_eq!(OrderInfo::SELLER_KEY, "SellerId");
        assert_eq!(OrderCount::SELLER_KEY, "sellerId");
        assert_eq!(ExternalTalkList::SELLER_KEY, "sellerId");
    }

    #[test]
    fn test_missing_seller_id() {
        let result = GetItem::url(&Tree::from_pairs([("item_code", "a")]));
        assert_eq!(
            result,
            Err(ValidationError::MissingParameter { name: "seller_id" })
        );

        let result = GetItem::url(&Tree::from_pairs([("seller_id", "")]));
        assert!(result.is_err());

        let result = GetItem::url(&Tree::from_pairs([("seller_id", Tree::empty_map())]));
        assert!(result.is_err());
    }

    #[test]
    fn test_required_rejects_zero() {
        let params = Tree::from_pairs([("topicId", "0")]);
        assert!(required(&params, "topicId").is_err());
    }
}
