//! Publishing of pending store changes.
//!
//! Item and store edits are staged until they are published. [`ReservePublish`]
//! publishes them now or at a reserved time, and [`PublishHistorySummary`]
//! lists past publications.

use chrono::NaiveDateTime;

use crate::clients::{BodyEncoding, ClientError, HttpClient, HttpMethod, HttpRequest};
use crate::config::SellerId;
use crate::resources::{circus_endpoint, Endpoint, StoreEndpoint};
use crate::tree::Tree;

/// Format of the `reserve_time` parameter.
pub const RESERVE_TIME_FORMAT: &str = "%Y%m%d%H%M";

/// Values of the `mode` parameter of [`ReservePublish`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ReserveMode {
    /// Publish now, or at `reserve_time` when given.
    Publish = 1,
    /// Cancel the current reservation.
    Cancel = 2,
    /// Report the current reservation.
    Status = 3,
}

impl From<ReserveMode> for Tree {
    fn from(mode: ReserveMode) -> Self {
        Self::from(mode as u8)
    }
}

/// Publishes staged changes, immediately or at a reserved time.
///
/// ```rust
/// use chrono::NaiveDate;
/// use yahoo_shopping_api::resources::ReservePublish;
/// use yahoo_shopping_api::{SellerId, Tree};
///
/// let seller = SellerId::new("snbx-store").unwrap();
/// let at = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .unwrap()
///     .and_hms_opt(9, 30, 0)
///     .unwrap();
///
/// let params = ReservePublish::reserve(&seller, at);
/// assert_eq!(params.get("mode"), Some(&Tree::leaf("1")));
/// assert_eq!(params.get("reserve_time"), Some(&Tree::leaf("202403010930")));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ReservePublish;

impl StoreEndpoint for ReservePublish {
    const NAME: &'static str = "reservePublish";
    const ENDPOINT: Endpoint = circus_endpoint!("reservePublish");
    const SELLER_KEY: &'static str = "seller_id";
}

impl ReservePublish {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .encoding(BodyEncoding::Form)
            .payload(params)
            .build()?;
        client.request(request).await
    }

    /// Parameters that publish immediately.
    #[must_use]
    pub fn publish_now(seller: &SellerId) -> Tree {
        Self::params(seller, ReserveMode::Publish)
    }

    /// Parameters that reserve publication at `at`, to the minute.
    #[must_use]
    pub fn reserve(seller: &SellerId, at: NaiveDateTime) -> Tree {
        let mut params = Self::params(seller, ReserveMode::Publish);
        params.insert("reserve_time", at.format(RESERVE_TIME_FORMAT).to_string());
        params
    }

    /// Parameters that cancel the current reservation.
    #[must_use]
    pub fn cancel(seller: &SellerId) -> Tree {
        Self::params(seller, ReserveMode::Cancel)
    }

    /// Parameters that query the current reservation.
    #[must_use]
    pub fn status(seller: &SellerId) -> Tree {
        Self::params(seller, ReserveMode::Status)
    }

    fn params(seller: &SellerId, mode: ReserveMode) -> Tree {
        Tree::from_pairs([
            (Self::SELLER_KEY, Tree::from(seller.as_ref())),
            ("mode", Tree::from(mode)),
        ])
    }
}

/// Summaries of past publications.
#[derive(Clone, Copy, Debug)]
pub struct PublishHistorySummary;

impl StoreEndpoint for PublishHistorySummary {
    const NAME: &'static str = "publishHistorySummary";
    const ENDPOINT: Endpoint = circus_endpoint!("publishHistorySummary");
    const SELLER_KEY: &'static str = "seller_id";
}

impl PublishHistorySummary {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `seller_id` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .payload(params)
            .build()?;
        client.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn seller() -> SellerId {
        SellerId::new("snbx-store").unwrap()
    }

    #[test]
    fn test_mode_helpers() {
        let cases = [
            (ReservePublish::publish_now(&seller()), "1"),
            (ReservePublish::cancel(&seller()), "2"),
            (ReservePublish::status(&seller()), "3"),
        ];

        for (params, mode) in cases {
            assert_eq!(params.get("seller_id"), Some(&Tree::leaf("snbx-store")));
            assert_eq!(params.get("mode"), Some(&Tree::leaf(mode)));
            assert!(!params.contains_key("reserve_time"));
        }
    }

    #[test]
    fn test_reserve_formats_time_to_the_minute() {
        let at = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 5, 59)
            .unwrap();

        let params = ReservePublish::reserve(&seller(), at);
        assert_eq!(
            params.get("reserve_time").and_then(Tree::as_str),
            Some("202412312305")
        );
        assert_eq!(ReservePublish::url(&params).unwrap(), ReservePublish::ENDPOINT.sandbox().unwrap());
    }
}
