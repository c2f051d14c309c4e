//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper checks its contents on construction, so an invalid token,
//! seller id, or host never reaches the transport.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OAuth access token.
///
/// The `Debug` implementation masks the value so tokens do not end up in
/// logs.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::AccessToken;
///
/// let token = AccessToken::new("my-token").unwrap();
/// assert_eq!(token.as_ref(), "my-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A store account id.
///
/// Accounts whose id contains `snbx-` live in the sandbox environment and
/// are routed to the test endpoints.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::SellerId;
///
/// assert!(SellerId::new("snbx-my-store").unwrap().is_sandbox());
/// assert!(!SellerId::new("my-store").unwrap().is_sandbox());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SellerId(String);

impl SellerId {
    const SANDBOX_MARKER: &'static str = "snbx-";

    /// Creates a new validated seller id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySellerId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptySellerId);
        }
        Ok(Self(id))
    }

    /// Returns `true` for sandbox accounts.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.0.contains(Self::SANDBOX_MARKER)
    }
}

impl AsRef<str> for SellerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SellerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SellerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated origin that replaces the API host of every request.
///
/// Used to route traffic through a proxy or to a local mock server. Only the
/// scheme, host, and port are used; any path is ignored.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::HostUrl;
///
/// let url = HostUrl::new("http://localhost:3000/ignored").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("localhost"));
/// assert_eq!(url.origin(), "http://localhost:3000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    authority_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        let authority_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            authority_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }

    /// Returns `scheme://host[:port]` without any path.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.authority_end]
    }

    /// Moves `endpoint` onto this origin, keeping its path and query.
    ///
    /// ```rust
    /// use yahoo_shopping_api::HostUrl;
    ///
    /// let host = HostUrl::new("http://127.0.0.1:8080").unwrap();
    /// assert_eq!(
    ///     host.rebase("https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/getItem?x=1"),
    ///     "http://127.0.0.1:8080/ShoppingWebService/V1/getItem?x=1"
    /// );
    /// ```
    #[must_use]
    pub fn rebase(&self, endpoint: &str) -> String {
        let path_start = endpoint.find("://").map_or(0, |scheme_end| {
            let authority = &endpoint[scheme_end + 3..];
            authority
                .find(['/', '?', '#'])
                .map_or(endpoint.len(), |i| scheme_end + 3 + i)
        });
        format!("{}{}", self.origin(), &endpoint[path_start..])
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(AccessToken::new(""), Err(ConfigError::EmptyAccessToken)));
        assert!(matches!(AccessToken::new("  "), Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_seller_id_detects_sandbox() {
        assert!(SellerId::new("snbx-abc").unwrap().is_sandbox());
        assert!(SellerId::new("store-snbx-abc").unwrap().is_sandbox());
        assert!(!SellerId::new("snbx").unwrap().is_sandbox());
        assert!(!SellerId::new("my-store").unwrap().is_sandbox());
    }

    #[test]
    fn test_seller_id_rejects_empty() {
        assert!(matches!(SellerId::new(""), Err(ConfigError::EmptySellerId)));
    }

    #[test]
    fn test_seller_id_round_trip_serialization() {
        let original = SellerId::new("snbx-store").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""snbx-store""#);
        let restored: SellerId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
        assert!(serde_json::from_str::<SellerId>(r#""""#).is_err());
    }

    #[test]
    fn test_host_url_validates_format() {
        let url = HostUrl::new("https://proxy.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("proxy.example.com"));
        assert_eq!(url.origin(), "https://proxy.example.com");

        let url = HostUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.host_name(), Some("localhost"));
        assert_eq!(url.origin(), "http://localhost:3000");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("proxy.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("://example.com").is_err());
        assert!(HostUrl::new("https://:8080").is_err());
    }

    #[test]
    fn test_host_url_rebase_keeps_path_and_query() {
        let host = HostUrl::new("http://127.0.0.1:9000/").unwrap();
        assert_eq!(
            host.rebase("https://test.circus.shopping.yahooapis.jp/ShoppingWebService/V1/externalTalkAdd?topicId=t1"),
            "http://127.0.0.1:9000/ShoppingWebService/V1/externalTalkAdd?topicId=t1"
        );
        assert_eq!(host.rebase("https://example.com"), "http://127.0.0.1:9000");
    }
}
