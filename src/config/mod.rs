//! Connection configuration for the Yahoo! Shopping API client.
//!
//! # Overview
//!
//! - [`ConnectionConfig`]: read-only settings shared by every request
//! - [`ConnectionConfigBuilder`]: a builder for constructing [`ConnectionConfig`]
//! - [`AccessToken`]: a validated OAuth token with masked debug output
//! - [`SellerId`]: a validated store account id with sandbox detection
//! - [`HostUrl`]: a validated origin override
//!
//! # Example
//!
//! ```rust
//! use yahoo_shopping_api::{AccessToken, ConnectionConfig};
//!
//! let config = ConnectionConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .client_cert("/etc/store/cert.pem")
//!     .client_key("/etc/store/key.pem")
//!     .build()
//!     .unwrap();
//!
//! assert!(config.access_token().is_some());
//! ```

mod newtypes;

pub use newtypes::{AccessToken, HostUrl, SellerId};

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Settings applied to every request made through an
/// [`HttpClient`](crate::clients::HttpClient).
///
/// Every field is optional. Without a token no `Authorization` header is
/// sent; the certificate and key enable mutual TLS, which the store APIs
/// require in production.
///
/// # Thread Safety
///
/// `ConnectionConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct ConnectionConfig {
    access_token: Option<AccessToken>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ConnectionConfig {
    /// Creates a new builder for constructing a `ConnectionConfig`.
    #[must_use]
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::new()
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the client certificate path, if configured.
    #[must_use]
    pub fn client_cert(&self) -> Option<&Path> {
        self.client_cert.as_deref()
    }

    /// Returns the client private key path, if configured.
    #[must_use]
    pub fn client_key(&self) -> Option<&Path> {
        self.client_key.as_deref()
    }

    /// Returns the API host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ConnectionConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConnectionConfig>();
};

/// Builder for constructing [`ConnectionConfig`] instances.
///
/// # Defaults
///
/// Every field defaults to `None`.
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    access_token: Option<AccessToken>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ConnectionConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth access token sent as `Authorization: Bearer`.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the PEM client certificate used for mutual TLS.
    #[must_use]
    pub fn client_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_cert = Some(path.into());
        self
    }

    /// Sets the PEM private key matching the client certificate.
    #[must_use]
    pub fn client_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_key = Some(path.into());
        self
    }

    /// Routes every request to `host` instead of the API's own origin.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConnectionConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPath`] if a certificate or key path was
    /// set to an empty value.
    pub fn build(self) -> Result<ConnectionConfig, ConfigError> {
        if is_empty_path(self.client_cert.as_deref()) {
            return Err(ConfigError::EmptyPath {
                field: "client_cert",
            });
        }
        if is_empty_path(self.client_key.as_deref()) {
            return Err(ConfigError::EmptyPath { field: "client_key" });
        }

        Ok(ConnectionConfig {
            access_token: self.access_token,
            client_cert: self.client_cert,
            client_key: self.client_key,
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn is_empty_path(path: Option<&Path>) -> bool {
    path.is_some_and(|path| path.as_os_str().is_empty())
}
