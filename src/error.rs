//! Configuration error types for the Yahoo! Shopping API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! settings fail before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use yahoo_shopping_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the connection configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide the OAuth access token issued for the store.")]
    EmptyAccessToken,

    /// Seller id cannot be empty.
    #[error("Seller id cannot be empty. Please provide the store account id (e.g., 'my-store' or 'snbx-my-store').")]
    EmptySellerId,

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A certificate or key path was set to an empty value.
    #[error("The '{field}' path cannot be empty.")]
    EmptyPath {
        /// The configuration field holding the path.
        field: &'static str,
    },
}
