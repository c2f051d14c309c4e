//! # Yahoo! Shopping API Rust client
//!
//! A Rust client for the Yahoo! Shopping store management APIs and the public
//! item search API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ConnectionConfig`] and [`ConnectionConfigBuilder`]
//! - Validated newtypes for credentials and account ids
//! - An async HTTP client sending form, JSON, or multipart bodies, with
//!   optional mutual TLS
//! - A generic [`Tree`] value that XML and JSON responses are both decoded into
//! - Typed errors for authentication challenges and the APIs' error envelopes
//! - A pagination driver for order search and item search
//! - Endpoint wrappers for items, orders, stock, questions, publishing, and
//!   item search, routed to the sandbox for `snbx-` accounts
//!
//! ## Quick Start
//!
//! ```rust
//! use yahoo_shopping_api::{AccessToken, ConnectionConfig};
//!
//! let config = ConnectionConfig::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .client_cert("/etc/store/cert.pem")
//!     .client_key("/etc/store/key.pem")
//!     .user_agent_prefix("MyStore/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use yahoo_shopping_api::resources::{GetItem, OrderList};
//! use yahoo_shopping_api::{HttpClient, Tree};
//!
//! let client = HttpClient::new(&config);
//!
//! let item = GetItem::request(&client, Tree::from_pairs([
//!     ("seller_id", "snbx-store"),
//!     ("item_code", "t-shirt"),
//! ])).await?;
//!
//! let orders = OrderList::request_all(&client, Tree::from_pairs([
//!     ("SellerId", "snbx-store"),
//! ])).await?;
//! ```
//!
//! ## Error Handling
//!
//! Every call returns `Result<_, ClientError>`:
//!
//! ```rust,ignore
//! use yahoo_shopping_api::ClientError;
//!
//! match GetItem::request(&client, params).await {
//!     Ok(item) => println!("{item:?}"),
//!     Err(ClientError::Auth(error)) => eprintln!("token rejected: {}", error.challenge),
//!     Err(ClientError::Api(error)) => eprintln!("{} ({})", error.message, error.detail),
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```
//!
//! ## Codecs
//!
//! ```rust
//! use yahoo_shopping_api::codec::{form, xml};
//! use yahoo_shopping_api::Tree;
//!
//! let params = Tree::from_pairs([("SellerId", "store")]);
//! let document = xml::encode("Req", &params).unwrap();
//! assert_eq!(xml::decode(&document).unwrap(), params);
//! assert_eq!(form::encode(&params), "SellerId=store");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction and
//!   wrappers validate identifiers before any network call
//! - **Thread-safe**: the client is `Send + Sync` and holds no mutable state
//! - **Sequential**: each call is one exchange; pagination awaits every page
//!   before requesting the next

pub mod clients;
pub mod codec;
pub mod config;
pub mod error;
pub mod resources;
mod tree;

pub use tree::Tree;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ConnectionConfig, ConnectionConfigBuilder, HostUrl, SellerId};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, AuthError, BodyEncoding, ClientError, DownloadedFile, FileUpload, HttpClient,
    HttpMethod, HttpRequest, HttpRequestBuilder, Payload, TransportError, ValidationError,
};
