//! HTTP client layer for the Yahoo! Shopping store APIs.
//!
//! # Overview
//!
//! - [`HttpClient`]: performs one exchange per call
//! - [`HttpRequest`]: a request with its method, URL, encoding, and payload
//! - [`ContentNegotiator`]: encodes payloads as form, JSON, or multipart bodies
//! - [`RawResponse`] / [`ResponseHeaders`]: the raw exchange and its header fields
//! - [`ResponseParser`]: turns raw responses into trees or typed errors
//! - [`Paginator`]: walks offset-paginated listings
//! - [`ClientError`]: unified error type for all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use yahoo_shopping_api::clients::{BodyEncoding, HttpClient, HttpMethod, HttpRequest};
//! use yahoo_shopping_api::{codec::xml, ConnectionConfig, Tree};
//!
//! let client = HttpClient::new(&ConnectionConfig::builder().build()?);
//!
//! let document = xml::encode("Req", &Tree::from_pairs([("SellerId", "store")]))?;
//! let request = HttpRequest::builder(HttpMethod::Post, "https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/orderCount")
//!     .encoding(BodyEncoding::Form)
//!     .text(document)
//!     .build()?;
//!
//! let tree = client.request(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod negotiator;
mod pagination;
mod parser;

pub use errors::{ApiError, AuthError, ClientError, TransportError, ValidationError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    BodyEncoding, FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder, Payload,
};
pub use http_response::{RawResponse, ResponseHeaders};
pub use negotiator::{ContentNegotiator, EncodedBody};
pub use pagination::{PageState, Paginator};
pub use parser::{DownloadedFile, ParseOutcome, ResponseParser};
