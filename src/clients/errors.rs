//! Error types for requests made through the client layer.
//!
//! # Error Handling
//!
//! - [`ValidationError`]: the request was rejected before anything was sent
//! - [`TransportError`]: the exchange itself failed (network, TLS, certificates)
//! - [`AuthError`]: the server answered with a `WWW-Authenticate` challenge
//! - [`ApiError`]: the body carried one of the API's error envelopes
//! - [`ClientError`]: unified error type wrapping all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use yahoo_shopping_api::clients::ClientError;
//!
//! match client.request(request).await {
//!     Ok(tree) => println!("{tree:?}"),
//!     Err(ClientError::Auth(e)) => println!("re-authorize: {}", e.challenge),
//!     Err(ClientError::Api(e)) => println!("api error: {} ({})", e.message, e.detail),
//!     Err(ClientError::EmptyResponse) => println!("nothing came back"),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::XmlError;

/// A request that cannot be sent as built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required identifier is absent from the parameters.
    #[error("{name} not specified in parameter")]
    MissingParameter {
        /// The parameter key that was expected.
        name: &'static str,
    },

    /// Pagination needs a page size of at least one.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// The payload cannot be sent with the chosen method or encoding.
    #[error("Payload of kind {payload} cannot be sent as a {method} request with {encoding} encoding")]
    IncompatiblePayload {
        /// The payload kind.
        payload: &'static str,
        /// The HTTP method.
        method: &'static str,
        /// The body encoding.
        encoding: &'static str,
    },

    /// A file part declared a MIME type the transport does not accept.
    #[error("Invalid MIME type '{mime}'")]
    InvalidMimeType {
        /// The rejected MIME type.
        mime: String,
    },

    /// Building the XML request document failed.
    #[error(transparent)]
    Xml(#[from] XmlError),
}

/// The HTTP exchange could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS, or protocol failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A configured certificate or key file could not be read.
    #[error("Cannot read certificate file '{}': {source}", path.display())]
    Certificate {
        /// The configured path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The certificate and key do not form a usable client identity.
    #[error("Invalid client identity: {0}")]
    Identity(#[source] reqwest::Error),
}

/// The server rejected the credentials.
///
/// Raised whenever the response carries a non-empty `WWW-Authenticate`
/// header, before the body is looked at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{challenge}")]
pub struct AuthError {
    /// The `WWW-Authenticate` header value.
    pub challenge: String,
}

/// The server answered with an error envelope.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::clients::ApiError;
///
/// let error = ApiError {
///     message: "Invalid SellerId".to_string(),
///     detail: "ed-00001: Invalid SellerId".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid SellerId");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,
    /// `"<Code>: <Message>"` for the message envelope, empty otherwise.
    pub detail: String,
}

/// Unified error type for every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request was rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server sent an authentication challenge.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The body carried an error envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The body was missing, undecodable, or empty.
    #[error("no response: failed to get the response body")]
    EmptyResponse,
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(TransportError::Network(error))
    }
}

impl From<XmlError> for ClientError {
    fn from(error: XmlError) -> Self {
        Self::Validation(ValidationError::Xml(error))
    }
}
