//! HTTP request types for the Yahoo! Shopping API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! carries its own [`BodyEncoding`], so the client holding the connection
//! settings never changes between calls.

use std::fmt;
use std::path::Path;

use crate::clients::errors::ValidationError;
use crate::tree::Tree;

/// HTTP methods used by the store APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET; a tree payload becomes the query string.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a request body is encoded on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`.
    Form,
    /// `application/json`.
    #[default]
    Json,
    /// `multipart/form-data`.
    Multipart,
}

impl BodyEncoding {
    /// Returns the MIME type string for this encoding.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Json => "json",
            Self::Multipart => "multipart",
        }
    }
}

/// A file part of a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl FileUpload {
    /// Creates a file part from bytes already in memory.
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Reads a file part from disk, naming it after the file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn from_path(
        field: impl Into<String>,
        path: impl AsRef<Path>,
        mime_type: impl Into<String>,
    ) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(field, file_name, mime_type, content))
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

/// The body (or query, for GET) of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// Structured parameters.
    Tree(Tree),
    /// A pre-encoded document, such as an XML request.
    Text(String),
    /// Scalar fields plus file parts.
    Multipart {
        /// Scalar form fields.
        fields: Tree,
        /// File parts.
        files: Vec<FileUpload>,
    },
}

impl Payload {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Tree(_) => "tree",
            Self::Text(_) => "text",
            Self::Multipart { .. } => "multipart",
        }
    }
}

impl From<Tree> for Payload {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

/// A request to one store API endpoint.
///
/// Use [`HttpRequest::builder`] to construct requests; the builder rejects
/// payloads that cannot be sent with the chosen method and encoding.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::clients::{BodyEncoding, HttpMethod, HttpRequest};
/// use yahoo_shopping_api::Tree;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "https://example.com/getItem")
///     .payload(Tree::from_pairs([("seller_id", "store"), ("item_code", "a")]))
///     .build()
///     .unwrap();
/// assert_eq!(get_request.encoding, BodyEncoding::Json);
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "https://example.com/orderInfo")
///     .encoding(BodyEncoding::Form)
///     .text("<?xml version=\"1.0\"?><Req/>")
///     .build()
///     .unwrap();
/// assert_eq!(post_request.encoding, BodyEncoding::Form);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute endpoint URL.
    pub url: String,
    /// How the payload is encoded.
    pub encoding: BodyEncoding,
    /// The payload.
    pub payload: Payload,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Checks that the payload can be sent with this method and encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompatiblePayload`] for a multipart
    /// payload without multipart encoding or on GET, a text payload in
    /// multipart mode or on GET.
    pub fn verify(&self) -> Result<(), ValidationError> {
        let incompatible = match (&self.payload, self.http_method, self.encoding) {
            (Payload::Multipart { .. } | Payload::Text(_), HttpMethod::Get, _)
            | (Payload::Text(_), _, BodyEncoding::Multipart) => true,
            (Payload::Multipart { .. }, _, encoding) => encoding != BodyEncoding::Multipart,
            _ => false,
        };

        if incompatible {
            return Err(ValidationError::IncompatiblePayload {
                payload: self.payload.kind(),
                method: self.http_method.as_str(),
                encoding: self.encoding.name(),
            });
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    encoding: BodyEncoding,
    payload: Payload,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            encoding: BodyEncoding::default(),
            payload: Payload::Empty,
        }
    }

    /// Sets the body encoding (default JSON).
    #[must_use]
    pub const fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Sets a pre-encoded text payload.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.payload = Payload::Text(text.into());
        self
    }

    /// Sets a multipart payload and switches to multipart encoding.
    #[must_use]
    pub fn multipart(mut self, fields: Tree, files: Vec<FileUpload>) -> Self {
        self.payload = Payload::Multipart { fields, files };
        self.encoding = BodyEncoding::Multipart;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, ValidationError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            encoding: self.encoding,
            payload: self.payload,
        };
        request.verify()?;
        Ok(request)
    }
}
