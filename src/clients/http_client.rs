//! HTTP client for Yahoo! Shopping API communication.
//!
//! This module provides the [`HttpClient`] type, which performs one exchange
//! per call and hands the raw response to the
//! [`ResponseParser`](crate::clients::ResponseParser).

use std::collections::HashMap;
use std::path::Path;

use reqwest::header::CONTENT_TYPE;

use crate::clients::errors::{ClientError, TransportError};
use crate::clients::http_request::{HttpMethod, HttpRequest, Payload};
use crate::clients::http_response::RawResponse;
use crate::clients::negotiator::{ContentNegotiator, EncodedBody};
use crate::clients::parser::{DownloadedFile, ResponseParser};
use crate::codec::form;
use crate::config::ConnectionConfig;
use crate::tree::Tree;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the store APIs.
///
/// The client handles:
/// - `User-Agent` and `Authorization: Bearer` headers
/// - the `Content-Type` of each request's [`BodyEncoding`](crate::clients::BodyEncoding)
/// - mutual TLS with the configured client certificate
/// - routing to the `api_host` override, if any
///
/// A fresh transport is built for every call and dropped when the call
/// returns; the client itself only holds read-only settings.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use yahoo_shopping_api::{AccessToken, ConnectionConfig, Tree};
/// use yahoo_shopping_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ConnectionConfig::builder()
///     .access_token(AccessToken::new("token")?)
///     .build()?;
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "https://circus.shopping.yahooapis.jp/ShoppingWebService/V1/getItem")
///     .payload(Tree::from_pairs([("seller_id", "store"), ("item_code", "abc")]))
///     .build()?;
///
/// let tree = client.request(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    config: ConnectionConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    #[must_use]
    pub fn new(config: &ConnectionConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Yahoo Shopping API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            config: config.clone(),
            default_headers,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the URL a request is sent to: the query string appended for
    /// GET requests with a tree payload, then the host override applied.
    #[must_use]
    pub fn resolve_url(&self, request: &HttpRequest) -> String {
        let url = match (&request.payload, request.http_method) {
            (Payload::Tree(params), HttpMethod::Get) => {
                form::append_query(&request.url, &form::encode(params))
            }
            _ => request.url.clone(),
        };

        match self.config.api_host() {
            Some(host) => host.rebase(&url),
            None => url,
        }
    }

    /// Performs one exchange and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the payload cannot be encoded
    /// and [`ClientError::Transport`] if the certificate cannot be loaded or
    /// the exchange fails.
    pub async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        request.verify()?;

        let body = match request.http_method {
            HttpMethod::Get => EncodedBody::Empty,
            HttpMethod::Post | HttpMethod::Put => {
                ContentNegotiator::encode(request.encoding, &request.payload)?
            }
        };

        let transport = self.transport().await?;
        let url = self.resolve_url(request);
        tracing::debug!(method = %request.http_method, url = %url, "Sending request");

        let mut builder = match request.http_method {
            HttpMethod::Get => transport.get(&url),
            HttpMethod::Post => transport.post(&url),
            HttpMethod::Put => transport.put(&url),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if let Some(token) = self.config.access_token() {
            builder = builder.bearer_auth(token.as_ref());
        }

        builder = match body {
            EncodedBody::Multipart(form) => builder.multipart(form),
            EncodedBody::Text(text) => builder
                .header(CONTENT_TYPE, request.encoding.as_content_type())
                .body(text),
            EncodedBody::Empty => builder.header(CONTENT_TYPE, request.encoding.as_content_type()),
        };

        let response = builder.send().await.map_err(TransportError::Network)?;

        let status_line = format!("{:?} {}", response.version(), response.status());
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(TransportError::Network)?;
        tracing::debug!(status = %status_line, bytes = body.len(), "Received response");

        Ok(RawResponse::from_parts(&status_line, headers, body.to_vec()))
    }

    /// Performs a request and parses its body into a tree.
    ///
    /// # Errors
    ///
    /// Returns any [`ClientError`]: validation and transport failures from
    /// [`execute`](Self::execute), then authentication challenges, error
    /// envelopes, and empty bodies from the parser.
    pub async fn request(&self, request: HttpRequest) -> Result<Tree, ClientError> {
        let raw = self.execute(&request).await?;
        ResponseParser::parse(&raw).into_result()
    }

    /// Performs a request whose body is a file.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), except that a non-XML body is
    /// returned as-is instead of being decoded.
    pub async fn download(&self, request: HttpRequest) -> Result<DownloadedFile, ClientError> {
        let raw = self.execute(&request).await?;
        ResponseParser::parse_download(&raw)
    }

    async fn transport(&self) -> Result<reqwest::Client, ClientError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        match (self.config.client_cert(), self.config.client_key()) {
            (Some(cert), key) => {
                let mut pem = read_pem(cert).await?;
                if let Some(key) = key {
                    pem.push(b'\n');
                    pem.extend(read_pem(key).await?);
                }
                let identity =
                    reqwest::Identity::from_pem(&pem).map_err(TransportError::Identity)?;
                builder = builder.identity(identity);
            }
            (None, Some(key)) => {
                tracing::warn!(
                    "Client key {} configured without a certificate; mutual TLS is disabled",
                    key.display()
                );
            }
            (None, None) => {}
        }

        Ok(builder.build().map_err(TransportError::Network)?)
    }
}

async fn read_pem(path: &Path) -> Result<Vec<u8>, TransportError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| TransportError::Certificate {
            path: path.to_path_buf(),
            source,
        })
}
