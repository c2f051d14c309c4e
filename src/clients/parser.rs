//! Turns raw responses into trees or typed errors.
//!
//! The store APIs report failures three ways, checked in this order:
//!
//! 1. a `WWW-Authenticate` header (expired or invalid token)
//! 2. a `{Message, Code}` envelope (XML endpoints and most JSON endpoints)
//! 3. an `{error: {reason}}` envelope (item search)
//!
//! Bodies are tried as XML first and as JSON second, since the content type
//! header is not reliable across endpoints.

use crate::clients::errors::{ApiError, AuthError, ClientError};
use crate::clients::http_response::{RawResponse, ResponseHeaders};
use crate::codec::xml;
use crate::tree::Tree;

/// Result of parsing one response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The decoded body.
    Ok(Tree),
    /// The `WWW-Authenticate` challenge.
    AuthError(String),
    /// An error envelope.
    ApiError {
        /// Human-readable message.
        message: String,
        /// `"<Code>: <Message>"`, or empty for the `error` envelope.
        detail: String,
    },
    /// Nothing usable came back.
    EmptyResponse,
}

impl ParseOutcome {
    /// Converts the outcome into the caller-facing result.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ClientError`] for every non-`Ok` outcome.
    pub fn into_result(self) -> Result<Tree, ClientError> {
        match self {
            Self::Ok(tree) => Ok(tree),
            Self::AuthError(challenge) => Err(AuthError { challenge }.into()),
            Self::ApiError { message, detail } => Err(ApiError { message, detail }.into()),
            Self::EmptyResponse => Err(ClientError::EmptyResponse),
        }
    }
}

/// A downloaded attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    /// The `Content-Type` header, if sent.
    pub content_type: Option<String>,
    /// The raw file bytes.
    pub body: Vec<u8>,
}

/// Stateless response parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Splits `raw` at its recorded header offset.
    #[must_use]
    pub fn split(raw: &RawResponse) -> (ResponseHeaders, &[u8]) {
        let block = String::from_utf8_lossy(raw.header_block());
        (ResponseHeaders::parse(&block), raw.body())
    }

    /// Parses an API response.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yahoo_shopping_api::clients::{ParseOutcome, RawResponse, ResponseParser};
    ///
    /// let raw = RawResponse::from_parts(
    ///     "HTTP/1.1 200 OK",
    ///     [("Content-Type", "application/json")],
    ///     br#"{"Message":"Invalid SellerId","Code":"ed-00001"}"#.to_vec(),
    /// );
    ///
    /// assert_eq!(
    ///     ResponseParser::parse(&raw),
    ///     ParseOutcome::ApiError {
    ///         message: "Invalid SellerId".to_string(),
    ///         detail: "ed-00001: Invalid SellerId".to_string(),
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &RawResponse) -> ParseOutcome {
        let (headers, body) = Self::split(raw);

        if let Some(challenge) = Self::auth_challenge(&headers) {
            return ParseOutcome::AuthError(challenge);
        }

        let Some(tree) = Self::decode_body(body) else {
            return ParseOutcome::EmptyResponse;
        };
        if tree.is_falsy() {
            return ParseOutcome::EmptyResponse;
        }

        match Self::detect_error_envelope(&tree) {
            Some(ApiError { message, detail }) => ParseOutcome::ApiError { message, detail },
            None => ParseOutcome::Ok(tree),
        }
    }

    /// Parses a file download response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] on a challenge, [`ClientError::EmptyResponse`]
    /// for an empty body, and [`ClientError::Api`] when the body is an XML
    /// error envelope instead of a file.
    pub fn parse_download(raw: &RawResponse) -> Result<DownloadedFile, ClientError> {
        let (headers, body) = Self::split(raw);

        if let Some(challenge) = Self::auth_challenge(&headers) {
            return Err(AuthError { challenge }.into());
        }
        if body.is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        if let Some(tree) = Self::decode_xml(body) {
            if let Some(error) = Self::detect_error_envelope(&tree) {
                return Err(error.into());
            }
        }

        Ok(DownloadedFile {
            content_type: headers.get("Content-Type").map(str::to_string),
            body: body.to_vec(),
        })
    }

    /// Decodes a body as XML, falling back to JSON.
    ///
    /// Returns `None` when neither format applies.
    #[must_use]
    pub fn decode_body(body: &[u8]) -> Option<Tree> {
        if body.is_empty() {
            return None;
        }
        if let Some(tree) = Self::decode_xml(body) {
            return Some(tree);
        }
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => Some(value.into()),
            Err(error) => {
                tracing::debug!("Response body is neither XML nor JSON: {error}");
                None
            }
        }
    }

    fn decode_xml(body: &[u8]) -> Option<Tree> {
        let text = std::str::from_utf8(body).ok()?;
        match xml::decode(text) {
            Ok(tree) => Some(tree),
            Err(error) => {
                tracing::debug!("Response body is not XML: {error}");
                None
            }
        }
    }

    /// Returns the API error carried by `tree`, if any.
    ///
    /// A `Message` key wins over an `error` key. A `Message` that is null or
    /// empty is not an envelope; a missing `reason` reads as `"api error"`.
    #[must_use]
    pub fn detect_error_envelope(tree: &Tree) -> Option<ApiError> {
        if let Some(message) = tree.get("Message").filter(|message| !message.is_empty()) {
            let message = message.as_str().unwrap_or_default().to_string();
            let detail = match tree.get("Code").and_then(Tree::as_str) {
                Some(code) if !code.is_empty() => format!("{code}: {message}"),
                _ => message.clone(),
            };
            return Some(ApiError { message, detail });
        }

        if let Some(error) = tree.get("error") {
            let message = error
                .get("reason")
                .map_or("api error", |reason| reason.as_str().unwrap_or_default())
                .to_string();
            return Some(ApiError {
                message,
                detail: String::new(),
            });
        }

        None
    }

    fn auth_challenge(headers: &ResponseHeaders) -> Option<String> {
        let challenge = headers.get("WWW-Authenticate")?;
        if challenge.is_empty() {
            return None;
        }
        tracing::warn!("Authentication challenge received: {challenge}");
        Some(challenge.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: &[(&str, &str)], body: &str) -> RawResponse {
        RawResponse::from_parts(
            "HTTP/1.1 200 OK",
            headers.iter().copied(),
            body.as_bytes().to_vec(),
        )
    }

    // ========================================================================
    // parse
    // ========================================================================

    #[test]
    fn test_parse_xml_body() {
        let raw = response(
            &[("Content-Type", "text/xml")],
            "<ResultSet><Result><Status>OK</Status></Result></ResultSet>",
        );

        match ResponseParser::parse(&raw) {
            ParseOutcome::Ok(tree) => assert_eq!(
                tree.pointer(&["Result", "Status"]).and_then(Tree::as_str),
                Some("OK")
            ),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_parse_json_body() {
        let raw = response(&[], r#"{"totalResultsAvailable":1,"hits":[{"code":"a_b"}]}"#);
        let tree = ResponseParser::parse(&raw).into_result().unwrap();
        assert_eq!(tree.get("totalResultsAvailable").and_then(Tree::as_u64), Some(1));
    }

    #[test]
    fn test_auth_challenge_wins_over_body() {
        let raw = response(
            &[("WWW-Authenticate", "Bearer error=\"invalid_token\"")],
            r#"{"Message":"ignored","Code":"x"}"#,
        );
        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::AuthError("Bearer error=\"invalid_token\"".to_string())
        );
    }

    #[test]
    fn test_auth_header_lookup_ignores_case() {
        let raw = response(&[("www-authenticate", "Bearer realm=\"yahoo\"")], "");
        assert!(matches!(
            ResponseParser::parse(&raw),
            ParseOutcome::AuthError(_)
        ));
    }

    #[test]
    fn test_message_envelope() {
        let raw = response(
            &[],
            "<Error><Message>Invalid SellerId</Message><Code>ed-00001</Code></Error>",
        );
        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError {
                message: "Invalid SellerId".to_string(),
                detail: "ed-00001: Invalid SellerId".to_string(),
            }
        );
    }

    #[test]
    fn test_message_envelope_without_code() {
        let raw = response(&[], r#"{"Message":"Bad request"}"#);
        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError {
                message: "Bad request".to_string(),
                detail: "Bad request".to_string(),
            }
        );
    }

    #[test]
    fn test_error_envelope() {
        let raw = response(&[], r#"{"error":{"reason":"invalid appid"}}"#);
        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError {
                message: "invalid appid".to_string(),
                detail: String::new(),
            }
        );

        let raw = response(&[], r#"{"error":{"code":400}}"#);
        assert!(matches!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError { message, .. } if message == "api error"
        ));
    }

    #[test]
    fn test_error_envelope_keeps_empty_reason() {
        let raw = response(&[], r#"{"error":{"reason":""}}"#);
        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError {
                message: String::new(),
                detail: String::new(),
            }
        );
    }

    #[test]
    fn test_null_or_empty_message_is_not_an_envelope() {
        for body in [r#"{"Message":null,"Status":"OK"}"#, r#"{"Message":"","Status":"OK"}"#] {
            match ResponseParser::parse(&response(&[], body)) {
                ParseOutcome::Ok(tree) => {
                    assert_eq!(tree.get("Status").and_then(Tree::as_str), Some("OK"));
                }
                other => panic!("unexpected outcome for {body}: {other:?}"),
            }
        }

        let raw = response(&[], r#"{"Message":null,"error":{"reason":"quota"}}"#);
        assert!(matches!(
            ResponseParser::parse(&raw),
            ParseOutcome::ApiError { message, .. } if message == "quota"
        ));
    }

    // ========================================================================
    // split
    // ========================================================================

    const SERVER_HEADER: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\n\r\n";
    const SERVER_BODY: &[u8] = b"<Root><A>1</A></Root>";

    fn server_response(header_size: usize) -> RawResponse {
        RawResponse::new([SERVER_HEADER, SERVER_BODY].concat(), header_size)
    }

    #[test]
    fn test_split_at_reported_header_size() {
        let raw = server_response(SERVER_HEADER.len());

        let (headers, body) = ResponseParser::split(&raw);
        assert_eq!(headers.status_line(), Some("HTTP/1.1 200 OK"));
        assert_eq!(headers.get("content-type"), Some("text/xml"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/xml"));
        assert_eq!(body, SERVER_BODY);

        assert_eq!(
            ResponseParser::parse(&raw),
            ParseOutcome::Ok(Tree::from_pairs([("A", "1")]))
        );
    }

    #[test]
    fn test_split_offset_boundary() {
        let short = server_response(SERVER_HEADER.len() - 1);
        let (headers, body) = ResponseParser::split(&short);
        assert_eq!(headers.get("Content-Type"), Some("text/xml"));
        assert_eq!(body, [b"\n".as_slice(), SERVER_BODY].concat().as_slice());

        let long = server_response(SERVER_HEADER.len() + 1);
        let (_, body) = ResponseParser::split(&long);
        assert_eq!(body, &SERVER_BODY[1..]);
        assert_eq!(ResponseParser::parse(&long), ParseOutcome::EmptyResponse);
    }

    #[test]
    fn test_empty_and_falsy_bodies() {
        for body in ["", "not xml or json", "{}", "[]", "0", "\"\""] {
            assert_eq!(
                ResponseParser::parse(&response(&[], body)),
                ParseOutcome::EmptyResponse,
                "body {body:?}"
            );
        }
    }

    #[test]
    fn test_into_result_maps_errors() {
        assert!(matches!(
            ParseOutcome::AuthError("x".to_string()).into_result(),
            Err(ClientError::Auth(AuthError { challenge })) if challenge == "x"
        ));
        assert!(matches!(
            ParseOutcome::EmptyResponse.into_result(),
            Err(ClientError::EmptyResponse)
        ));
    }

    // ========================================================================
    // parse_download
    // ========================================================================

    #[test]
    fn test_download_returns_file() {
        let raw = RawResponse::from_parts(
            "HTTP/1.1 200 OK",
            [("Content-Type", "image/png")],
            vec![0x89, b'P', b'N', b'G'],
        );
        let file = ResponseParser::parse_download(&raw).unwrap();
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.body, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_download_rejects_error_envelope() {
        let raw = response(
            &[],
            "<Error><Message>File not found</Message><Code>ext-404</Code></Error>",
        );
        let result = ResponseParser::parse_download(&raw);
        assert!(matches!(
            result,
            Err(ClientError::Api(ApiError { message, .. })) if message == "File not found"
        ));
    }

    #[test]
    fn test_download_keeps_json_files() {
        let raw = response(&[("Content-Type", "application/json")], r#"{"Message":"data"}"#);
        let file = ResponseParser::parse_download(&raw).unwrap();
        assert_eq!(file.body, br#"{"Message":"data"}"#.to_vec());
    }

    #[test]
    fn test_download_checks_auth_then_empty() {
        let raw = response(&[("WWW-Authenticate", "Bearer")], "");
        assert!(matches!(
            ResponseParser::parse_download(&raw),
            Err(ClientError::Auth(_))
        ));

        let raw = response(&[], "");
        assert!(matches!(
            ResponseParser::parse_download(&raw),
            Err(ClientError::EmptyResponse)
        ));
    }
}
