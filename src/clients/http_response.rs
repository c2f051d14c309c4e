//! Raw HTTP responses and their parsed headers.
//!
//! The transport hands back the exchange as one byte buffer (header block
//! followed by body) together with the offset where the header block ends.
//! [`ResponseParser`](crate::clients::ResponseParser) splits the buffer at
//! that offset and never rescans for the separator.

/// The raw bytes of one HTTP exchange.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::clients::RawResponse;
///
/// let raw = RawResponse::from_parts(
///     "HTTP/1.1 200 OK",
///     [("Content-Type", "text/xml")],
///     b"<Result/>".to_vec(),
/// );
///
/// assert_eq!(raw.header_block(), b"HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\n\r\n");
/// assert_eq!(raw.body(), b"<Result/>");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    raw: Vec<u8>,
    header_size: usize,
}

impl RawResponse {
    /// Wraps an already assembled buffer whose first `header_size` bytes are
    /// the header block. An offset past the end is clamped to the buffer
    /// length.
    #[must_use]
    pub fn new(raw: Vec<u8>, header_size: usize) -> Self {
        let header_size = header_size.min(raw.len());
        Self { raw, header_size }
    }

    /// Assembles `status line CRLF (name: value CRLF)* CRLF body`, recording
    /// the header block length as it is written.
    pub fn from_parts<I, K, V>(status_line: &str, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = Vec::with_capacity(body.len() + 256);
        raw.extend_from_slice(status_line.as_bytes());
        raw.extend_from_slice(b"\r\n");
        for (name, value) in headers {
            raw.extend_from_slice(name.as_ref().as_bytes());
            raw.extend_from_slice(b": ");
            raw.extend_from_slice(value.as_ref().as_bytes());
            raw.extend_from_slice(b"\r\n");
        }
        raw.extend_from_slice(b"\r\n");

        let header_size = raw.len();
        raw.extend_from_slice(&body);
        Self { raw, header_size }
    }

    /// Returns the header block, including its terminating blank line.
    #[must_use]
    pub fn header_block(&self) -> &[u8] {
        &self.raw[..self.header_size]
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.raw[self.header_size..]
    }

    /// Returns the offset separating header block and body.
    #[must_use]
    pub const fn header_size(&self) -> usize {
        self.header_size
    }

    /// Returns the whole buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

/// Response header fields with the status line kept apart.
///
/// Names keep the case they were received with; [`get`](Self::get) matches
/// them case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    status_line: Option<String>,
    fields: Vec<(String, String)>,
}

impl ResponseHeaders {
    /// Parses a header block.
    ///
    /// The first line starting with `HTTP/` is the status line. Every other
    /// non-blank line is split once on `": "`; lines without that separator
    /// are ignored. A name repeated with the same case replaces the earlier
    /// value.
    ///
    /// ```rust
    /// use yahoo_shopping_api::clients::ResponseHeaders;
    ///
    /// let headers = ResponseHeaders::parse(
    ///     "HTTP/1.1 401 Unauthorized\r\nWWW-Authenticate: Bearer error=\"invalid_token\"\r\n\r\n",
    /// );
    /// assert_eq!(headers.status_code(), Some(401));
    /// assert_eq!(headers.get("www-authenticate"), Some("Bearer error=\"invalid_token\""));
    /// ```
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let mut headers = Self::default();

        for line in block.trim_end_matches(['\r', '\n']).split("\r\n") {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if headers.status_line.is_none() && line.starts_with("HTTP/") {
                headers.status_line = Some(line.to_string());
                continue;
            }
            if let Some((name, value)) = line.split_once(": ") {
                headers.set(name, value);
            }
        }

        headers
    }

    fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns the status line, if one was present.
    #[must_use]
    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    /// Returns the numeric status from the status line.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_line
            .as_deref()?
            .split_whitespace()
            .nth(1)?
            .parse()
            .ok()
    }

    /// Looks a field up by name, ignoring case. The first match wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Number of named fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no named fields were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in received order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
