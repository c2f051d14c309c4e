//! Encodes request payloads according to their [`BodyEncoding`].

use reqwest::multipart::{Form, Part};

use crate::clients::errors::ValidationError;
use crate::clients::http_request::{BodyEncoding, FileUpload, Payload};
use crate::codec::form;
use crate::tree::Tree;

/// A request body ready for the transport.
#[derive(Debug)]
pub enum EncodedBody {
    /// Nothing to send.
    Empty,
    /// A urlencoded, JSON, or pre-encoded text body.
    Text(String),
    /// A multipart form; the transport adds the boundary.
    Multipart(Form),
}

impl EncodedBody {
    /// Returns the text of a text body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if there is nothing to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Turns a [`Payload`] into an [`EncodedBody`].
///
/// | encoding  | tree                 | text                 |
/// |-----------|----------------------|----------------------|
/// | form      | urlencoded pairs     | sent verbatim        |
/// | json      | JSON document        | JSON string literal  |
/// | multipart | scalar fields        | rejected             |
///
/// Empty payloads, empty trees, and empty text never produce a body.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentNegotiator;

impl ContentNegotiator {
    /// Encodes `payload` for `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompatiblePayload`] for text in multipart
    /// mode or multipart content in another mode, and
    /// [`ValidationError::InvalidMimeType`] for a file part with an
    /// unparseable MIME type.
    pub fn encode(encoding: BodyEncoding, payload: &Payload) -> Result<EncodedBody, ValidationError> {
        match (payload, encoding) {
            (Payload::Empty, _) => Ok(EncodedBody::Empty),
            (Payload::Tree(tree), _) if tree.is_empty() => Ok(EncodedBody::Empty),
            (Payload::Text(text), _) if text.is_empty() => Ok(EncodedBody::Empty),

            (Payload::Tree(tree), BodyEncoding::Form) => Ok(EncodedBody::Text(form::encode(tree))),
            (Payload::Text(text), BodyEncoding::Form) => Ok(EncodedBody::Text(text.clone())),

            (Payload::Tree(tree), BodyEncoding::Json) => Ok(EncodedBody::Text(json_text(tree))),
            (Payload::Text(text), BodyEncoding::Json) => Ok(EncodedBody::Text(json_text(text))),

            (Payload::Tree(fields), BodyEncoding::Multipart) => multipart(fields, &[]),
            (Payload::Multipart { fields, files }, BodyEncoding::Multipart) => {
                multipart(fields, files)
            }

            (Payload::Text(_), BodyEncoding::Multipart) => Err(incompatible("text", encoding)),
            (Payload::Multipart { .. }, _) => Err(incompatible("multipart", encoding)),
        }
    }
}

fn json_text<T: serde::Serialize + ?Sized>(value: &T) -> String {
    // Trees and strings always serialize
    serde_json::to_string(value).unwrap_or_default()
}

const fn incompatible(payload: &'static str, encoding: BodyEncoding) -> ValidationError {
    ValidationError::IncompatiblePayload {
        payload,
        method: "POST/PUT",
        encoding: encoding.name(),
    }
}

fn multipart(fields: &Tree, files: &[FileUpload]) -> Result<EncodedBody, ValidationError> {
    let pairs = form::pairs(fields);
    if pairs.is_empty() && files.is_empty() {
        return Ok(EncodedBody::Empty);
    }

    let mut body = Form::new();
    for (name, value) in pairs {
        body = body.text(name, value);
    }
    for file in files {
        let part = Part::bytes(file.content.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|_| ValidationError::InvalidMimeType {
                mime: file.mime_type.clone(),
            })?;
        body = body.part(file.field.clone(), part);
    }

    Ok(EncodedBody::Multipart(body))
}
