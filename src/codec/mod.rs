//! Body codecs shared by the request and response paths.
//!
//! - [`xml`]: [`Tree`](crate::Tree) to and from XML documents
//! - [`form`]: [`Tree`](crate::Tree) to urlencoded query strings and form bodies

pub mod form;
pub mod xml;

pub use xml::XmlError;
