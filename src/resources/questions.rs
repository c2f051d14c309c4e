//! Customer question threads ("talks") and their attachments.
//!
//! Thread-scoped calls put `topicId` in the URL rather than in the body.

use crate::clients::{
    ClientError, DownloadedFile, FileUpload, HttpClient, HttpMethod, HttpRequest,
    ValidationError,
};
use crate::resources::{circus_endpoint, required, Endpoint, StoreEndpoint};
use crate::tree::Tree;

const TOPIC_KEY: &str = "topicId";

async fn get(client: &HttpClient, url: &str, params: Tree) -> Result<Tree, ClientError> {
    let request = HttpRequest::builder(HttpMethod::Get, url)
        .payload(params)
        .build()?;
    client.request(request).await
}

/// Validates `topicId` and the seller, moves `topicId` into the URL, and
/// sends the remaining parameters as JSON.
async fn send_to_topic<E: StoreEndpoint>(
    client: &HttpClient,
    method: HttpMethod,
    mut params: Tree,
) -> Result<Tree, ClientError> {
    let topic_id = required(&params, TOPIC_KEY)?;
    let url = E::url(&params)?;
    params.remove(TOPIC_KEY);

    let url = format!("{url}?{TOPIC_KEY}={}", urlencoding::encode(&topic_id));
    let request = HttpRequest::builder(method, url).payload(params).build()?;
    client.request(request).await
}

/// Lists question threads.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkList;

impl StoreEndpoint for ExternalTalkList {
    const NAME: &'static str = "externalTalkList";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkList");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkList {
    /// Returns the full response tree, including paging fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `sellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        get(client, url, params).await
    }
}

/// Reads the messages of one thread.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkDetail;

impl StoreEndpoint for ExternalTalkDetail {
    const NAME: &'static str = "externalTalkDetail";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkDetail");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkDetail {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `sellerId` is missing or the call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        let url = Self::url(&params)?;
        get(client, url, params).await
    }
}

/// Posts a reply to a thread.
///
/// ```rust,ignore
/// use yahoo_shopping_api::resources::ExternalTalkAdd;
/// use yahoo_shopping_api::Tree;
///
/// ExternalTalkAdd::request(&client, Tree::from_pairs([
///     ("sellerId", "snbx-store"),
///     ("topicId", "t-123"),
///     ("body", "Thank you for your question."),
/// ])).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkAdd;

impl StoreEndpoint for ExternalTalkAdd {
    const NAME: &'static str = "externalTalkAdd";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkAdd");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkAdd {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `topicId` or `sellerId` is missing or the
    /// call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        send_to_topic::<Self>(client, HttpMethod::Post, params).await
    }
}

/// Marks a thread as read.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkRead;

impl StoreEndpoint for ExternalTalkRead {
    const NAME: &'static str = "externalTalkRead";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkRead");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkRead {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `topicId` or `sellerId` is missing or the
    /// call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        send_to_topic::<Self>(client, HttpMethod::Put, params).await
    }
}

/// Hides a thread from the public question list.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkPrivate;

impl StoreEndpoint for ExternalTalkPrivate {
    const NAME: &'static str = "externalTalkPrivate";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkPrivate");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkPrivate {
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `topicId` or `sellerId` is missing or the
    /// call fails.
    pub async fn request(client: &HttpClient, params: Tree) -> Result<Tree, ClientError> {
        send_to_topic::<Self>(client, HttpMethod::Put, params).await
    }
}

/// Attaches a file to a thread.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkFileAdd;

impl StoreEndpoint for ExternalTalkFileAdd {
    const NAME: &'static str = "externalTalkFileAdd";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkFileAdd");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkFileAdd {
    /// Uploads `file` as the `file` part of a multipart body. Both
    /// identifiers travel in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingParameter`] if `topicId`, `sellerId`
    /// or the file is missing, and any other [`ClientError`] if the call
    /// fails.
    pub async fn request(
        client: &HttpClient,
        params: Tree,
        file: Option<FileUpload>,
    ) -> Result<Tree, ClientError> {
        let topic_id = required(&params, TOPIC_KEY)?;
        let seller = Self::seller_id(&params)?;
        let mut file = file.ok_or(ValidationError::MissingParameter { name: "file" })?;
        file.field = "file".to_string();

        let url = format!(
            "{}?{TOPIC_KEY}={}&{}={}",
            Self::ENDPOINT.url_for(&seller),
            urlencoding::encode(&topic_id),
            Self::SELLER_KEY,
            urlencoding::encode(seller.as_ref()),
        );
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .multipart(Tree::empty_map(), vec![file])
            .build()?;
        client.request(request).await
    }
}

/// Downloads a thread attachment.
#[derive(Clone, Copy, Debug)]
pub struct ExternalTalkFileDownload;

impl StoreEndpoint for ExternalTalkFileDownload {
    const NAME: &'static str = "externalTalkFileDownload";
    const ENDPOINT: Endpoint = circus_endpoint!("externalTalkFileDownload");
    const SELLER_KEY: &'static str = "sellerId";
}

impl ExternalTalkFileDownload {
    /// Returns the file bytes and their content type.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if `sellerId` is missing, the call fails, the
    /// body is empty, or the server answers with an XML error envelope.
    pub async fn request(
        client: &HttpClient,
        params: Tree,
    ) -> Result<DownloadedFile, ClientError> {
        let url = Self::url(&params)?;
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .payload(params)
            .build()?;
        client.download(request).await
    }
}
