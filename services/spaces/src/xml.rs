//! XML documents returned by S3-compatible endpoints.

use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;

/// XmlDocument is a response body with a known root element.
pub trait XmlDocument: DeserializeOwned {
    /// Local name of the root element.
    const ROOT: &'static str;
}

/// Parse `body` as the document `T`.
///
/// The root element must be `T::ROOT`: a well-formed body of another
/// document type, an HTML page or plain text is an error, never an empty
/// document.
pub fn from_document<T: XmlDocument>(body: &str) -> Result<T, DeError> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader
            .read_event()
            .map_err(|e| DeError::custom(format!("invalid xml: {e}")))?
        {
            Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_) => continue,
            Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
            Event::Start(e) | Event::Empty(e) => {
                let root = e.local_name();
                if root.as_ref() == T::ROOT.as_bytes() {
                    break;
                }
                return Err(DeError::custom(format!(
                    "expected root element <{}>, found <{}>",
                    T::ROOT,
                    String::from_utf8_lossy(root.as_ref())
                )));
            }
            _ => {
                return Err(DeError::custom(format!(
                    "expected root element <{}>, found no element",
                    T::ROOT
                )))
            }
        }
    }

    quick_xml::de::from_str(body)
}

/// Response of `GET /` listing every bucket of the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListAllMyBucketsResult {
    /// Owner of the buckets.
    #[serde(default)]
    pub owner: Owner,
    /// Buckets of the account.
    pub buckets: Buckets,
}

impl XmlDocument for ListAllMyBucketsResult {
    const ROOT: &'static str = "ListAllMyBucketsResult";
}

/// Wrapper element around repeated `<Bucket>`.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Buckets {
    /// Every bucket.
    #[serde(default)]
    pub bucket: Vec<Bucket>,
}

/// A single bucket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bucket {
    /// Bucket name.
    pub name: String,
    /// Creation time as sent by the server.
    #[serde(default)]
    pub creation_date: String,
}

/// Owner of a bucket or object.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Owner {
    /// Account id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// Response of `GET /<bucket>` listing objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListBucketResult {
    /// Bucket name.
    pub name: String,
    /// Prefix the listing was restricted to.
    #[serde(default)]
    pub prefix: String,
    /// Maximum number of keys requested.
    #[serde(default)]
    pub max_keys: u32,
    /// Whether more keys remain.
    pub is_truncated: bool,
    /// Objects in this page.
    #[serde(default)]
    pub contents: Vec<Object>,
    /// Grouped prefixes when a delimiter was given.
    #[serde(default)]
    pub common_prefixes: Vec<CommonPrefix>,
}

impl XmlDocument for ListBucketResult {
    const ROOT: &'static str = "ListBucketResult";
}

/// A single object in a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Object {
    /// Object key.
    pub key: String,
    /// Last modification time as sent by the server.
    #[serde(default)]
    pub last_modified: String,
    /// Entity tag, quotes included.
    #[serde(default, rename = "ETag")]
    pub etag: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Storage class.
    #[serde(default)]
    pub storage_class: String,
}

/// A prefix shared by several keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonPrefix {
    /// The prefix.
    pub prefix: String,
}

/// Error document sent with non-success responses.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: String,
}

impl XmlDocument for ErrorResponse {
    const ROOT: &'static str = "Error";
}
