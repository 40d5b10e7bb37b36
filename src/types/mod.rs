use std::fmt;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use aws_sdk_s3::types::{CommonPrefix, Object};
use zeroize_derive::{Zeroize, ZeroizeOnDrop};

pub mod error;
pub mod token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

impl From<&Object> for ObjectSummary {
    fn from(object: &Object) -> Self {
        ObjectSummary {
            key: object.key().unwrap_or_default().to_string(),
            size: object.size().unwrap_or_default().max(0) as u64,
        }
    }
}

/// Parameters of a single ListObjectsV2 request.
/// A `None` or empty delimiter lists every key under the prefix without grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
}

impl ListingRequest {
    pub fn grouped(bucket: &str, prefix: &str, delimiter: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            delimiter: Some(delimiter.to_string()),
        }
    }

    pub fn flat(bucket: &str, prefix: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            delimiter: None,
        }
    }

    pub fn effective_delimiter(&self) -> Option<&str> {
        self.delimiter
            .as_deref()
            .filter(|delimiter| !delimiter.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub common_prefixes: Vec<String>,
    pub contents: Vec<ObjectSummary>,
    pub continuation_token: Option<String>,
}

impl ListingPage {
    pub fn from_sdk(
        common_prefixes: &[CommonPrefix],
        contents: &[Object],
        continuation_token: Option<String>,
    ) -> Self {
        ListingPage {
            common_prefixes: common_prefixes
                .iter()
                .filter_map(|common_prefix| common_prefix.prefix().map(|prefix| prefix.to_string()))
                .collect(),
            contents: contents.iter().map(ObjectSummary::from).collect(),
            continuation_token,
        }
    }

    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedListing {
    pub common_prefixes: Vec<String>,
    pub contents: Vec<ObjectSummary>,
}

impl AggregatedListing {
    pub fn append_page(&mut self, page: ListingPage) {
        self.common_prefixes.extend(page.common_prefixes);
        self.contents.extend(page.contents);
    }

    pub fn total_size(&self) -> u64 {
        self.contents.iter().map(|object| object.size).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|object| object.key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.common_prefixes.is_empty() && self.contents.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub remote_key: String,
    pub local_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded_objects: u64,
    pub downloaded_bytes: u64,
    pub created_directories: u64,
}

#[derive(Debug, Clone)]
pub struct ClientConfigLocation {
    pub aws_config_file: Option<PathBuf>,
    pub aws_shared_credentials_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum S3Credentials {
    Profile(String),
    Credentials { access_keys: AccessKeys },
    FromEnvironment,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessKeys {
    pub access_key: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Debug for AccessKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = f.debug_struct("AccessKeys");
        let session_token = self
            .session_token
            .as_ref()
            .map_or("None", |_| "** redacted **");
        keys.field("access_key", &self.access_key)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &session_token);
        keys.finish()
    }
}
