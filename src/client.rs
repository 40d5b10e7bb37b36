use std::path::PathBuf;

use anyhow::{Result, anyhow};
use tracing::trace;

use crate::pipeline::{ObjectDownloader, ObjectLister};
use crate::storage::Storage;
use crate::storage::local::LocalStorage;
use crate::types::error::S3browseError;
use crate::types::token::CommandCancellationToken;
use crate::types::{AggregatedListing, DownloadSummary, ListingRequest};

pub const DEFAULT_DELIMITER: &str = "/";

/// Entry point of the library.
///
/// Holds the storage handle, the bucket used when an operation does not name one,
/// and the delimiter used to group keys in `list_objects`.
///
/// ```no_run
/// use s3browse::S3Client;
/// use s3browse::storage::s3::{S3StorageFactory, DEFAULT_MAX_KEYS};
/// use s3browse::types::token::create_command_cancellation_token;
/// # async fn example(client_config: s3browse::config::ClientConfig) -> anyhow::Result<()> {
/// let storage = S3StorageFactory::create(&client_config, DEFAULT_MAX_KEYS).await;
/// let mut client = S3Client::new(storage, "/", "./", create_command_cancellation_token());
///
/// client.select_bucket("my-bucket");
/// let listing = client.list_objects("logs/", None).await?;
/// println!("{} bytes", listing.total_size());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct S3Client {
    storage: Storage,
    selected_bucket: Option<String>,
    delimiter: String,
    local_path: PathBuf,
    cancellation_token: CommandCancellationToken,
}

impl S3Client {
    pub fn new(
        storage: Storage,
        delimiter: impl Into<String>,
        local_path: impl Into<PathBuf>,
        cancellation_token: CommandCancellationToken,
    ) -> Self {
        Self {
            storage,
            selected_bucket: None,
            delimiter: delimiter.into(),
            local_path: local_path.into(),
            cancellation_token,
        }
    }

    pub fn select_bucket(&mut self, bucket: &str) {
        trace!(bucket = bucket, "bucket selected.");
        self.selected_bucket = Some(bucket.to_string());
    }

    pub fn selected_bucket(&self) -> Option<&str> {
        self.selected_bucket.as_deref()
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// An explicit, non-empty bucket wins over the selected one.
    pub fn resolve_bucket(&self, bucket: Option<&str>) -> Result<String> {
        bucket
            .filter(|bucket| !bucket.is_empty())
            .or(self.selected_bucket())
            .filter(|bucket| !bucket.is_empty())
            .map(|bucket| bucket.to_string())
            .ok_or_else(|| anyhow!(S3browseError::BucketNotSpecified))
    }

    pub async fn list_buckets(&self) -> Result<Vec<String>> {
        self.storage.list_buckets().await
    }

    /// Lists `path` grouped by the delimiter.
    pub async fn list_objects(&self, path: &str, bucket: Option<&str>) -> Result<AggregatedListing> {
        let bucket = self.resolve_bucket(bucket)?;
        self.lister()
            .list_all(&ListingRequest::grouped(&bucket, path, &self.delimiter))
            .await
    }

    /// Lists every key starting with `path`, without grouping.
    pub async fn search_by_key(
        &self,
        path: &str,
        bucket: Option<&str>,
    ) -> Result<AggregatedListing> {
        let bucket = self.resolve_bucket(bucket)?;
        self.lister()
            .list_all(&ListingRequest::flat(&bucket, path))
            .await
    }

    pub async fn download(
        &self,
        path: &str,
        bucket: Option<&str>,
        recursive: bool,
    ) -> Result<DownloadSummary> {
        let bucket = self.resolve_bucket(bucket)?;
        let downloader = ObjectDownloader::new(
            self.storage.clone(),
            LocalStorage::new(&self.local_path, self.cancellation_token.clone()),
            self.cancellation_token.clone(),
        );

        downloader.download(&bucket, path, recursive).await
    }

    fn lister(&self) -> ObjectLister {
        ObjectLister::new(self.storage.clone(), self.cancellation_token.clone())
    }
}
