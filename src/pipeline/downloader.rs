use anyhow::{Result, anyhow};
use tracing::{debug, info, trace};

use crate::pipeline::lister::ObjectLister;
use crate::storage::Storage;
use crate::storage::local::{LocalStorage, fs_util};
use crate::types::error::S3browseError;
use crate::types::token::CommandCancellationToken;
use crate::types::{DownloadSummary, ListingRequest};

/// Fetches objects one at a time and saves them below the local base path.
pub struct ObjectDownloader {
    storage: Storage,
    local_storage: LocalStorage,
    cancellation_token: CommandCancellationToken,
}

impl ObjectDownloader {
    pub fn new(
        storage: Storage,
        local_storage: LocalStorage,
        cancellation_token: CommandCancellationToken,
    ) -> Self {
        Self {
            storage,
            local_storage,
            cancellation_token,
        }
    }

    /// Downloads `path` as a single key, or every key under it when `recursive` is set.
    ///
    /// Keys are processed in listing order and the first error stops the download.
    /// Files saved before the error stay in place.
    pub async fn download(
        &self,
        bucket: &str,
        path: &str,
        recursive: bool,
    ) -> Result<DownloadSummary> {
        if bucket.is_empty() {
            return Err(anyhow!(S3browseError::BucketNotSpecified));
        }

        let keys = if recursive {
            self.collect_keys(bucket, path).await?
        } else {
            vec![path.to_string()]
        };

        trace!(
            bucket = bucket,
            path = path,
            recursive = recursive,
            keys = keys.len(),
            "download has started."
        );

        let mut summary = DownloadSummary::default();
        for key in &keys {
            if self.cancellation_token.is_cancelled() {
                debug!(bucket = bucket, key = key, "download cancelled.");
                return Err(anyhow!(S3browseError::Cancelled));
            }

            if fs_util::is_key_a_directory(key) {
                if self.local_storage.create_directory(key).await? {
                    summary.created_directories += 1;
                }
                continue;
            }

            let target = self.local_storage.download_target(key)?;

            let body = self.storage.get_object(bucket, key).await?;
            let size = self.local_storage.save_object(key, body).await?;

            summary.downloaded_objects += 1;
            summary.downloaded_bytes += size;

            let local_path = target.local_path.to_string_lossy().to_string();
            info!(
                bucket = bucket,
                key = key,
                local_path = local_path,
                size = size,
                "object downloaded."
            );
        }

        trace!(
            bucket = bucket,
            downloaded_objects = summary.downloaded_objects,
            downloaded_bytes = summary.downloaded_bytes,
            created_directories = summary.created_directories,
            "download has been completed."
        );

        Ok(summary)
    }

    async fn collect_keys(&self, bucket: &str, path: &str) -> Result<Vec<String>> {
        let lister = ObjectLister::new(self.storage.clone(), self.cancellation_token.clone());
        let listing = lister.list_all(&ListingRequest::flat(bucket, path)).await?;

        Ok(listing.keys().map(|key| key.to_string()).collect())
    }
}
