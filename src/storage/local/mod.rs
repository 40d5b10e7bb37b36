use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::types::error::S3browseError;
use crate::types::token::CommandCancellationToken;
use crate::types::DownloadTarget;

pub mod fs_util;

const CANCELLATION_CHECK_CHUNK_SIZE: u64 = 8 * 1024 * 1024;

/// Writes downloaded objects below a local directory, mirroring the key hierarchy.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    cancellation_token: CommandCancellationToken,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>, cancellation_token: CommandCancellationToken) -> Self {
        Self {
            path: path.into(),
            cancellation_token,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn download_target(&self, key: &str) -> Result<DownloadTarget> {
        if fs_util::check_directory_traversal(key) {
            return Err(anyhow!(S3browseError::DirectoryTraversalError));
        }

        Ok(DownloadTarget {
            remote_key: key.to_string(),
            local_path: fs_util::key_to_file_path(&self.path, key),
        })
    }

    pub async fn create_directory(&self, key: &str) -> Result<bool> {
        if fs_util::check_directory_traversal(key) {
            return Err(anyhow!(S3browseError::DirectoryTraversalError));
        }

        fs_util::create_directory_hierarchy_from_key(&self.path, key).await
    }

    /// Streams `body` into a temporary file next to the destination and renames it
    /// into place once the whole body has been written. Returns the number of bytes written.
    pub async fn save_object(&self, key: &str, body: ByteStream) -> Result<u64> {
        let target = self.download_target(key)?;

        let mut temp_file = fs_util::create_temp_file_from_key(&self.path, key).await?;
        let mut file = tokio::fs::File::from_std(
            temp_file
                .as_file_mut()
                .try_clone()
                .context("std::fs::File::try_clone() failed.")?,
        );

        let mut buf_reader = BufReader::new(body.into_async_read());

        let mut written_bytes: u64 = 0;
        let mut chunked_remaining: u64 = 0;
        loop {
            let buffer = buf_reader.fill_buf().await?;
            if buffer.is_empty() {
                break;
            }

            let buffer_len = buffer.len();
            file.write_all(buffer).await?;
            buf_reader.consume(buffer_len);

            written_bytes += buffer_len as u64;

            chunked_remaining += buffer_len as u64;
            if chunked_remaining > CANCELLATION_CHECK_CHUNK_SIZE {
                chunked_remaining = 0;

                if self.cancellation_token.is_cancelled() {
                    warn!(key = key, "download cancelled.");
                    return Err(anyhow!(S3browseError::Cancelled));
                }
            }
        }

        file.flush().await?;
        drop(file);

        temp_file
            .persist(&target.local_path)
            .context("tempfile::NamedTempFile::persist() failed.")?;

        let local_path = target.local_path.to_string_lossy().to_string();
        debug!(
            key = key,
            local_path = local_path,
            size = written_bytes,
            "object saved."
        );

        Ok(written_bytes)
    }
}
