use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::storage::{Storage, StorageTrait};
use crate::types::{ListingPage, ListingRequest};

mod client_builder;

pub const DEFAULT_MAX_KEYS: i32 = 1000;

pub struct S3StorageFactory {}

impl S3StorageFactory {
    pub async fn create(client_config: &ClientConfig, max_keys: i32) -> Storage {
        S3Storage::boxed_new(Arc::new(client_config.create_client().await), max_keys)
    }
}

#[derive(Clone)]
pub struct S3Storage {
    client: Arc<Client>,
    max_keys: i32,
}

impl S3Storage {
    pub fn boxed_new(client: Arc<Client>, max_keys: i32) -> Storage {
        Box::new(S3Storage { client, max_keys })
    }
}

#[async_trait]
impl StorageTrait for S3Storage {
    async fn list_objects_page(
        &self,
        request: &ListingRequest,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        let list_objects_output = self
            .client
            .list_objects_v2()
            .bucket(&request.bucket)
            .prefix(&request.prefix)
            .set_delimiter(request.effective_delimiter().map(|d| d.to_string()))
            .set_continuation_token(continuation_token)
            .max_keys(self.max_keys)
            .send()
            .await
            .context("aws_sdk_s3::client::list_objects_v2() failed.")?;

        let next_continuation_token = if list_objects_output.is_truncated().unwrap_or(false) {
            list_objects_output
                .next_continuation_token()
                .map(|token| token.to_string())
        } else {
            None
        };

        let page = ListingPage::from_sdk(
            list_objects_output.common_prefixes(),
            list_objects_output.contents(),
            next_continuation_token,
        );

        debug!(
            bucket = request.bucket.as_str(),
            prefix = request.prefix.as_str(),
            common_prefixes = page.common_prefixes.len(),
            contents = page.contents.len(),
            truncated = page.has_more(),
            "list_objects_v2() page received."
        );

        Ok(page)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream> {
        let get_object_output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context("aws_sdk_s3::client::get_object() failed.")?;

        trace!(
            bucket = bucket,
            key = key,
            content_length = ?get_object_output.content_length(),
            "get_object() succeeded."
        );

        Ok(get_object_output.body)
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        let list_buckets_output = self
            .client
            .list_buckets()
            .send()
            .await
            .context("aws_sdk_s3::client::list_buckets() failed.")?;

        Ok(list_buckets_output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(|name| name.to_string()))
            .collect())
    }
}
