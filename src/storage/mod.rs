use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use dyn_clone::DynClone;

use crate::types::{ListingPage, ListingRequest};

pub mod local;
pub mod s3;

pub type Storage = Box<dyn StorageTrait + Send + Sync>;

/// The calls made against the object storage backend.
///
/// Every method issues exactly one request and surfaces the backend error
/// as is. Nothing retries on this side of the SDK.
#[async_trait]
pub trait StorageTrait: DynClone {
    async fn list_objects_page(
        &self,
        request: &ListingRequest,
        continuation_token: Option<String>,
    ) -> Result<ListingPage>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream>;
    async fn list_buckets(&self) -> Result<Vec<String>>;
}

dyn_clone::clone_trait_object!(StorageTrait);
