#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use once_cell::sync::Lazy;
use tokio::sync::Semaphore;
use uuid::Uuid;

use s3browse::storage::{Storage, StorageTrait};
use s3browse::types::{ListingPage, ListingRequest, ObjectSummary};

#[cfg(feature = "e2e_test")]
use aws_config::meta::region::{ProvideRegion, RegionProviderChain};
#[cfg(feature = "e2e_test")]
use aws_config::{BehaviorVersion, ConfigLoader};
#[cfg(feature = "e2e_test")]
use aws_sdk_s3::client::Client;
#[cfg(feature = "e2e_test")]
use aws_sdk_s3::config::Builder;
#[cfg(feature = "e2e_test")]
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
#[cfg(feature = "e2e_test")]
use aws_types::SdkConfig;

pub const REGION: &str = "ap-northeast-1";
pub const PROFILE_NAME: &str = "s3browse-e2e-test";

pub static BUCKET1: Lazy<String> = Lazy::new(|| format!("s3browse-bucket1-{}", Uuid::new_v4()));

pub static SEMAPHORE: Lazy<Arc<Semaphore>> = Lazy::new(|| Arc::new(Semaphore::new(1)));

const TOKEN_PREFIX: &str = "page-";

/// Serves the objects of a single bucket from memory, `page_size` keys per page,
/// applying prefix and delimiter the way ListObjectsV2 does.
#[derive(Clone)]
pub struct InMemoryStorage {
    bucket: String,
    objects: Arc<Vec<(String, Vec<u8>)>>,
    page_size: usize,
    list_requests: Arc<Mutex<u64>>,
}

impl InMemoryStorage {
    pub fn new(bucket: &str, objects: &[(&str, &str)], page_size: usize) -> Self {
        let mut objects: Vec<(String, Vec<u8>)> = objects
            .iter()
            .map(|(key, body)| (key.to_string(), body.as_bytes().to_vec()))
            .collect();
        objects.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            bucket: bucket.to_string(),
            objects: Arc::new(objects),
            page_size,
            list_requests: Arc::new(Mutex::new(0)),
        }
    }

    pub fn boxed(&self) -> Storage {
        Box::new(self.clone())
    }

    pub fn list_requests(&self) -> u64 {
        *self.list_requests.lock().unwrap()
    }

    fn check_bucket(&self, bucket: &str) -> Result<()> {
        if bucket != self.bucket {
            return Err(anyhow!("NoSuchBucket: {bucket}"));
        }
        Ok(())
    }

    // common prefixes and objects for a request, in key order
    fn entries(&self, request: &ListingRequest) -> Vec<(String, Option<u64>)> {
        let mut entries: Vec<(String, Option<u64>)> = vec![];

        for (key, body) in self.objects.iter() {
            let Some(rest) = key.strip_prefix(request.prefix.as_str()) else {
                continue;
            };

            let common_prefix = request.effective_delimiter().and_then(|delimiter| {
                rest.find(delimiter).map(|index| {
                    format!("{}{}", request.prefix, &rest[..index + delimiter.len()])
                })
            });

            match common_prefix {
                Some(common_prefix) => {
                    if entries.last().map(|(name, _)| name) != Some(&common_prefix) {
                        entries.push((common_prefix, None));
                    }
                }
                None => entries.push((key.clone(), Some(body.len() as u64))),
            }
        }

        entries
    }
}

#[async_trait]
impl StorageTrait for InMemoryStorage {
    async fn list_objects_page(
        &self,
        request: &ListingRequest,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        self.check_bucket(&request.bucket)?;
        *self.list_requests.lock().unwrap() += 1;

        let start = match continuation_token {
            None => 0,
            Some(token) => token
                .strip_prefix(TOKEN_PREFIX)
                .and_then(|start| start.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("invalid continuation token"))?,
        };

        let entries = self.entries(request);
        let end = (start + self.page_size).min(entries.len());

        let mut page = ListingPage::default();
        for (name, size) in &entries[start.min(end)..end] {
            match size {
                Some(size) => page.contents.push(ObjectSummary::new(name.as_str(), *size)),
                None => page.common_prefixes.push(name.clone()),
            }
        }
        if end < entries.len() {
            page.continuation_token = Some(format!("{TOKEN_PREFIX}{end}"));
        }

        Ok(page)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream> {
        self.check_bucket(bucket)?;

        self.objects
            .iter()
            .find(|(object_key, _)| object_key == key)
            .map(|(_, body)| ByteStream::from(body.clone()))
            .ok_or_else(|| anyhow!("NoSuchKey: {key}"))
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(vec![self.bucket.clone()])
    }
}

pub struct TestHelper {
    #[cfg(feature = "e2e_test")]
    client: Client,
}

impl TestHelper {
    pub fn init_dummy_tracing_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dummy=trace")
            .try_init();
    }

    pub fn read_files(base: &std::path::Path) -> HashMap<String, Vec<u8>> {
        let mut files = HashMap::new();
        Self::collect_files(base, base, &mut files);
        files
    }

    fn collect_files(
        base: &std::path::Path,
        dir: &std::path::Path,
        files: &mut HashMap<String, Vec<u8>>,
    ) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                Self::collect_files(base, &path, files);
            } else {
                let relative = path
                    .strip_prefix(base)
                    .unwrap()
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join("/");
                files.insert(relative, std::fs::read(&path).unwrap());
            }
        }
    }
}

#[cfg(feature = "e2e_test")]
impl TestHelper {
    pub async fn new() -> Self {
        Self {
            client: Self::create_client().await,
        }
    }

    pub async fn create_client() -> Client {
        Client::from_conf(Builder::from(&Self::load_sdk_config().await).build())
    }

    async fn load_sdk_config() -> SdkConfig {
        let config_loader =
            Self::load_config_credential(aws_config::defaults(BehaviorVersion::latest()))
                .region(Self::build_provider_region());

        config_loader.load().await
    }

    fn load_config_credential(config_loader: ConfigLoader) -> ConfigLoader {
        let builder = aws_config::profile::ProfileFileCredentialsProvider::builder();

        config_loader.credentials_provider(builder.profile_name(PROFILE_NAME).build())
    }

    fn build_provider_region() -> Box<dyn ProvideRegion> {
        let mut builder = aws_config::profile::ProfileFileRegionProvider::builder();

        builder = builder.profile_name(PROFILE_NAME);

        let provider_region = RegionProviderChain::first_try(builder.build());
        Box::new(provider_region)
    }

    pub async fn create_bucket(&self, bucket: &str, region: &str) {
        let constraint = BucketLocationConstraint::from(region);
        let cfg = CreateBucketConfiguration::builder()
            .location_constraint(constraint)
            .build();

        self.client
            .create_bucket()
            .create_bucket_configuration(cfg)
            .bucket(bucket)
            .send()
            .await
            .unwrap();
    }

    pub async fn put_object(&self, bucket: &str, key: &str, body: &str) {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .unwrap();
    }

    pub async fn delete_bucket_with_cascade(&self, bucket: &str) {
        let list_objects_output_result = self.client.list_objects_v2().bucket(bucket).send().await;

        let Ok(list_objects_output) = list_objects_output_result else {
            return;
        };

        for object in list_objects_output.contents() {
            self.client
                .delete_object()
                .bucket(bucket)
                .key(object.key().unwrap())
                .send()
                .await
                .unwrap();
        }

        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .unwrap();
    }
}
