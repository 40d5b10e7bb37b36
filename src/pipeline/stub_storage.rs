use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::storage::{Storage, StorageTrait};
use crate::types::{ListingPage, ListingRequest, ObjectSummary};

const TOKEN_PREFIX: &str = "token-";

/// In-memory storage serving a fixed sequence of pages.
/// Page `i` is returned for token `token-i` (page 0 for no token).
#[derive(Clone, Default)]
pub struct StubStorage {
    pages: Arc<Vec<ListingPage>>,
    objects: Arc<HashMap<String, Vec<u8>>>,
    buckets: Arc<Vec<String>>,
    fail_on_page: Option<usize>,
    received_tokens: Arc<Mutex<Vec<Option<String>>>>,
    received_requests: Arc<Mutex<Vec<ListingRequest>>>,
    fetched_keys: Arc<Mutex<Vec<String>>>,
}

impl StubStorage {
    pub fn with_pages(pages: Vec<(Vec<&str>, Vec<(&str, u64)>)>) -> Self {
        let page_count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, (common_prefixes, contents))| ListingPage {
                common_prefixes: common_prefixes.iter().map(|p| p.to_string()).collect(),
                contents: contents
                    .iter()
                    .map(|(key, size)| ObjectSummary::new(*key, *size))
                    .collect(),
                continuation_token: if index + 1 < page_count {
                    Some(format!("{TOKEN_PREFIX}{}", index + 1))
                } else {
                    None
                },
            })
            .collect();

        Self {
            pages: Arc::new(pages),
            ..Default::default()
        }
    }

    pub fn with_objects(mut self, objects: Vec<(&str, &str)>) -> Self {
        self.objects = Arc::new(
            objects
                .into_iter()
                .map(|(key, body)| (key.to_string(), body.as_bytes().to_vec()))
                .collect(),
        );
        self
    }

    pub fn with_buckets(mut self, buckets: Vec<&str>) -> Self {
        self.buckets = Arc::new(buckets.into_iter().map(|b| b.to_string()).collect());
        self
    }

    pub fn fail_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    pub fn boxed(&self) -> Storage {
        Box::new(self.clone())
    }

    pub fn received_tokens(&self) -> Vec<Option<String>> {
        self.received_tokens.lock().unwrap().clone()
    }

    pub fn received_requests(&self) -> Vec<ListingRequest> {
        self.received_requests.lock().unwrap().clone()
    }

    pub fn fetched_keys(&self) -> Vec<String> {
        self.fetched_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageTrait for StubStorage {
    async fn list_objects_page(
        &self,
        request: &ListingRequest,
        continuation_token: Option<String>,
    ) -> Result<ListingPage> {
        self.received_requests.lock().unwrap().push(request.clone());
        self.received_tokens
            .lock()
            .unwrap()
            .push(continuation_token.clone());

        let index = match continuation_token {
            None => 0,
            Some(token) => token
                .strip_prefix(TOKEN_PREFIX)
                .and_then(|index| index.parse::<usize>().ok())
                .ok_or_else(|| anyhow!("invalid continuation token: {token}"))?,
        };

        if self.fail_on_page == Some(index) {
            return Err(anyhow!("list_objects_v2() failed on page {index}."));
        }

        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn get_object(&self, _bucket: &str, key: &str) -> Result<ByteStream> {
        self.fetched_keys.lock().unwrap().push(key.to_string());

        self.objects
            .get(key)
            .map(|body| ByteStream::from(body.clone()))
            .ok_or_else(|| anyhow!("NoSuchKey: {key}"))
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self.buckets.to_vec())
    }
}
