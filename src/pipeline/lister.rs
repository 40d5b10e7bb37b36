use anyhow::{Result, anyhow};
use tracing::{debug, trace};

use crate::storage::Storage;
use crate::types::error::S3browseError;
use crate::types::token::CommandCancellationToken;
use crate::types::{AggregatedListing, ListingRequest};

/// Collects every page of a listing into a single [`AggregatedListing`].
pub struct ObjectLister {
    storage: Storage,
    cancellation_token: CommandCancellationToken,
}

impl ObjectLister {
    pub fn new(storage: Storage, cancellation_token: CommandCancellationToken) -> Self {
        Self {
            storage,
            cancellation_token,
        }
    }

    /// Fetches pages one after another, passing each page's continuation token
    /// to the next request, until the backend reports no more data.
    ///
    /// Any failure aborts the listing and the pages collected so far are dropped.
    pub async fn list_all(&self, request: &ListingRequest) -> Result<AggregatedListing> {
        if request.bucket.is_empty() {
            return Err(anyhow!(S3browseError::BucketNotSpecified));
        }

        trace!(
            bucket = request.bucket.as_str(),
            prefix = request.prefix.as_str(),
            delimiter = request.effective_delimiter(),
            "listing has started."
        );

        let mut listing = AggregatedListing::default();
        let mut continuation_token = None;
        let mut page_count: u64 = 0;

        loop {
            if self.cancellation_token.is_cancelled() {
                debug!(
                    bucket = request.bucket.as_str(),
                    page_count = page_count,
                    "listing cancelled."
                );
                return Err(anyhow!(S3browseError::Cancelled));
            }

            let page = self
                .storage
                .list_objects_page(request, continuation_token.take())
                .await?;

            page_count += 1;
            continuation_token = page.continuation_token.clone();
            listing.append_page(page);

            if continuation_token.is_none() {
                break;
            }
        }

        trace!(
            bucket = request.bucket.as_str(),
            page_count = page_count,
            common_prefixes = listing.common_prefixes.len(),
            contents = listing.contents.len(),
            "listing has been completed."
        );

        Ok(listing)
    }
}
