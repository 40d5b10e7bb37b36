use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum S3browseError {
    #[error("no bucket specified. use --bucket or select a bucket.")]
    BucketNotSpecified,
    #[error("an object key references a parent directory.")]
    DirectoryTraversalError,
    #[error("cancelled")]
    Cancelled,
}

pub fn is_cancelled_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<S3browseError>(),
        Some(S3browseError::Cancelled)
    )
}
