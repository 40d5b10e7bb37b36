/*!
# Overview
s3browse is a small command-line browser for S3 buckets.
It lists buckets, lists and searches objects under a prefix, sums their sizes, and downloads objects to a local directory.

## Features
- Listing
  Objects and common prefixes directly under a path, grouped by a delimiter (`/` by default).
  Every page returned by ListObjectsV2 is collected before the result is shown, so buckets of any size are listed completely.

- Searching
  Every object whose key starts with a path, without grouping.

- Size
  Total size of every object under a path. Sizes are scaled up to `T` automatically, or capped with `--sum`.

- Download
  A single object, or every object under a path with `--recursive`.
  The key hierarchy is mirrored below the local directory. Objects are written to a temporary file first and renamed once complete.

All network and authentication work is done by the AWS SDK for Rust.
Retry and timeout settings of the SDK can be set from the command line.

## As a library
s3browse CLI is a thin wrapper of the s3browse library.

Example usage
=============

```Toml
[dependencies]
s3browse = "0.1"
tokio = { version = "1", features = ["full"] }
```

```no_run
use s3browse::config::Config;
use s3browse::config::args::parse_from_args;
use s3browse::storage::s3::S3StorageFactory;
use s3browse::types::token::create_command_cancellation_token;
use s3browse::S3Client;

#[tokio::main]
async fn main() {
    let args = vec!["program_name", "--profile", "my-profile", "buckets"];

    let config = Config::try_from(parse_from_args(args).unwrap()).unwrap();

    let storage = S3StorageFactory::create(&config.client_config, config.max_keys).await;
    let mut client = S3Client::new(
        storage,
        config.delimiter.as_str(),
        config.local_path.clone(),
        create_command_cancellation_token(),
    );

    for bucket in client.list_buckets().await.unwrap() {
        println!("{bucket}");
    }

    client.select_bucket("my-bucket");
    let listing = client.search_by_key("logs/", None).await.unwrap();
    println!("{} objects, {} bytes", listing.contents.len(), listing.total_size());
}
```
*/

pub use client::S3Client;
pub use config::Config;
pub use config::args::CLIArgs;

pub mod client;
pub mod config;
pub mod pipeline;
pub mod presentation;
pub mod storage;
pub mod types;
