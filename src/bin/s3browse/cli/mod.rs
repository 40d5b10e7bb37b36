use anyhow::Result;
use tokio::time::Instant;
use tracing::{error, info, trace, warn};

use s3browse::config::Command;
use s3browse::presentation::{render_listing, render_total_size};
use s3browse::storage::s3::S3StorageFactory;
use s3browse::types::error::is_cancelled_error;
use s3browse::types::token::{CommandCancellationToken, create_command_cancellation_token};
use s3browse::{Config, S3Client};

mod ctrl_c_handler;

pub async fn run(config: Config) -> Result<()> {
    let cancellation_token = create_command_cancellation_token();

    ctrl_c_handler::spawn_ctrl_c_handler(cancellation_token.clone());

    let start_time = Instant::now();
    trace!(command = config.command.name(), "command start.");

    let client = create_client(&config, cancellation_token.clone()).await;
    let result = execute(&client, &config).await;

    // stops the ctrl-c handler
    cancellation_token.cancel();

    let duration_sec = format!("{:.3}", start_time.elapsed().as_secs_f32());
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }

            trace!(
                command = config.command.name(),
                duration_sec = duration_sec,
                "command has been completed."
            );
            Ok(())
        }
        Err(e) => {
            if is_cancelled_error(&e) {
                warn!(command = config.command.name(), "command cancelled.");
            }

            error!(
                command = config.command.name(),
                duration_sec = duration_sec,
                error = format!("{e:#}"),
                "command failed."
            );
            Err(e)
        }
    }
}

async fn create_client(config: &Config, cancellation_token: CommandCancellationToken) -> S3Client {
    let storage = S3StorageFactory::create(&config.client_config, config.max_keys).await;

    S3Client::new(
        storage,
        config.delimiter.as_str(),
        config.local_path.clone(),
        cancellation_token,
    )
}

async fn execute(client: &S3Client, config: &Config) -> Result<Vec<String>> {
    match &config.command {
        Command::Buckets => client.list_buckets().await,
        Command::List { bucket, path } => {
            let listing = client.list_objects(path, Some(bucket.as_str())).await?;
            Ok(render_listing(&listing, path, config.size_unit))
        }
        Command::Search { bucket, path } => {
            let listing = client.search_by_key(path, Some(bucket.as_str())).await?;
            Ok(render_listing(&listing, path, config.size_unit))
        }
        Command::Size { bucket, path } => {
            let listing = client.search_by_key(path, Some(bucket.as_str())).await?;
            Ok(vec![render_total_size(&listing, config.size_unit)])
        }
        Command::Download {
            bucket,
            path,
            recursive,
        } => {
            let summary = client.download(path, Some(bucket.as_str()), *recursive).await?;

            info!(
                downloaded_objects = summary.downloaded_objects,
                downloaded_bytes = summary.downloaded_bytes,
                created_directories = summary.created_directories,
                "download completed."
            );
            Ok(vec![])
        }
    }
}
