use std::collections::HashMap;
use std::path::PathBuf;

use crate::presentation::size::SizeUnit;
use crate::types::{ClientConfigLocation, S3Credentials};

pub mod args;

#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub client_config: ClientConfig,
    pub tracing_config: Option<TracingConfig>,
    pub size_unit: Option<SizeUnit>,
    pub delimiter: String,
    pub local_path: PathBuf,
    pub max_keys: i32,
    pub params: HashMap<String, String>,
}

impl Config {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|value| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Buckets,
    List { bucket: String, path: String },
    Search { bucket: String, path: String },
    Size { bucket: String, path: String },
    Download {
        bucket: String,
        path: String,
        recursive: bool,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Buckets => "buckets",
            Command::List { .. } => "list",
            Command::Search { .. } => "search",
            Command::Size { .. } => "size",
            Command::Download { .. } => "download",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_config_location: ClientConfigLocation,
    pub credential: S3Credentials,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub accelerate: bool,
    pub retry_config: RetryConfig,
    pub cli_timeout_config: CLITimeoutConfig,
    pub disable_stalled_stream_protection: bool,
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub aws_max_attempts: u32,
    pub initial_backoff_milliseconds: u64,
}

#[derive(Debug, Clone)]
pub struct CLITimeoutConfig {
    pub operation_timeout_milliseconds: Option<u64>,
    pub operation_attempt_timeout_milliseconds: Option<u64>,
    pub connect_timeout_milliseconds: Option<u64>,
    pub read_timeout_milliseconds: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub tracing_level: log::Level,
    pub json_tracing: bool,
    pub aws_sdk_tracing: bool,
    pub span_events_tracing: bool,
    pub disable_color_tracing: bool,
}
