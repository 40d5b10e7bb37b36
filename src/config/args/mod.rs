use crate::config::args::value_parser::{key_value, size_unit, url};
use crate::config::{CLITimeoutConfig, ClientConfig, Command, RetryConfig, TracingConfig};
use crate::presentation::size::SizeUnit;
use crate::storage::s3::DEFAULT_MAX_KEYS;
use crate::types::{AccessKeys, ClientConfigLocation, S3Credentials};
use crate::Config;
use crate::client::DEFAULT_DELIMITER;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
#[cfg(feature = "version")]
use shadow_rs::shadow;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

mod tests;
mod value_parser;

const DEFAULT_AWS_MAX_ATTEMPTS: u32 = 10;
const DEFAULT_INITIAL_BACKOFF_MILLISECONDS: u64 = 100;
const DEFAULT_JSON_TRACING: bool = false;
const DEFAULT_AWS_SDK_TRACING: bool = false;
const DEFAULT_SPAN_EVENTS_TRACING: bool = false;
const DEFAULT_DISABLE_COLOR_TRACING: bool = false;
const DEFAULT_FORCE_PATH_STYLE: bool = false;
const DEFAULT_ACCELERATE: bool = false;
const DEFAULT_DISABLE_STALLED_STREAM_PROTECTION: bool = false;
const DEFAULT_LOCAL_PATH: &str = "./";
const DEFAULT_RECURSIVE: bool = false;

const NO_COMMAND_SPECIFIED: &str = "Please specify a valid command.\n";
const LOCAL_PATH_NOT_DIRECTORY: &str = "--local-path must be a directory\n";

#[cfg(feature = "version")]
shadow!(build);

#[derive(Parser, Clone, Debug)]
#[cfg_attr(feature = "version", command(version=format!("{} ({} {}), {}", build::PKG_VERSION, build::SHORT_COMMIT, build::BUILD_TARGET, build::RUST_VERSION)))]
pub struct CLIArgs {
    #[command(subcommand)]
    command: Option<CLICommand>,

    /// largest unit used to display sizes. Sizes scale up to T when omitted.
    /// valid choices: B | K | M | G | T
    #[arg(long, env, global = true, value_name = "UNIT", value_parser = size_unit::parse_size_unit, help_heading = "General")]
    sum: Option<SizeUnit>,

    /// an arbitrary parameter passed to the command. can be specified multiple times.
    #[arg(long, value_name = "NAME=VALUE", value_parser = key_value::check_key_value, global = true, help_heading = "General")]
    param: Vec<String>,

    /// delimiter used to group keys by the list command
    #[arg(long, env, global = true, default_value = DEFAULT_DELIMITER, help_heading = "General")]
    delimiter: String,

    /// location of the file that the AWS CLI uses to store configuration profiles
    #[arg(long, env, global = true, value_name = "FILE", help_heading = "AWS Configuration")]
    aws_config_file: Option<PathBuf>,

    /// location of the file that the AWS CLI uses to store access keys
    #[arg(long, env, global = true, value_name = "FILE", help_heading = "AWS Configuration")]
    aws_shared_credentials_file: Option<PathBuf>,

    /// AWS CLI profile
    #[arg(long, env, global = true, conflicts_with_all = ["access_key", "secret_access_key", "session_token"], help_heading = "AWS Configuration")]
    profile: Option<String>,

    /// access key
    #[arg(long, env, global = true, conflicts_with_all = ["profile"], requires = "secret_access_key", help_heading = "AWS Configuration")]
    access_key: Option<String>,

    /// secret access key
    #[arg(long, env, global = true, conflicts_with_all = ["profile"], requires = "access_key", help_heading = "AWS Configuration")]
    secret_access_key: Option<String>,

    /// session token
    #[arg(long, env, global = true, conflicts_with_all = ["profile"], requires = "access_key", help_heading = "AWS Configuration")]
    session_token: Option<String>,

    /// region
    #[arg(long, env, global = true, value_parser = NonEmptyStringValueParser::new(), help_heading = "S3 Options")]
    region: Option<String>,

    /// endpoint url
    #[arg(long, env, global = true, value_parser = url::check_scheme, help_heading = "S3 Options")]
    endpoint_url: Option<String>,

    /// force path-style addressing for the endpoint
    #[arg(long, env, global = true, default_value_t = DEFAULT_FORCE_PATH_STYLE, help_heading = "S3 Options")]
    force_path_style: bool,

    /// Use Amazon S3 Transfer Acceleration for the bucket.
    #[arg(long, env, global = true, default_value_t = DEFAULT_ACCELERATE, help_heading = "S3 Options")]
    accelerate: bool,

    /// trace verbosity(-v: show info, -vv: show debug, -vvv show trace)
    #[clap(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// show trace as json format
    #[arg(long, env, global = true, default_value_t = DEFAULT_JSON_TRACING, help_heading = "Tracing/Logging")]
    json_tracing: bool,

    /// enable aws sdk tracing
    #[arg(long, env, global = true, default_value_t = DEFAULT_AWS_SDK_TRACING, help_heading = "Tracing/Logging")]
    aws_sdk_tracing: bool,

    /// show span event tracing
    #[arg(long, env, global = true, default_value_t = DEFAULT_SPAN_EVENTS_TRACING, help_heading = "Tracing/Logging")]
    span_events_tracing: bool,

    /// disable ANSI terminal colors
    #[arg(long, env, global = true, default_value_t = DEFAULT_DISABLE_COLOR_TRACING, help_heading = "Tracing/Logging")]
    disable_color_tracing: bool,

    /// maximum retry attempts that the AWS SDK retry handler use
    #[arg(long, env, global = true, default_value_t = DEFAULT_AWS_MAX_ATTEMPTS, value_name = "max_attempts", help_heading = "Retry Options")]
    aws_max_attempts: u32,

    /// a multiplier value used when calculating backoff times as part of an exponential backoff with jitter strategy.
    #[arg(long, env, global = true, default_value_t = DEFAULT_INITIAL_BACKOFF_MILLISECONDS, value_name = "initial_backoff", help_heading = "Retry Options")]
    initial_backoff_milliseconds: u64,

    /// operation timeout (milliseconds). For details, see the AWS SDK for Rust TimeoutConfig documentation.
    /// The default has no timeout.
    #[arg(
        long,
        env,
        global = true,
        value_name = "operation_timeout",
        help_heading = "Timeout Options"
    )]
    operation_timeout_milliseconds: Option<u64>,

    /// operation attempt timeout (milliseconds). For details, see the AWS SDK for Rust TimeoutConfig documentation.
    /// The default has no timeout.
    #[arg(
        long,
        env,
        global = true,
        value_name = "operation_attempt_timeout",
        help_heading = "Timeout Options"
    )]
    operation_attempt_timeout_milliseconds: Option<u64>,

    /// connect timeout (milliseconds).
    /// The default has AWS SDK default timeout (Currently 3100 milliseconds).
    #[arg(
        long,
        env,
        global = true,
        value_name = "connect_timeout",
        help_heading = "Timeout Options"
    )]
    connect_timeout_milliseconds: Option<u64>,

    /// read timeout (milliseconds).
    /// The default has no timeout.
    #[arg(
        long,
        env,
        global = true,
        value_name = "read_timeout",
        help_heading = "Timeout Options"
    )]
    read_timeout_milliseconds: Option<u64>,

    /// maximum number of objects returned in a single list object request
    #[arg(long, env, global = true, default_value_t = DEFAULT_MAX_KEYS, value_parser = clap::value_parser!(i32).range(1..=32767), help_heading = "Advanced")]
    max_keys: i32,

    /// disable stalled stream protection
    #[arg(long, env, global = true, default_value_t = DEFAULT_DISABLE_STALLED_STREAM_PROTECTION, help_heading = "Advanced")]
    disable_stalled_stream_protection: bool,

    /// generate a auto completions script. Valid values: bash, fish, zsh, powershell, elvish.
    #[arg(long, env, value_name = "SHELL", value_parser = clap_complete::shells::Shell::from_str, help_heading = "Advanced")]
    auto_complete_shell: Option<clap_complete::shells::Shell>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum CLICommand {
    /// list all buckets
    Buckets,

    /// list common prefixes and objects directly under PATH
    List(TargetArgs),

    /// list every object whose key starts with PATH
    Search(TargetArgs),

    /// show the total size of every object whose key starts with PATH
    Size(TargetArgs),

    /// download an object, or every object under PATH with --recursive
    Download(DownloadArgs),
}

#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// bucket name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    bucket: String,

    /// key or key prefix
    #[arg(long)]
    path: String,
}

#[derive(Args, Clone, Debug)]
pub struct DownloadArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// download every object whose key starts with PATH
    #[arg(long, default_value_t = DEFAULT_RECURSIVE)]
    recursive: bool,

    /// local directory that downloaded objects are saved under
    #[arg(long, env, value_name = "DIR", default_value = DEFAULT_LOCAL_PATH)]
    local_path: PathBuf,
}

pub fn parse_from_args<I, T>(args: I) -> Result<CLIArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CLIArgs::try_parse_from(args)
}

pub fn build_config_from_args<I, T>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config_args = CLIArgs::try_parse_from(args).map_err(|e| e.to_string())?;
    crate::Config::try_from(config_args)
}

impl CLIArgs {
    pub fn auto_complete_shell(&self) -> Option<clap_complete::shells::Shell> {
        self.auto_complete_shell
    }

    fn validate_config(&self) -> Result<(), String> {
        self.check_command()?;
        self.check_local_path()?;

        Ok(())
    }

    fn check_command(&self) -> Result<(), String> {
        if self.command.is_none() {
            return Err(NO_COMMAND_SPECIFIED.to_string());
        }

        Ok(())
    }

    fn check_local_path(&self) -> Result<(), String> {
        if let Some(CLICommand::Download(download_args)) = &self.command {
            let local_path = &download_args.local_path;
            if local_path.exists() && !local_path.is_dir() {
                return Err(LOCAL_PATH_NOT_DIRECTORY.to_string());
            }
        }

        Ok(())
    }

    fn build_client_config(&self) -> ClientConfig {
        let credential = if let Some(profile) = self.profile.clone() {
            S3Credentials::Profile(profile)
        } else if let Some(access_key) = self.access_key.clone() {
            S3Credentials::Credentials {
                access_keys: AccessKeys {
                    access_key,
                    secret_access_key: self.secret_access_key.clone().unwrap_or_default(),
                    session_token: self.session_token.clone(),
                },
            }
        } else {
            S3Credentials::FromEnvironment
        };

        ClientConfig {
            client_config_location: ClientConfigLocation {
                aws_config_file: self.aws_config_file.clone(),
                aws_shared_credentials_file: self.aws_shared_credentials_file.clone(),
            },
            credential,
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.force_path_style,
            accelerate: self.accelerate,
            retry_config: RetryConfig {
                aws_max_attempts: self.aws_max_attempts,
                initial_backoff_milliseconds: self.initial_backoff_milliseconds,
            },
            cli_timeout_config: CLITimeoutConfig {
                operation_timeout_milliseconds: self.operation_timeout_milliseconds,
                operation_attempt_timeout_milliseconds: self.operation_attempt_timeout_milliseconds,
                connect_timeout_milliseconds: self.connect_timeout_milliseconds,
                read_timeout_milliseconds: self.read_timeout_milliseconds,
            },
            disable_stalled_stream_protection: self.disable_stalled_stream_protection,
        }
    }

    fn build_params(&self) -> Result<HashMap<String, String>, String> {
        self.param
            .iter()
            .map(|param| key_value::parse_key_value(param))
            .collect()
    }
}

impl From<CLICommand> for Command {
    fn from(value: CLICommand) -> Self {
        match value {
            CLICommand::Buckets => Command::Buckets,
            CLICommand::List(TargetArgs { bucket, path }) => Command::List { bucket, path },
            CLICommand::Search(TargetArgs { bucket, path }) => Command::Search { bucket, path },
            CLICommand::Size(TargetArgs { bucket, path }) => Command::Size { bucket, path },
            CLICommand::Download(DownloadArgs {
                target: TargetArgs { bucket, path },
                recursive,
                ..
            }) => Command::Download {
                bucket,
                path,
                recursive,
            },
        }
    }
}

impl TryFrom<CLIArgs> for Config {
    type Error = String;

    fn try_from(value: CLIArgs) -> Result<Self, Self::Error> {
        value.validate_config()?;

        let client_config = value.build_client_config();
        let params = value.build_params()?;

        let tracing_config = value.verbosity.log_level().map(|log_level| TracingConfig {
            tracing_level: log_level,
            json_tracing: value.json_tracing,
            aws_sdk_tracing: value.aws_sdk_tracing,
            span_events_tracing: value.span_events_tracing,
            disable_color_tracing: value.disable_color_tracing,
        });

        let local_path = match &value.command {
            Some(CLICommand::Download(download_args)) => download_args.local_path.clone(),
            _ => PathBuf::from(DEFAULT_LOCAL_PATH),
        };

        let command = value
            .command
            .map(Command::from)
            .ok_or_else(|| NO_COMMAND_SPECIFIED.to_string())?;

        Ok(Config {
            command,
            client_config,
            tracing_config,
            size_unit: value.sum,
            delimiter: value.delimiter,
            local_path,
            max_keys: value.max_keys,
            params,
        })
    }
}
