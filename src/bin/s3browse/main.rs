use ::tracing::trace;
use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use rusty_fork::rusty_fork_test;

use s3browse::CLIArgs;
use s3browse::Config;

mod cli;
mod tracing;

const EXIT_CODE_INVALID_ARGS: i32 = -1;

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args_exit_if_err();

    if let Some(shell) = cli_args.auto_complete_shell() {
        generate(
            shell,
            &mut CLIArgs::command(),
            "s3browse",
            &mut std::io::stdout(),
        );

        return Ok(());
    }

    let config = load_config_exit_if_err(cli_args);

    start_tracing_if_necessary(&config);

    trace!("config = {:?}", config);

    cli::run(config).await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn parse_args_exit_if_err() -> CLIArgs {
    match CLIArgs::try_parse() {
        Ok(cli_args) => cli_args,
        Err(e) => {
            // --help and --version
            if !e.use_stderr() {
                e.exit();
            }

            let _ = e.print();
            std::process::exit(EXIT_CODE_INVALID_ARGS);
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn load_config_exit_if_err(cli_args: CLIArgs) -> Config {
    match Config::try_from(cli_args) {
        Ok(config) => config,
        Err(error_message) => {
            let _ = clap::Error::raw(clap::error::ErrorKind::ValueValidation, error_message)
                .with_cmd(&CLIArgs::command())
                .print();
            std::process::exit(EXIT_CODE_INVALID_ARGS);
        }
    }
}

fn start_tracing_if_necessary(config: &Config) -> bool {
    let Some(tracing_config) = config.tracing_config.as_ref() else {
        return false;
    };

    tracing::init_tracing(tracing_config);
    true
}

rusty_fork_test! {
    #[test]
    fn with_tracing() {
        let args = vec![
            "unittest",
            "--profile",
            "my_profile",
            "list",
            "--bucket",
            "my-bucket",
            "--path",
            "logs/",
        ];

        let config = s3browse::Config::try_from(CLIArgs::try_parse_from(args).unwrap()).unwrap();
        assert!(start_tracing_if_necessary(&config));
    }

    #[test]
    fn without_tracing() {
        let args = vec![
            "unittest",
            "--profile",
            "my_profile",
            "-qq",
            "buckets",
        ];

        let config = s3browse::Config::try_from(CLIArgs::try_parse_from(args).unwrap()).unwrap();
        assert!(!start_tracing_if_necessary(&config));
    }
}
