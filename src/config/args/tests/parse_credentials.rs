#[cfg(test)]
mod tests {
    use crate::config::args::*;

    #[test]
    fn parse_from_args_profile() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3browse", "--profile", "my_profile", "buckets"];

        if let Ok(config_args) = parse_from_args(args) {
            let client_config = config_args.build_client_config();

            if let S3Credentials::Profile(profile_name) = client_config.credential {
                assert_eq!(profile_name, "my_profile".to_string());
            } else {
                // skipcq: RS-W1021
                assert!(false, "no client profile");
            }
        } else {
            // skipcq: RS-W1021
            assert!(false, "error occurred.");
        }
    }

    #[test]
    fn parse_from_args_access_keys() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3browse",
            "--access-key",
            "my_access_key",
            "--secret-access-key",
            "my_secret_access_key",
            "--session-token",
            "my_session_token",
            "buckets",
        ];

        if let Ok(config_args) = parse_from_args(args) {
            let client_config = config_args.build_client_config();

            if let S3Credentials::Credentials { access_keys } = client_config.credential {
                assert_eq!(access_keys.access_key, "my_access_key".to_string());
                assert_eq!(
                    access_keys.secret_access_key,
                    "my_secret_access_key".to_string()
                );
                assert_eq!(
                    access_keys.session_token,
                    Some("my_session_token".to_string())
                );
            } else {
                // skipcq: RS-W1021
                assert!(false, "no credential");
            }
        } else {
            // skipcq: RS-W1021
            assert!(false, "error occurred.");
        }
    }

    #[test]
    fn parse_from_args_access_keys_without_session_token() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3browse",
            "--access-key",
            "my_access_key",
            "--secret-access-key",
            "my_secret_access_key",
            "list",
            "--bucket",
            "my-bucket",
            "--path",
            "",
        ];

        let config_args = parse_from_args(args).unwrap();
        let client_config = config_args.build_client_config();

        if let S3Credentials::Credentials { access_keys } = client_config.credential {
            assert!(access_keys.session_token.is_none());
        } else {
            // skipcq: RS-W1021
            assert!(false, "no credential");
        }
    }

    #[test]
    fn parse_from_args_from_environment() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3browse", "buckets"];

        let config_args = parse_from_args(args).unwrap();
        let client_config = config_args.build_client_config();

        assert!(matches!(
            client_config.credential,
            S3Credentials::FromEnvironment
        ));
    }

    #[test]
    fn parse_from_args_credential_conflict() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3browse",
            "--profile",
            "my_profile",
            "--access-key",
            "my_access_key",
            "--secret-access-key",
            "my_secret_access_key",
            "buckets",
        ];
        assert!(parse_from_args(args).is_err());

        let args = vec!["s3browse", "--access-key", "my_access_key", "buckets"];
        assert!(parse_from_args(args).is_err());

        let args = vec![
            "s3browse",
            "--secret-access-key",
            "my_secret_access_key",
            "buckets",
        ];
        assert!(parse_from_args(args).is_err());
    }

    fn init_dummy_tracing_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dummy=trace")
            .try_init();
    }
}
