mod parse_credentials;
