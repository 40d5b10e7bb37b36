use regex::Regex;

const INVALID_PARAM: &str = "invalid parameter. must be NAME=VALUE.";

pub fn check_key_value(param: &str) -> Result<String, String> {
    let regex = Regex::new(r"^[a-zA-Z0-9_\-.]+=.*$").unwrap();

    if !regex.is_match(param) {
        return Err(INVALID_PARAM.to_string());
    }

    Ok(param.to_string())
}

pub fn parse_key_value(param: &str) -> Result<(String, String), String> {
    check_key_value(param)?;

    let (name, value) = param
        .split_once('=')
        .ok_or_else(|| INVALID_PARAM.to_string())?;

    Ok((name.to_string(), value.to_string()))
}
