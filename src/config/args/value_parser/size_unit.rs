use std::str::FromStr;

use crate::presentation::size::SizeUnit;

pub fn parse_size_unit(value: &str) -> Result<SizeUnit, String> {
    SizeUnit::from_str(value)
}
