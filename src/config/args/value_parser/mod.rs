pub mod key_value;
pub mod size_unit;
pub mod url;
