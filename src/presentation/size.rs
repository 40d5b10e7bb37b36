use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use byte_unit::{Byte, Unit};

const INVALID_SIZE_UNIT: &str = "size unit must be one of B, K, M, G, T.";

/// Display unit for byte counts. Each step is 1024 times the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeUnit {
    B,
    K,
    M,
    G,
    T,
}

impl SizeUnit {
    pub fn next(self) -> Option<SizeUnit> {
        match self {
            SizeUnit::B => Some(SizeUnit::K),
            SizeUnit::K => Some(SizeUnit::M),
            SizeUnit::M => Some(SizeUnit::G),
            SizeUnit::G => Some(SizeUnit::T),
            SizeUnit::T => None,
        }
    }

    fn byte_unit(self) -> Unit {
        match self {
            SizeUnit::B => Unit::B,
            SizeUnit::K => Unit::KiB,
            SizeUnit::M => Unit::MiB,
            SizeUnit::G => Unit::GiB,
            SizeUnit::T => Unit::TiB,
        }
    }
}

impl Display for SizeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let unit = match self {
            SizeUnit::B => "B",
            SizeUnit::K => "K",
            SizeUnit::M => "M",
            SizeUnit::G => "G",
            SizeUnit::T => "T",
        };
        write!(f, "{unit}")
    }
}

impl FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "B" => Ok(SizeUnit::B),
            "K" => Ok(SizeUnit::K),
            "M" => Ok(SizeUnit::M),
            "G" => Ok(SizeUnit::G),
            "T" => Ok(SizeUnit::T),
            _ => Err(INVALID_SIZE_UNIT.to_string()),
        }
    }
}

/// A byte count scaled up to the largest unit that keeps the value at or
/// above 1, never going past `cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledSize {
    pub value: f64,
    pub unit: SizeUnit,
}

impl ScaledSize {
    pub fn new(bytes: u64, cap: Option<SizeUnit>) -> Self {
        let cap = cap.unwrap_or(SizeUnit::T);

        let mut unit = SizeUnit::B;
        let mut value = bytes as f64;
        while unit != cap {
            let Some(next_unit) = unit.next() else {
                break;
            };
            if value / 1024.0 < 1.0 {
                break;
            }

            value /= 1024.0;
            unit = next_unit;
        }

        let value = Byte::from_u64(bytes)
            .get_adjusted_unit(unit.byte_unit())
            .get_value();

        ScaledSize { value, unit }
    }

    pub fn rounded(&self) -> f64 {
        self.value.round()
    }

    /// Right aligned in a ten character column, as used by listing lines.
    pub fn padded(&self) -> String {
        format!("{:>10} {}", self.rounded(), self.unit)
    }
}

impl Display for ScaledSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rounded(), self.unit)
    }
}
