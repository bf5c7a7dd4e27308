//! Byte sizes with binary unit suffixes.
//!
//! Cache and memory sizes are written as `<digits><unit>` (for example `64KiB` or
//! `512MiB`). This module provides:
//! 1. **Unit table:** `B`, `KiB`, `MiB`, `GiB` and their multipliers.
//! 2. **Parsing:** `ByteSize::from_str` with overflow checking.
//! 3. **Formatting:** Display in the largest exact unit, or in a caller-chosen unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary size units accepted in size strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    /// Plain bytes (`B`, or no suffix at all).
    Byte,
    /// 1024 bytes.
    KiB,
    /// 1024² bytes.
    MiB,
    /// 1024³ bytes.
    GiB,
}

impl SizeUnit {
    /// All units, smallest first.
    pub const ALL: [Self; 4] = [Self::Byte, Self::KiB, Self::MiB, Self::GiB];

    /// Number of bytes in one of this unit.
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::KiB => 1 << 10,
            Self::MiB => 1 << 20,
            Self::GiB => 1 << 30,
        }
    }

    /// Suffix written after the number.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Byte => "B",
            Self::KiB => "KiB",
            Self::MiB => "MiB",
            Self::GiB => "GiB",
        }
    }

    /// Looks up a unit by suffix. An empty suffix means bytes.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "B" => Some(Self::Byte),
            "KiB" => Some(Self::KiB),
            "MiB" => Some(Self::MiB),
            "GiB" => Some(Self::GiB),
            _ => None,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Reasons a size string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeParseError {
    /// The string was empty or whitespace.
    #[error("empty size")]
    Empty,
    /// The string did not start with a decimal number.
    #[error("expected a number before the unit")]
    MissingNumber,
    /// The suffix is not in the unit table.
    #[error("unknown unit suffix `{0}` (expected B, KiB, MiB or GiB)")]
    UnknownUnit(String),
    /// The byte count does not fit in 64 bits.
    #[error("size does not fit in 64 bits")]
    Overflow,
}

/// A size in bytes.
///
/// # Examples
///
/// ```
/// use memsys_core::common::{ByteSize, SizeUnit};
///
/// let size: ByteSize = "64KiB".parse().unwrap();
/// assert_eq!(size.bytes(), 65536);
/// assert_eq!(size.to_string(), "64KiB");
/// assert_eq!(size.to_unit_string(SizeUnit::Byte).as_deref(), Some("65536B"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteSize(pub u64);

impl ByteSize {
    /// `n` KiB.
    pub const fn kib(n: u64) -> Self {
        Self(n * SizeUnit::KiB.multiplier())
    }

    /// `n` MiB.
    pub const fn mib(n: u64) -> Self {
        Self(n * SizeUnit::MiB.multiplier())
    }

    /// `n` GiB.
    pub const fn gib(n: u64) -> Self {
        Self(n * SizeUnit::GiB.multiplier())
    }

    /// Raw byte count.
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Formats the size in `unit`, or returns `None` if it is not a whole multiple of it.
    pub fn to_unit_string(self, unit: SizeUnit) -> Option<String> {
        let mult = unit.multiplier();
        (self.0 % mult == 0).then(|| format!("{}{}", self.0 / mult, unit.suffix()))
    }

    /// Largest unit that divides the size exactly. Zero is reported in bytes.
    pub fn largest_exact_unit(self) -> SizeUnit {
        if self.0 == 0 {
            return SizeUnit::Byte;
        }
        SizeUnit::ALL
            .into_iter()
            .rev()
            .find(|u| self.0 % u.multiplier() == 0)
            .unwrap_or(SizeUnit::Byte)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.largest_exact_unit();
        write!(f, "{}{}", self.0 / unit.multiplier(), unit.suffix())
    }
}

impl FromStr for ByteSize {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SizeParseError::Empty);
        }
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);
        if digits.is_empty() {
            return Err(SizeParseError::MissingNumber);
        }
        let suffix = suffix.trim_start();
        let unit = SizeUnit::from_suffix(suffix)
            .ok_or_else(|| SizeParseError::UnknownUnit(suffix.to_string()))?;
        let value: u64 = digits.parse().map_err(|_| SizeParseError::Overflow)?;
        value
            .checked_mul(unit.multiplier())
            .map(Self)
            .ok_or(SizeParseError::Overflow)
    }
}
