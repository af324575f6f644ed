//! Domain types providing compile-time safety and self-documentation

use std::fmt;
use std::str::FromStr;

use super::errors::AddressParseError;

/// Kernel address as reported in a fault or diagnostic message
///
/// Parses from hexadecimal with or without a `0x` prefix, the way addresses
/// appear in oops output and in `/proc/kallsyms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub u64);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u64> for Address {
    fn from(addr: u64) -> Self {
        Address(addr)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(AddressParseError::Empty);
        }

        u64::from_str_radix(digits, 16)
            .map(Address)
            .map_err(|_| AddressParseError::Invalid(trimmed.to_string()))
    }
}
