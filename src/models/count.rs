//! Address counts wide enough for a whole IPv6 `/0`.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2^128 written out, the one count a `u128` cannot hold.
const WHOLE_IPV6_TEXT: &str = "340282366920938463463374607431768211456";

/// Number of addresses in a block.
///
/// Serialized as a decimal string so the full IPv6 space survives a JSON round trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressCount {
    /// Any count up to `u128::MAX`.
    Exact(u128),
    /// 2^128, every IPv6 address.
    WholeIpv6,
}

impl AddressCount {
    /// 2^bits.
    pub fn power_of_two(bits: u8) -> AddressCount {
        if bits >= 128 {
            AddressCount::WholeIpv6
        } else {
            AddressCount::Exact(1u128 << bits)
        }
    }

    /// Subtract `n`, saturating at zero.
    pub fn minus(self, n: u128) -> AddressCount {
        match self {
            AddressCount::Exact(v) => AddressCount::Exact(v.saturating_sub(n)),
            AddressCount::WholeIpv6 if n == 0 => AddressCount::WholeIpv6,
            AddressCount::WholeIpv6 => AddressCount::Exact(u128::MAX - (n - 1)),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            AddressCount::Exact(v) => *v as f64,
            AddressCount::WholeIpv6 => 2f64.powi(128),
        }
    }

    pub fn is_power_of_two(&self) -> bool {
        match self {
            AddressCount::Exact(v) => v.is_power_of_two(),
            AddressCount::WholeIpv6 => true,
        }
    }
}

impl fmt::Display for AddressCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressCount::Exact(v) => write!(f, "{v}"),
            AddressCount::WholeIpv6 => f.write_str(WHOLE_IPV6_TEXT),
        }
    }
}

impl FromStr for AddressCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == WHOLE_IPV6_TEXT {
            return Ok(AddressCount::WholeIpv6);
        }
        s.parse::<u128>()
            .map(AddressCount::Exact)
            .map_err(|_| format!("invalid address count: {s}"))
    }
}

impl Serialize for AddressCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressCount {
    fn deserialize<D>(deserializer: D) -> Result<AddressCount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressCount::from_str(&s).map_err(de::Error::custom)
    }
}
