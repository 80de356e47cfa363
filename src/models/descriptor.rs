//! The computed description of one address block.

use super::{ipv4, ipv6, AddressCount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Address family of a block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IpVersion {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

impl IpVersion {
    /// Address width in bits.
    pub fn width(&self) -> u8 {
        match self {
            IpVersion::V4 => ipv4::MAX_LENGTH,
            IpVersion::V6 => ipv6::MAX_LENGTH,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

/// Classful category of a block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    #[serde(rename = "Class A")]
    ClassA,
    #[serde(rename = "Class B")]
    ClassB,
    #[serde(rename = "Class C")]
    ClassC,
    Multicast,
    Experimental,
    #[serde(rename = "IPv6")]
    Ipv6,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Classification::ClassA => "Class A",
            Classification::ClassB => "Class B",
            Classification::ClassC => "Class C",
            Classification::Multicast => "Multicast",
            Classification::Experimental => "Experimental",
            Classification::Ipv6 => "IPv6",
        };
        f.write_str(name)
    }
}

/// Inclusive range of assignable host addresses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HostRange {
    pub first: IpAddr,
    pub last: IpAddr,
    pub count: AddressCount,
}

/// Everything known about one CIDR block. Built by the analyzer, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetDescriptor {
    /// Text as supplied by the caller.
    pub input_text: String,
    pub ip_version: IpVersion,
    pub prefix_length: u8,
    /// Input address with the host bits cleared.
    pub network_address: IpAddr,
    /// IPv4 only.
    pub broadcast_address: Option<Ipv4Addr>,
    pub netmask: IpAddr,
    /// IPv4 only.
    pub wildcard_mask: Option<Ipv4Addr>,
    pub total_addresses: AddressCount,
    /// Excludes network and broadcast for IPv4 blocks shorter than /31.
    pub usable_hosts: HostRange,
    pub classification: Classification,
    pub is_private: bool,
    pub is_multicast: bool,
    pub is_reserved: bool,
}

impl SubnetDescriptor {
    /// Highest address in the block (the broadcast address for IPv4).
    pub fn last_address(&self) -> IpAddr {
        match (self.network_address, self.broadcast_address) {
            (_, Some(broadcast)) => IpAddr::V4(broadcast),
            (IpAddr::V6(network), None) => ipv6::last_addr(network, self.prefix_length)
                .map(IpAddr::V6)
                .unwrap_or(IpAddr::V6(network)),
            (IpAddr::V4(network), None) => IpAddr::V4(network),
        }
    }

    /// True when `addr` is inside this block.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match (self.network_address, addr) {
            (IpAddr::V4(network), IpAddr::V4(addr)) => {
                ipv4::contains(network, self.prefix_length, addr)
            }
            (IpAddr::V6(network), IpAddr::V6(addr)) => {
                ipv6::contains(network, self.prefix_length, addr)
            }
            _ => false,
        }
    }

    /// CIDR of the masked block, e.g. `192.168.1.0/24`.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.network_address, self.prefix_length)
    }
}
