//! Persisted history row.

use super::{AddressCount, Classification, IpVersion, SubnetDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// One stored calculation. Written once, read many times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Monotonic row id assigned by the store.
    pub id: u64,
    pub input_text: String,
    pub ip_version: IpVersion,
    pub network_address: IpAddr,
    pub broadcast_address: Option<Ipv4Addr>,
    pub netmask: IpAddr,
    pub wildcard_mask: Option<Ipv4Addr>,
    pub prefix_length: u8,
    pub total_addresses: AddressCount,
    pub usable_host_count: AddressCount,
    pub first_usable_address: IpAddr,
    pub last_usable_address: IpAddr,
    pub classification: Classification,
    pub is_private: bool,
    pub is_multicast: bool,
    pub is_reserved: bool,
    /// ISO-8601 in UTC.
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn from_descriptor(id: u64, d: &SubnetDescriptor, created_at: DateTime<Utc>) -> Self {
        HistoryRecord {
            id,
            input_text: d.input_text.clone(),
            ip_version: d.ip_version,
            network_address: d.network_address,
            broadcast_address: d.broadcast_address,
            netmask: d.netmask,
            wildcard_mask: d.wildcard_mask,
            prefix_length: d.prefix_length,
            total_addresses: d.total_addresses,
            usable_host_count: d.usable_hosts.count,
            first_usable_address: d.usable_hosts.first,
            last_usable_address: d.usable_hosts.last,
            classification: d.classification,
            is_private: d.is_private,
            is_multicast: d.is_multicast,
            is_reserved: d.is_reserved,
            created_at,
        }
    }
}
