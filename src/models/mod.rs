//! Domain models for the subnet calculator.
//!
//! This module contains the core data structures used throughout the application:
//! - [`ipv4`] and [`ipv6`] - address parsing and mask arithmetic
//! - [`AddressCount`] - block sizes up to 2^128
//! - [`SubnetDescriptor`] - the result of analyzing one CIDR string
//! - [`HistoryRecord`] - a stored calculation

mod count;
mod descriptor;
pub mod ipv4;
pub mod ipv6;
mod record;

// Re-export public types
pub use count::AddressCount;
pub use descriptor::{Classification, HostRange, IpVersion, SubnetDescriptor};
pub use record::HistoryRecord;
