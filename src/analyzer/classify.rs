//! Address class and special-purpose block lookups.
//!
//! Tables follow the IANA special-purpose registries (RFC 1918, 3171, 4193, 4291, 6890).

use crate::models::{ipv4, ipv6, Classification};
use std::net::{Ipv4Addr, Ipv6Addr};

type Block4 = (Ipv4Addr, u8);
type Block6 = (Ipv6Addr, u8);

const PRIVATE_V4: &[Block4] = &[
    (Ipv4Addr::new(0, 0, 0, 0), 8),
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(127, 0, 0, 0), 8),
    (Ipv4Addr::new(169, 254, 0, 0), 16),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 0, 0, 0), 24),
    (Ipv4Addr::new(192, 0, 2, 0), 24),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(198, 18, 0, 0), 15),
    (Ipv4Addr::new(198, 51, 100, 0), 24),
    (Ipv4Addr::new(203, 0, 113, 0), 24),
    (Ipv4Addr::new(240, 0, 0, 0), 4),
    (Ipv4Addr::new(255, 255, 255, 255), 32),
];

// globally reachable anycast carved out of 192.0.0.0/24
const PRIVATE_V4_EXCEPTIONS: &[Block4] = &[
    (Ipv4Addr::new(192, 0, 0, 9), 32),
    (Ipv4Addr::new(192, 0, 0, 10), 32),
];

const MULTICAST_V4: &[Block4] = &[(Ipv4Addr::new(224, 0, 0, 0), 4)];

const RESERVED_V4: &[Block4] = &[(Ipv4Addr::new(240, 0, 0, 0), 4)];

const PRIVATE_V6: &[Block6] = &[
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1), 128),
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0), 128),
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0, 0), 96),
    (Ipv6Addr::new(0x64, 0xff9b, 1, 0, 0, 0, 0, 0), 48),
    (Ipv6Addr::new(0x100, 0, 0, 0, 0, 0, 0, 0), 64),
    (Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 23),
    (Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32),
    (Ipv6Addr::new(0x2001, 0x10, 0, 0, 0, 0, 0, 0), 28),
    (Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    (Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
];

const PRIVATE_V6_EXCEPTIONS: &[Block6] = &[
    (Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 1), 128),
    (Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 2), 128),
    (Ipv6Addr::new(0x2001, 3, 0, 0, 0, 0, 0, 0), 32),
    (Ipv6Addr::new(0x2001, 4, 0x112, 0, 0, 0, 0, 0), 48),
    (Ipv6Addr::new(0x2001, 0x20, 0, 0, 0, 0, 0, 0), 28),
    (Ipv6Addr::new(0x2001, 0x30, 0, 0, 0, 0, 0, 0), 28),
];

const MULTICAST_V6: &[Block6] = &[(Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8)];

const RESERVED_V6: &[Block6] = &[
    (Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0), 8),
    (Ipv6Addr::new(0x100, 0, 0, 0, 0, 0, 0, 0), 8),
    (Ipv6Addr::new(0x200, 0, 0, 0, 0, 0, 0, 0), 7),
    (Ipv6Addr::new(0x400, 0, 0, 0, 0, 0, 0, 0), 6),
    (Ipv6Addr::new(0x800, 0, 0, 0, 0, 0, 0, 0), 5),
    (Ipv6Addr::new(0x1000, 0, 0, 0, 0, 0, 0, 0), 4),
    (Ipv6Addr::new(0x4000, 0, 0, 0, 0, 0, 0, 0), 3),
    (Ipv6Addr::new(0x6000, 0, 0, 0, 0, 0, 0, 0), 3),
    (Ipv6Addr::new(0x8000, 0, 0, 0, 0, 0, 0, 0), 3),
    (Ipv6Addr::new(0xa000, 0, 0, 0, 0, 0, 0, 0), 3),
    (Ipv6Addr::new(0xc000, 0, 0, 0, 0, 0, 0, 0), 3),
    (Ipv6Addr::new(0xe000, 0, 0, 0, 0, 0, 0, 0), 4),
    (Ipv6Addr::new(0xf000, 0, 0, 0, 0, 0, 0, 0), 5),
    (Ipv6Addr::new(0xf800, 0, 0, 0, 0, 0, 0, 0), 6),
    (Ipv6Addr::new(0xfe00, 0, 0, 0, 0, 0, 0, 0), 9),
];

/// Special-purpose flags of a block.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BlockFlags {
    pub is_private: bool,
    pub is_multicast: bool,
    pub is_reserved: bool,
}

/// Classful category from the first octet of the masked network address.
pub fn classify_v4(network: Ipv4Addr) -> Classification {
    match network.octets()[0] {
        0..=127 => Classification::ClassA,
        128..=191 => Classification::ClassB,
        192..=223 => Classification::ClassC,
        224..=239 => Classification::Multicast,
        _ => Classification::Experimental,
    }
}

fn in_table_v4(table: &[Block4], addr: Ipv4Addr) -> bool {
    table
        .iter()
        .any(|(net, len)| ipv4::contains(*net, *len, addr))
}

fn in_table_v6(table: &[Block6], addr: Ipv6Addr) -> bool {
    table
        .iter()
        .any(|(net, len)| ipv6::contains(*net, *len, addr))
}

/// Flags for the IPv4 block spanning `first..=last`.
///
/// Private requires the whole block inside one private range and clear of the exceptions;
/// multicast and reserved require both ends to be flagged.
pub fn flags_v4(first: Ipv4Addr, last: Ipv4Addr) -> BlockFlags {
    let is_private = PRIVATE_V4
        .iter()
        .any(|(net, len)| ipv4::contains(*net, *len, first) && ipv4::contains(*net, *len, last))
        && !in_table_v4(PRIVATE_V4_EXCEPTIONS, first)
        && !in_table_v4(PRIVATE_V4_EXCEPTIONS, last);
    BlockFlags {
        is_private,
        is_multicast: in_table_v4(MULTICAST_V4, first) && in_table_v4(MULTICAST_V4, last),
        is_reserved: in_table_v4(RESERVED_V4, first) && in_table_v4(RESERVED_V4, last),
    }
}

/// Flags for the IPv6 block spanning `first..=last`, same rules as [`flags_v4`].
pub fn flags_v6(first: Ipv6Addr, last: Ipv6Addr) -> BlockFlags {
    let is_private = PRIVATE_V6
        .iter()
        .any(|(net, len)| ipv6::contains(*net, *len, first) && ipv6::contains(*net, *len, last))
        && !in_table_v6(PRIVATE_V6_EXCEPTIONS, first)
        && !in_table_v6(PRIVATE_V6_EXCEPTIONS, last);
    BlockFlags {
        is_private,
        is_multicast: in_table_v6(MULTICAST_V6, first) && in_table_v6(MULTICAST_V6, last),
        is_reserved: in_table_v6(RESERVED_V6, first) && in_table_v6(RESERVED_V6, last),
    }
}
