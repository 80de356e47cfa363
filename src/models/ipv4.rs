//! IPv4 address parsing and mask arithmetic.
//!
//! All calculations work on the address as a big-endian `u32`.

use crate::error::ParseErrorKind;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calc::models::ipv4::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, ParseErrorKind> {
    if len > MAX_LENGTH {
        Err(ParseErrorKind::PrefixTooLong {
            prefix: len as u32,
            max: MAX_LENGTH,
        })
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ParseErrorKind> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ParseErrorKind> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Bitwise complement of the subnet mask, e.g. `0.0.0.255` for a /24.
pub fn wildcard_mask(len: u8) -> Result<Ipv4Addr, ParseErrorKind> {
    Ok(Ipv4Addr::from(!get_cidr_mask(len)?))
}

/// Whether a `/len` block gives up its network and broadcast addresses to hosts.
/// Point-to-point /31 and host /32 blocks use every address.
pub fn has_reserved_ends(len: u8) -> bool {
    len < 31
}

/// True when `addr` lies inside `network/len`.
pub fn contains(network: Ipv4Addr, len: u8, addr: Ipv4Addr) -> bool {
    match get_cidr_mask(len) {
        Ok(mask) => u32::from(addr) & mask == u32::from(network) & mask,
        Err(_) => false,
    }
}

/// Parse dotted-decimal IPv4 text such as `192.168.1.5`.
pub fn parse_addr(text: &str) -> Result<Ipv4Addr, ParseErrorKind> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(ParseErrorKind::InvalidSyntax(format!(
            "expected 4 octets in '{text}'"
        )));
    }
    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        *octet = parse_octet(part)?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Result<u8, ParseErrorKind> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidSyntax(format!(
            "octet '{part}' is not a decimal number"
        )));
    }
    if part.len() > 3 {
        return Err(ParseErrorKind::OctetOutOfRange(part.to_string()));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(ParseErrorKind::LeadingZero(part.to_string()));
    }
    let value: u16 = part
        .parse()
        .map_err(|_| ParseErrorKind::InvalidSyntax(part.to_string()))?;
    u8::try_from(value).map_err(|_| ParseErrorKind::OctetOutOfRange(part.to_string()))
}

/// Convert a dotted netmask (`255.255.255.0`) or host mask (`0.0.0.255`) to a prefix length.
pub fn prefix_from_mask(text: &str) -> Result<u8, ParseErrorKind> {
    let bits = u32::from(parse_addr(text)?);
    if bits.leading_ones() + bits.trailing_zeros() == 32 {
        return Ok(bits.leading_ones() as u8);
    }
    let inverted = !bits;
    if inverted.leading_ones() + inverted.trailing_zeros() == 32 {
        return Ok(inverted.leading_ones() as u8);
    }
    Err(ParseErrorKind::NonContiguousMask(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(31).unwrap(), 0xFFFFFFFE);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
        assert_eq!(broadcast_addr(ip, 0).unwrap(), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_wildcard_mask() {
        assert_eq!(wildcard_mask(24).unwrap(), Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(wildcard_mask(0).unwrap(), Ipv4Addr::BROADCAST);
        assert_eq!(wildcard_mask(32).unwrap(), Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_has_reserved_ends() {
        assert!(has_reserved_ends(0));
        assert!(has_reserved_ends(30));
        assert!(!has_reserved_ends(31));
        assert!(!has_reserved_ends(32));
    }

    #[test]
    fn test_contains() {
        let net = Ipv4Addr::new(172, 16, 0, 0);
        assert!(contains(net, 12, Ipv4Addr::new(172, 31, 255, 255)));
        assert!(!contains(net, 12, Ipv4Addr::new(172, 32, 0, 0)));
        assert!(contains(net, 0, Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn test_parse_addr() {
        assert_eq!(
            parse_addr("192.168.1.5").unwrap(),
            Ipv4Addr::new(192, 168, 1, 5)
        );
        assert_eq!(parse_addr("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(
            parse_addr("300.1.1.1").unwrap_err(),
            ParseErrorKind::OctetOutOfRange("300".to_string())
        );
        assert_eq!(
            parse_addr("10.01.1.1").unwrap_err(),
            ParseErrorKind::LeadingZero("01".to_string())
        );
        assert!(matches!(
            parse_addr("1.2.3"),
            Err(ParseErrorKind::InvalidSyntax(_))
        ));
        assert!(matches!(
            parse_addr("1.2.3.x"),
            Err(ParseErrorKind::InvalidSyntax(_))
        ));
        assert!(matches!(
            parse_addr("1..3.4"),
            Err(ParseErrorKind::InvalidSyntax(_))
        ));
    }

    #[test]
    fn test_prefix_from_mask() {
        assert_eq!(prefix_from_mask("255.255.255.0").unwrap(), 24);
        assert_eq!(prefix_from_mask("255.255.255.255").unwrap(), 32);
        assert_eq!(prefix_from_mask("0.0.0.255").unwrap(), 24);
        assert_eq!(prefix_from_mask("255.255.240.0").unwrap(), 20);
        assert_eq!(
            prefix_from_mask("255.0.255.0").unwrap_err(),
            ParseErrorKind::NonContiguousMask("255.0.255.0".to_string())
        );
    }
}
