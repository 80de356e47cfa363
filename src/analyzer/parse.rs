//! CIDR string to [`SubnetDescriptor`].

use super::classify::{classify_v4, flags_v4, flags_v6};
use crate::error::{ParseError, ParseErrorKind};
use crate::models::{
    ipv4, ipv6, AddressCount, Classification, HostRange, IpVersion, SubnetDescriptor,
};
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

/// Address characters, then an optional `/suffix`.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(r"^(?P<addr>[0-9A-Fa-f:.]+)(?:/(?P<prefix>\S*))?$").expect("Invalid Regex")
    })
}

/// Analyze one CIDR string.
///
/// Host bits beyond the prefix are masked off rather than rejected, so `192.168.1.5/24`
/// describes `192.168.1.0/24`. A missing suffix means a host route.
///
/// # Examples
/// ```
/// use subnet_calc::analyzer::parse_and_classify;
/// let d = parse_and_classify("192.168.1.5/24").unwrap();
/// assert_eq!(d.network_address.to_string(), "192.168.1.0");
/// ```
pub fn parse_and_classify(input_text: &str) -> Result<SubnetDescriptor, ParseError> {
    let text = input_text.trim();
    if text.is_empty() {
        return Err(ParseError::new(input_text, ParseErrorKind::Empty));
    }
    log::debug!("parse_and_classify({text})");

    let captures = get_cidr_regex().captures(text).ok_or_else(|| {
        ParseError::new(
            text,
            ParseErrorKind::InvalidSyntax(format!("'{text}' is not an IP address or CIDR")),
        )
    })?;
    let addr_text = &captures["addr"];
    let prefix_text = captures.name("prefix").map(|m| m.as_str());

    let result = if addr_text.contains(':') {
        describe_v6(text, addr_text, prefix_text)
    } else {
        describe_v4(text, addr_text, prefix_text)
    };
    result.map_err(|reason| ParseError::new(text, reason))
}

/// Prefix length from the `/suffix`, or the full width when absent.
fn parse_prefix(prefix_text: Option<&str>, max: u8) -> Result<u8, ParseErrorKind> {
    let Some(prefix_text) = prefix_text else {
        return Ok(max);
    };
    if prefix_text.is_empty() || !prefix_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidPrefix(prefix_text.to_string()));
    }
    let prefix: u32 = prefix_text
        .parse()
        .map_err(|_| ParseErrorKind::InvalidPrefix(prefix_text.to_string()))?;
    if prefix > max as u32 {
        return Err(ParseErrorKind::PrefixTooLong { prefix, max });
    }
    Ok(prefix as u8)
}

fn describe_v4(
    text: &str,
    addr_text: &str,
    prefix_text: Option<&str>,
) -> Result<SubnetDescriptor, ParseErrorKind> {
    let addr = ipv4::parse_addr(addr_text)?;
    let prefix = match prefix_text {
        Some(mask) if mask.contains('.') => ipv4::prefix_from_mask(mask)?,
        _ => parse_prefix(prefix_text, ipv4::MAX_LENGTH)?,
    };

    let network = ipv4::cut_addr(addr, prefix)?;
    let broadcast = ipv4::broadcast_addr(addr, prefix)?;
    let netmask = Ipv4Addr::from(ipv4::get_cidr_mask(prefix)?);
    let wildcard = ipv4::wildcard_mask(prefix)?;
    let total_addresses = AddressCount::power_of_two(ipv4::MAX_LENGTH - prefix);

    let usable_hosts = if ipv4::has_reserved_ends(prefix) {
        HostRange {
            first: IpAddr::V4(Ipv4Addr::from(u32::from(network) + 1)),
            last: IpAddr::V4(Ipv4Addr::from(u32::from(broadcast) - 1)),
            count: total_addresses.minus(2),
        }
    } else {
        HostRange {
            first: IpAddr::V4(network),
            last: IpAddr::V4(broadcast),
            count: total_addresses,
        }
    };
    let flags = flags_v4(network, broadcast);

    Ok(SubnetDescriptor {
        input_text: text.to_string(),
        ip_version: IpVersion::V4,
        prefix_length: prefix,
        network_address: IpAddr::V4(network),
        broadcast_address: Some(broadcast),
        netmask: IpAddr::V4(netmask),
        wildcard_mask: Some(wildcard),
        total_addresses,
        usable_hosts,
        classification: classify_v4(network),
        is_private: flags.is_private,
        is_multicast: flags.is_multicast,
        is_reserved: flags.is_reserved,
    })
}

fn describe_v6(
    text: &str,
    addr_text: &str,
    prefix_text: Option<&str>,
) -> Result<SubnetDescriptor, ParseErrorKind> {
    let addr = ipv6::parse_addr(addr_text)?;
    let prefix = parse_prefix(prefix_text, ipv6::MAX_LENGTH)?;

    let network = ipv6::cut_addr(addr, prefix)?;
    let last = ipv6::last_addr(addr, prefix)?;
    let netmask = Ipv6Addr::from(ipv6::get_cidr_mask(prefix)?);
    let total_addresses = AddressCount::power_of_two(ipv6::MAX_LENGTH - prefix);
    let flags = flags_v6(network, last);

    Ok(SubnetDescriptor {
        input_text: text.to_string(),
        ip_version: IpVersion::V6,
        prefix_length: prefix,
        network_address: IpAddr::V6(network),
        broadcast_address: None,
        netmask: IpAddr::V6(netmask),
        wildcard_mask: None,
        total_addresses,
        usable_hosts: HostRange {
            first: IpAddr::V6(network),
            last: IpAddr::V6(last),
            count: total_addresses,
        },
        classification: Classification::Ipv6,
        is_private: flags.is_private,
        is_multicast: flags.is_multicast,
        is_reserved: flags.is_reserved,
    })
}
