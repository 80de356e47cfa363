//! IPv6 address parsing and mask arithmetic over `u128`.

use super::ipv4;
use crate::error::ParseErrorKind;
use std::net::Ipv6Addr;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH: u8 = 128;

const HEXTETS: usize = 8;

/// Convert a prefix length to a 128-bit mask.
pub fn get_cidr_mask(len: u8) -> Result<u128, ParseErrorKind> {
    if len > MAX_LENGTH {
        return Err(ParseErrorKind::PrefixTooLong {
            prefix: len as u32,
            max: MAX_LENGTH,
        });
    }
    // a shift by the full width is the /0 case
    Ok(u128::MAX
        .checked_shl((MAX_LENGTH - len) as u32)
        .unwrap_or(0))
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, ParseErrorKind> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Highest address in the block. IPv6 has no broadcast, this is only the upper bound.
pub fn last_addr(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, ParseErrorKind> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv6Addr::from((u128::from(addr) & mask) | !mask))
}

/// True when `addr` lies inside `network/len`.
pub fn contains(network: Ipv6Addr, len: u8, addr: Ipv6Addr) -> bool {
    match get_cidr_mask(len) {
        Ok(mask) => u128::from(addr) & mask == u128::from(network) & mask,
        Err(_) => false,
    }
}

/// Parse colon-hextet IPv6 text, with optional `::` compression and a dotted IPv4 tail.
pub fn parse_addr(text: &str) -> Result<Ipv6Addr, ParseErrorKind> {
    let (head, tail) = match text.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return Err(ParseErrorKind::InvalidSyntax(format!(
                    "'::' may appear only once in '{text}'"
                )));
            }
            (head, Some(tail))
        }
        None => (text, None),
    };

    let head_groups = parse_groups(head, tail.is_none())?;
    let tail_groups = match tail {
        Some(tail) => parse_groups(tail, true)?,
        None => Vec::new(),
    };

    let given = head_groups.len() + tail_groups.len();
    let groups = match tail {
        Some(_) if given < HEXTETS => {
            let zeros = HEXTETS - given;
            let mut groups = head_groups;
            groups.extend(std::iter::repeat(0).take(zeros));
            groups.extend(tail_groups);
            groups
        }
        None if given == HEXTETS => head_groups,
        _ => {
            return Err(ParseErrorKind::InvalidSyntax(format!(
                "expected {HEXTETS} hextets in '{text}', found {given}"
            )))
        }
    };

    let bits = groups
        .iter()
        .fold(0u128, |acc, group| (acc << 16) | *group as u128);
    Ok(Ipv6Addr::from(bits))
}

/// Parse one side of a `::` split into 16-bit groups.
///
/// `may_end_in_v4` allows the final group to be dotted IPv4, which expands to two hextets.
fn parse_groups(side: &str, may_end_in_v4: bool) -> Result<Vec<u16>, ParseErrorKind> {
    if side.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = side.split(':').collect();
    let mut groups = Vec::with_capacity(parts.len() + 1);
    for (i, part) in parts.iter().enumerate() {
        let is_last = i + 1 == parts.len();
        if part.contains('.') {
            if !(is_last && may_end_in_v4) {
                return Err(ParseErrorKind::InvalidSyntax(format!(
                    "embedded IPv4 '{part}' must be the last group"
                )));
            }
            let v4 = u32::from(ipv4::parse_addr(part)?);
            groups.push((v4 >> 16) as u16);
            groups.push(v4 as u16);
        } else {
            groups.push(parse_hextet(part)?);
        }
    }
    Ok(groups)
}

fn parse_hextet(part: &str) -> Result<u16, ParseErrorKind> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseErrorKind::InvalidSyntax(format!(
            "hextet '{part}' is not hexadecimal"
        )));
    }
    if part.len() > 4 {
        return Err(ParseErrorKind::HextetOutOfRange(part.to_string()));
    }
    u16::from_str_radix(part, 16).map_err(|_| ParseErrorKind::HextetOutOfRange(part.to_string()))
}
