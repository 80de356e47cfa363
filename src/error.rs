//! Error types for subnet parsing and size suggestion.

use thiserror::Error;

/// Why a piece of address text was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but whitespace was supplied.
    #[error("address is empty")]
    Empty,

    /// The address is not dotted-decimal IPv4 or colon-hextet IPv6.
    #[error("invalid address syntax: {0}")]
    InvalidSyntax(String),

    /// An IPv4 octet does not fit in 0..=255.
    #[error("octet {0} (> 255) not permitted")]
    OctetOutOfRange(String),

    /// An IPv4 octet was written with a leading zero, e.g. `010`.
    #[error("leading zeros are not permitted in octet {0}")]
    LeadingZero(String),

    /// An IPv6 hextet is not 1-4 hex digits.
    #[error("hextet {0} is not 1-4 hex digits")]
    HextetOutOfRange(String),

    /// The prefix after `/` is not a number or a dotted mask.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    /// The prefix is wider than the address family.
    #[error("prefix length /{prefix} exceeds {max} bits")]
    PrefixTooLong {
        /// Prefix given by the caller.
        prefix: u32,
        /// Width of the address family.
        max: u8,
    },

    /// A dotted netmask or host mask with non-contiguous bits.
    #[error("mask {0} is not contiguous")]
    NonContiguousMask(String),
}

/// A CIDR string that could not be analyzed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid IP/Network '{input}': {reason}")]
pub struct ParseError {
    /// The offending text, as supplied.
    pub input: String,
    /// Human readable reason.
    pub reason: ParseErrorKind,
}

impl ParseError {
    pub fn new(input: &str, reason: ParseErrorKind) -> Self {
        ParseError {
            input: input.to_string(),
            reason,
        }
    }
}

/// Errors from training or querying the size suggestion model.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Too few usable history rows to fit a model.
    #[error("Not enough data to train model: {found} rows, need at least {needed}")]
    NotEnoughData {
        /// Rows available.
        found: usize,
        /// Rows required.
        needed: usize,
    },

    /// The least squares system has no unique solution.
    #[error("Regression fit is singular, history has no usable host counts")]
    SingularFit,

    /// No model file has been written yet.
    #[error("No model trained yet, run `train` first")]
    NoModel,
}
