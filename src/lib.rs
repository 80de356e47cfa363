//! IPv4/IPv6 subnet calculator with a local calculation history.
//!
//! - [`analyzer`] - CIDR text to [`models::SubnetDescriptor`], single or batch
//! - [`history`] - append-only store of past calculations
//! - [`suggest`] - prefix length suggestion from history
//! - [`output`] - terminal and CSV rendering
//! - [`commands`] - one entry point per CLI action

pub mod analyzer;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod output;
pub mod suggest;

pub use analyzer::{analyze_batch, parse_and_classify, BatchReport};
pub use config::Config;
pub use error::{ParseError, ParseErrorKind, SuggestError};
pub use history::HistoryStore;
pub use models::{AddressCount, Classification, HistoryRecord, IpVersion, SubnetDescriptor};
