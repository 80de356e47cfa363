//! Subnet analysis.
//!
//! - [`parse_and_classify`] - one CIDR string to a [`crate::models::SubnetDescriptor`]
//! - [`analyze_batch`] - newline-delimited input, failures collected per line
//! - [`classify`] - address class and special-purpose block tables

mod batch;
pub mod classify;
mod parse;

pub use batch::{analyze_batch, BatchError, BatchReport};
pub use parse::parse_and_classify;
