//! Output formatting for subnet data.
//!
//! This module handles formatting and outputting subnet data:
//! - [`csv`] - CSV export of history
//! - [`terminal`] - Labeled terminal output with colors

mod csv;
mod terminal;

pub use csv::write_history_csv;
pub use terminal::{
    format_field, render_batch, render_descriptor, render_history, render_suggestion,
    BLOCK_DELIMITER,
};
