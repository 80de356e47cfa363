//! Subnet size suggestion.
//!
//! - [`regression`] - polynomial least squares up to degree 2
//! - [`SizeModel`] - model trained from history, saved and loaded explicitly
//! - [`closed_form_prefix`] - exact answer the model approximates

mod model;
pub mod regression;

pub use model::{closed_form_prefix, SizeModel, Suggestion, MIN_TRAINING_ROWS, TRAINING_WINDOW};
