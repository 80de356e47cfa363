//! Calculation history.
//!
//! - [`HistoryStore`] - append-only local file of [`crate::models::HistoryRecord`]s

mod store;

pub use store::HistoryStore;
