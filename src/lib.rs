//! Rebuilds a structured catalog from the raw cell matrix of a tracker
//! spreadsheet.
//!
//! [`tab::scan`] classifies rows into era headers, sub-era headers, data
//! entries and the end-of-data legend; [`column`] and [`name`] decode the
//! notational conventions inside individual cells.

pub mod column;
pub mod config;
pub mod dump;
pub mod entry;
pub mod era;
pub mod error;
pub mod name;
pub mod tab;
pub mod tracker;

pub use column::{MonthTable, Range, Row};
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use tab::{TabConfig, scan};
pub use tracker::{InMemoryFetcher, RawValuesFetcher, Tracker};
