//! Service layer for retail-forecast
//!
//! The data-preparation stages of the pipeline: loading the transaction
//! table, cleaning it into a monthly revenue series and splitting that series
//! into training and test segments.

pub mod cleaning;
pub mod loader;
pub mod split;

pub use cleaning::{clean_and_aggregate, clean_and_aggregate_with_stats, CleaningStats};
pub use loader::{load_transactions, read_transactions};
pub use split::{split_index, time_split};
