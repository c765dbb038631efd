//! Core data models for retail-forecast
//!
//! Typed records for each pipeline stage: raw transactions as read from the
//! dataset, the calendar month bucket and the monthly series built from it.

pub mod month;
pub mod series;
pub mod transaction;

pub use month::Month;
pub use series::{MonthlyPoint, MonthlySeries};
pub use transaction::{RawTransaction, SaleLine, TransactionTable};
