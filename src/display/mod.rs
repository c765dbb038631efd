//! Display formatting for terminal output

pub mod format;

pub use format::{format_count, format_header, format_thousands, separator};
