//! Utility functions for URL resolution and display formatting.

pub mod format;
pub mod url;

// Re-export commonly used functions at module level
pub use format::{format_size, format_timestamp, truncate_string};
pub use url::resolve_url;
