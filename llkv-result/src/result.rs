use crate::error::Error;

/// Shorthand for `std::result::Result<T, llkv_result::Error>`.
///
/// Cursor, selection, driver and table accessor operations all return this
/// type. Exhausted cursors report `Ok(None)` rather than an error.
pub type Result<T> = std::result::Result<T, Error>;
