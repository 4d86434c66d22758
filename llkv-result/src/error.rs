use std::fmt;
use thiserror::Error;

/// Unified error type for all LLKV page frame operations.
///
/// This enum covers every failure mode of the scan stack, from caller
/// configuration mistakes to inconsistent metadata reported by the table
/// accessor. Each variant carries enough context to identify the partition
/// and column involved.
///
/// # Error Handling Strategy
///
/// Errors propagate upward through the call stack using Rust's `?` operator.
/// Running out of frames is *not* an error: cursors signal exhaustion with
/// `Ok(None)`.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, allowing errors to be passed between
/// the workers that consume page frames.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or API parameter.
    ///
    /// This error indicates a problem with arguments passed to LLKV APIs:
    /// - A worker count of zero
    /// - A minimum page frame row count larger than the maximum
    /// - Column selections whose index and kind sequences differ in length
    /// - Row ranges with `lo > hi` or reaching past the partition end
    ///
    /// # Recovery
    ///
    /// These are caller bugs. Fix the input and retry the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Partition, column, symbol table or index not found.
    #[error("Storage key not found")]
    NotFound,

    /// A cursor was used after `close()`.
    ///
    /// Closing releases the attached row-range source; any later call other
    /// than another `close()` reports this error instead of touching the
    /// released source.
    #[error("cursor is closed")]
    CursorClosed,

    /// A cursor was advanced or queried before a row-range source was attached.
    #[error("cursor has no attached row-range source")]
    NotAttached,

    /// The table accessor reported a column top beyond the partition row count.
    ///
    /// Slicing with such a top would silently produce wrong values, so the
    /// frame is rejected instead.
    #[error(
        "column {column} in partition {partition} has top {top} beyond partition row count {row_count}"
    )]
    InconsistentColumnTop {
        partition: u32,
        column: usize,
        top: u64,
        row_count: u64,
    },

    /// A computed page slice reaches past the memory mapped for the column.
    #[error(
        "column {column} in partition {partition} needs {required} bytes but only {mapped} are mapped"
    )]
    PageOutOfBounds {
        partition: u32,
        column: usize,
        required: u64,
        mapped: u64,
    },

    /// Internal error indicating a bug or unexpected state.
    ///
    /// This error should never occur during normal operation. It indicates:
    /// - Violated internal invariants
    /// - Corrupt auxiliary vectors read by a column type driver
    /// - Column memory whose shape disagrees with the column selection
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid argument error from any displayable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use llkv_result::Error;
    ///
    /// let err = Error::invalid_argument("worker count must be positive");
    /// assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("worker")));
    /// ```
    #[inline]
    pub fn invalid_argument<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }

    /// Create an internal error from any displayable value.
    #[inline]
    pub fn internal<E: fmt::Display>(err: E) -> Self {
        Error::Internal(err.to_string())
    }
}
