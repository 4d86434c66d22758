use std::num::NonZeroUsize;

use llkv_result::{Error, Result};

/// Default lower bound on rows per page frame.
pub const DEFAULT_PAGE_FRAME_MIN_ROWS: u64 = 100_000;

/// Default upper bound on rows per page frame.
pub const DEFAULT_PAGE_FRAME_MAX_ROWS: u64 = 1_000_000;

/// Sizing policy for page frames.
///
/// Each upstream row range is divided by `worker_count` so a worker pool can
/// process disjoint frames concurrently; the result is clamped to
/// `[min_rows, max_rows]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageFrameConfig {
    pub worker_count: usize,
    pub min_rows: u64,
    pub max_rows: u64,
}

impl Default for PageFrameConfig {
    fn default() -> Self {
        Self {
            worker_count: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            min_rows: DEFAULT_PAGE_FRAME_MIN_ROWS,
            max_rows: DEFAULT_PAGE_FRAME_MAX_ROWS,
        }
    }
}

impl PageFrameConfig {
    pub fn new(worker_count: usize, min_rows: u64, max_rows: u64) -> Self {
        Self {
            worker_count,
            min_rows,
            max_rows,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_min_rows(mut self, min_rows: u64) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn with_max_rows(mut self, max_rows: u64) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::invalid_argument("page frame worker count must be positive"));
        }
        if self.min_rows == 0 {
            return Err(Error::invalid_argument("page frame min rows must be positive"));
        }
        if self.min_rows > self.max_rows {
            return Err(Error::InvalidArgumentError(format!(
                "page frame min rows {} exceeds max rows {}",
                self.min_rows, self.max_rows
            )));
        }
        Ok(())
    }

    /// Row cap for frames cut from a range of `range_len` rows.
    #[inline]
    pub fn row_limit(&self, range_len: u64) -> u64 {
        (range_len / self.worker_count as u64).clamp(self.min_rows, self.max_rows)
    }
}
