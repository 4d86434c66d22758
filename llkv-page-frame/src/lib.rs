//! Page frame cursors for LLKV column tables.
//!
//! A page frame is a bounded, contiguous row slice of one partition, described
//! by the memory address and byte length of every selected column for those
//! rows. Vectorized operators read frames directly out of mapped memory, and a
//! worker pool processes disjoint frames in parallel.
//!
//! [`PageFrameCursor`] produces frames from the candidate row ranges of a
//! [`RowRangeSource`](llkv_storage::RowRangeSource). It reconciles three
//! constraints while slicing:
//!
//! - frames are capped at [`PageFrameConfig::row_limit`] rows so work spreads
//!   across `worker_count` workers;
//! - a column added after a partition was written has a *top*: rows below it
//!   are implicit nulls with no storage, and no frame may straddle a top;
//! - fixed-width columns are addressed by an element shift, variable-width
//!   columns through their [`ColumnTypeDriver`](llkv_storage::ColumnTypeDriver).
//!
//! ```
//! use std::sync::Arc;
//!
//! use llkv_page_frame::{ColumnSelection, PageFrameConfig, PageFrameCursor};
//! use llkv_storage::{MemColumnMeta, MemTable, PartitionRangeSource, TableAccessor};
//! use llkv_types::{ColumnType, ScanDirection};
//!
//! let mut table = MemTable::new(vec![MemColumnMeta::new("v", ColumnType::Long)]);
//! let p = table.add_partition(100).unwrap();
//! table.set_i64_column(p, 0, 40, &(40..100).collect::<Vec<i64>>()).unwrap();
//! let table: Arc<dyn TableAccessor> = Arc::new(table);
//!
//! let selection = ColumnSelection::from_table(table.as_ref(), &[0]).unwrap();
//! let mut cursor =
//!     PageFrameCursor::backward(selection, PageFrameConfig::new(2, 10, 50)).unwrap();
//! cursor
//!     .attach(Box::new(PartitionRangeSource::new(table, ScanDirection::Backward)))
//!     .unwrap();
//!
//! let mut bounds = Vec::new();
//! while let Some(frame) = cursor.next_frame().unwrap() {
//!     bounds.push((frame.partition_lo(), frame.partition_hi()));
//! }
//! assert_eq!(bounds, vec![(50, 100), (40, 50), (0, 40)]);
//! ```

mod addressing;
pub mod config;
pub mod cursor;
pub mod frame;
pub mod selection;

pub use config::{DEFAULT_PAGE_FRAME_MAX_ROWS, DEFAULT_PAGE_FRAME_MIN_ROWS, PageFrameConfig};
pub use cursor::PageFrameCursor;
pub use frame::{ColumnPage, PageFrame};
pub use llkv_result::{Error, Result};
pub use selection::{ColumnKind, ColumnSelection};
