use std::sync::Arc;

use llkv_result::Result;
use llkv_types::{ColumnIndex, ColumnType, PartitionIndex, RowIndex, ScanDirection};

use crate::memory::ColumnMemory;

/// Symbol key stored for null values.
pub const NULL_SYMBOL_KEY: i32 = i32::MIN;

/// Half-open row interval `[lo, hi)` within one partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub partition_index: PartitionIndex,
    pub lo: RowIndex,
    pub hi: RowIndex,
}

impl RowRange {
    #[inline]
    pub fn new(partition_index: PartitionIndex, lo: RowIndex, hi: RowIndex) -> Self {
        Self {
            partition_index,
            lo,
            hi,
        }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.hi.saturating_sub(self.lo)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }
}

/// Read access to a partitioned, column-oriented table.
///
/// Implementations own the mappings; everything handed out is read-only and
/// may be shared by any number of concurrently active cursors.
pub trait TableAccessor: Send + Sync {
    fn partition_count(&self) -> usize;

    fn partition_row_count(&self, partition: PartitionIndex) -> Result<RowIndex>;

    /// Sum of row counts across all partitions.
    fn total_row_count(&self) -> u64;

    fn column_count(&self) -> usize;

    fn column_type(&self, column: ColumnIndex) -> Result<ColumnType>;

    /// First row of `partition` that has real storage for `column`.
    ///
    /// Rows below the top are implicit nulls with no backing memory.
    fn column_top(&self, partition: PartitionIndex, column: ColumnIndex) -> Result<RowIndex>;

    /// Memory for rows `[top, row_count)` of `column` in `partition`.
    fn column_memory(
        &self,
        partition: PartitionIndex,
        column: ColumnIndex,
    ) -> Result<ColumnMemory<'_>>;

    /// Shared dictionary for a symbol column.
    fn symbol_table(&self, column: ColumnIndex) -> Result<Arc<dyn StaticSymbolTable>>;

    /// Independent dictionary instance for a symbol column, safe to hand to
    /// another worker.
    fn new_symbol_table(&self, column: ColumnIndex) -> Result<Box<dyn SymbolTable>>;

    fn bitmap_index_reader(
        &self,
        partition: PartitionIndex,
        column: ColumnIndex,
        direction: ScanDirection,
    ) -> Result<Arc<dyn BitmapIndexReader>>;
}

/// Upstream iterator of candidate row ranges, one partition at a time.
pub trait RowRangeSource: Send {
    /// Next range to visit, or `None` when the source is exhausted.
    fn next_range(&mut self) -> Result<Option<RowRange>>;

    /// Rewind so the next call to [`next_range`](Self::next_range) starts over.
    fn reset_to_start(&mut self);

    /// Table the ranges refer to.
    fn table(&self) -> &Arc<dyn TableAccessor>;
}

/// Key to value lookup for dictionary-encoded columns.
pub trait SymbolTable: Send {
    fn value_of(&self, key: i32) -> Option<&str>;
}

/// Dictionary shared between readers of one table.
pub trait StaticSymbolTable: SymbolTable + Sync {
    fn key_of(&self, value: &str) -> Option<i32>;

    fn symbol_count(&self) -> usize;

    fn contains_null_value(&self) -> bool;
}

/// Per-partition posting lists for an indexed symbol column.
pub trait BitmapIndexReader: Send + Sync {
    fn direction(&self) -> ScanDirection;

    /// Rows in `[lo, hi)` holding `key`, ordered by the reader's direction.
    fn row_cursor(
        &self,
        key: i32,
        lo: RowIndex,
        hi: RowIndex,
    ) -> Box<dyn Iterator<Item = RowIndex> + '_>;

    fn key_count(&self) -> usize;
}
