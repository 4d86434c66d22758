//! Page frames: directly addressed slices of one partition.

use std::fmt;
use std::sync::Arc;

use llkv_result::{Error, Result};
use llkv_storage::{BitmapIndexReader, TableAccessor};
use llkv_types::{FrameRowId, PartitionIndex, RowIndex, ScanDirection};

use crate::selection::ColumnSelection;

/// Memory to read for one selected column of a frame.
///
/// Fixed-width columns only use `address`/`size`. Variable-width columns use
/// `address`/`size` for the data vector and `aux_address`/`aux_size` for the
/// auxiliary vector. An `address` of zero means there is nothing to read;
/// `size` then still spans the implicit nulls (or is zero for a fully inlined
/// variable-width slice).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnPage {
    pub address: u64,
    pub size: u64,
    pub aux_address: u64,
    pub aux_size: u64,
}

impl ColumnPage {
    /// Page for a slice with no backing storage.
    #[inline]
    pub fn null(size: u64) -> Self {
        Self {
            address: 0,
            size,
            aux_address: 0,
            aux_size: 0,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.address == 0 && self.aux_address == 0
    }
}

/// A contiguous row slice `[partition_lo, partition_hi)` of one partition,
/// with one [`ColumnPage`] per selected column.
///
/// Frames are owned by their cursor and rewritten in place on every advance.
/// The borrow returned by
/// [`PageFrameCursor::next_frame`](crate::PageFrameCursor::next_frame) ends
/// before the next advance, but the raw addresses do not: a caller that copies
/// them out must stop using them once the cursor moves on.
pub struct PageFrame {
    partition_index: PartitionIndex,
    partition_lo: RowIndex,
    partition_hi: RowIndex,
    pages: Vec<ColumnPage>,
    selection: Arc<ColumnSelection>,
    table: Option<Arc<dyn TableAccessor>>,
    current: bool,
}

impl PageFrame {
    pub(crate) fn new(selection: Arc<ColumnSelection>) -> Self {
        let pages = vec![ColumnPage::default(); selection.len()];
        Self {
            partition_index: 0,
            partition_lo: 0,
            partition_hi: 0,
            pages,
            selection,
            table: None,
            current: false,
        }
    }

    pub(crate) fn bind(&mut self, table: Option<Arc<dyn TableAccessor>>) {
        self.table = table;
        self.clear();
    }

    pub(crate) fn clear(&mut self) {
        self.pages.fill(ColumnPage::default());
        self.partition_index = 0;
        self.partition_lo = 0;
        self.partition_hi = 0;
        self.current = false;
    }

    /// Mark the frame as stale until the next successful `set_bounds`.
    pub(crate) fn invalidate(&mut self) {
        self.current = false;
    }

    pub(crate) fn set_page(&mut self, position: usize, page: ColumnPage) {
        self.pages[position] = page;
    }

    pub(crate) fn set_bounds(&mut self, partition: PartitionIndex, lo: RowIndex, hi: RowIndex) {
        self.partition_index = partition;
        self.partition_lo = lo;
        self.partition_hi = hi;
        self.current = true;
    }

    #[inline]
    pub fn partition_index(&self) -> PartitionIndex {
        self.partition_index
    }

    #[inline]
    pub fn partition_lo(&self) -> RowIndex {
        self.partition_lo
    }

    #[inline]
    pub fn partition_hi(&self) -> RowIndex {
        self.partition_hi
    }

    #[inline]
    pub fn row_count(&self) -> u64 {
        self.partition_hi - self.partition_lo
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.pages.len()
    }

    /// Address of the (data) page of selected column `column`. Panics if
    /// `column` is outside the selection, like slice indexing.
    #[inline]
    pub fn page_address(&self, column: usize) -> u64 {
        self.pages[column].address
    }

    #[inline]
    pub fn page_size(&self, column: usize) -> u64 {
        self.pages[column].size
    }

    #[inline]
    pub fn auxiliary_page_address(&self, column: usize) -> u64 {
        self.pages[column].aux_address
    }

    #[inline]
    pub fn auxiliary_page_size(&self, column: usize) -> u64 {
        self.pages[column].aux_size
    }

    #[inline]
    pub fn column_page(&self, column: usize) -> &ColumnPage {
        &self.pages[column]
    }

    pub fn pages(&self) -> &[ColumnPage] {
        &self.pages
    }

    /// Element shift of a fixed-width column, `None` for variable width.
    pub fn column_shift_bits(&self, column: usize) -> Option<u8> {
        self.selection.kind(column).and_then(|kind| kind.shift())
    }

    #[inline]
    pub fn is_column_null(&self, column: usize) -> bool {
        self.pages[column].is_null()
    }

    pub fn bitmap_index_reader(
        &self,
        column: usize,
        direction: ScanDirection,
    ) -> Result<Arc<dyn BitmapIndexReader>> {
        let table = self.table.as_ref().ok_or(Error::NotAttached)?;
        let column_index = self.selection.column_index(column)?;
        table.bitmap_index_reader(self.partition_index, column_index, direction)
    }

    /// Identifier of the frame's `row_offset`-th row, for update and merge.
    ///
    /// `row_offset` must lie within the frame.
    pub fn row_id(&self, row_offset: u64) -> Result<FrameRowId> {
        if !self.current {
            return Err(Error::invalid_argument("no current page frame"));
        }
        if row_offset >= self.row_count() {
            return Err(Error::InvalidArgumentError(format!(
                "row offset {row_offset} outside frame of {} rows",
                self.row_count()
            )));
        }
        let row = self.partition_lo.checked_add(row_offset).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "row offset {row_offset} overflows frame start {}",
                self.partition_lo
            ))
        })?;
        FrameRowId::encode(self.partition_index, row)
    }
}

impl fmt::Debug for PageFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFrame")
            .field("partition_index", &self.partition_index)
            .field("partition_lo", &self.partition_lo)
            .field("partition_hi", &self.partition_hi)
            .field("pages", &self.pages)
            .field("current", &self.current)
            .finish()
    }
}
