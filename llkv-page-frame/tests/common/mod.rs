#![allow(dead_code)]

use std::sync::Arc;

use llkv_page_frame::{ColumnPage, ColumnSelection, PageFrameConfig, PageFrameCursor};
use llkv_storage::{PartitionRangeSource, TableAccessor, address_of};
use llkv_storage::{ColumnMemory, MemTable};
use llkv_types::{PartitionIndex, RowIndex, ScanDirection};

/// Owned copy of a frame, taken before the cursor advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub partition: PartitionIndex,
    pub lo: RowIndex,
    pub hi: RowIndex,
    pub pages: Vec<ColumnPage>,
}

pub fn drain(cursor: &mut PageFrameCursor) -> Vec<FrameSnapshot> {
    let mut out = Vec::new();
    while let Some(frame) = cursor.next_frame().expect("next_frame") {
        out.push(FrameSnapshot {
            partition: frame.partition_index(),
            lo: frame.partition_lo(),
            hi: frame.partition_hi(),
            pages: frame.pages().to_vec(),
        });
    }
    out
}

pub fn bounds(frames: &[FrameSnapshot]) -> Vec<(PartitionIndex, RowIndex, RowIndex)> {
    frames.iter().map(|f| (f.partition, f.lo, f.hi)).collect()
}

pub fn share(table: MemTable) -> (Arc<MemTable>, Arc<dyn TableAccessor>) {
    let table = Arc::new(table);
    let dyn_table: Arc<dyn TableAccessor> = table.clone();
    (table, dyn_table)
}

/// Cursor over every column in `columns`, attached to a full-partition scan.
pub fn full_scan_cursor(
    table: &Arc<dyn TableAccessor>,
    columns: &[usize],
    config: PageFrameConfig,
    direction: ScanDirection,
) -> PageFrameCursor {
    let selection = ColumnSelection::from_table(table.as_ref(), columns).expect("selection");
    let mut cursor = PageFrameCursor::new(selection, config, direction).expect("cursor");
    cursor
        .attach(Box::new(PartitionRangeSource::new(
            Arc::clone(table),
            direction,
        )))
        .expect("attach");
    cursor
}

/// Base addresses of a column's vectors: `(data, aux)`.
pub fn base_addresses(
    table: &MemTable,
    partition: PartitionIndex,
    column: usize,
) -> Option<(u64, u64)> {
    match table.column_memory(partition, column).expect("column memory") {
        ColumnMemory::Fixed { data } => Some((address_of(data), 0)),
        ColumnMemory::Variable { data, aux } => Some((address_of(data), address_of(aux))),
        ColumnMemory::AllNull => None,
    }
}

/// Accessor that misreports selected metadata of an inner [`MemTable`].
pub struct OverrideTable {
    pub inner: Arc<MemTable>,
    /// `(partition, column, top)` reported instead of the real top.
    pub top: Option<(PartitionIndex, usize, RowIndex)>,
    /// `(partition, column)` whose memory is reported as all-null.
    pub all_null: Option<(PartitionIndex, usize)>,
    /// `(partition, column, bytes)` mapped length cap for a fixed column.
    pub truncate: Option<(PartitionIndex, usize, usize)>,
}

impl OverrideTable {
    pub fn new(inner: Arc<MemTable>) -> Self {
        Self {
            inner,
            top: None,
            all_null: None,
            truncate: None,
        }
    }
}

impl TableAccessor for OverrideTable {
    fn partition_count(&self) -> usize {
        self.inner.partition_count()
    }

    fn partition_row_count(&self, partition: PartitionIndex) -> llkv_result::Result<RowIndex> {
        self.inner.partition_row_count(partition)
    }

    fn total_row_count(&self) -> u64 {
        self.inner.total_row_count()
    }

    fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    fn column_type(&self, column: usize) -> llkv_result::Result<llkv_types::ColumnType> {
        self.inner.column_type(column)
    }

    fn column_top(
        &self,
        partition: PartitionIndex,
        column: usize,
    ) -> llkv_result::Result<RowIndex> {
        match self.top {
            Some((p, c, top)) if p == partition && c == column => Ok(top),
            _ => self.inner.column_top(partition, column),
        }
    }

    fn column_memory(
        &self,
        partition: PartitionIndex,
        column: usize,
    ) -> llkv_result::Result<ColumnMemory<'_>> {
        if self.all_null == Some((partition, column)) {
            return Ok(ColumnMemory::AllNull);
        }
        let memory = self.inner.column_memory(partition, column)?;
        match (self.truncate, memory) {
            (Some((p, c, len)), ColumnMemory::Fixed { data }) if p == partition && c == column => {
                Ok(ColumnMemory::Fixed {
                    data: &data[..len.min(data.len())],
                })
            }
            _ => Ok(memory),
        }
    }

    fn symbol_table(
        &self,
        column: usize,
    ) -> llkv_result::Result<Arc<dyn llkv_storage::StaticSymbolTable>> {
        self.inner.symbol_table(column)
    }

    fn new_symbol_table(
        &self,
        column: usize,
    ) -> llkv_result::Result<Box<dyn llkv_storage::SymbolTable>> {
        self.inner.new_symbol_table(column)
    }

    fn bitmap_index_reader(
        &self,
        partition: PartitionIndex,
        column: usize,
        direction: ScanDirection,
    ) -> llkv_result::Result<Arc<dyn llkv_storage::BitmapIndexReader>> {
        self.inner.bitmap_index_reader(partition, column, direction)
    }
}
