//! Shared identifiers and type tags for the LLKV page frame engine.

pub mod column_type;
pub mod ids;

pub use column_type::{ColumnType, DEFAULT_NULL_SHIFT, MAX_COLUMN_SHIFT};
pub use ids::{
    ColumnIndex, FrameRowId, MAX_PARTITION_INDEX, MAX_ROW_OFFSET, PartitionIndex, RowIndex,
};

/// Order in which a scan visits partitions and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScanDirection {
    /// Ascending partition and row order.
    Forward,
    /// Descending partition and row order.
    #[default]
    Backward,
}

impl ScanDirection {
    #[inline]
    pub fn is_backward(self) -> bool {
        matches!(self, ScanDirection::Backward)
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            ScanDirection::Forward => ScanDirection::Backward,
            ScanDirection::Backward => ScanDirection::Forward,
        }
    }
}
