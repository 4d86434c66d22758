use std::sync::Arc;

use llkv_result::Result;
use llkv_types::{PartitionIndex, ScanDirection};

use crate::traits::{RowRange, RowRangeSource, TableAccessor};

/// Yields every non-empty partition in full, in scan direction order.
pub struct PartitionRangeSource {
    table: Arc<dyn TableAccessor>,
    direction: ScanDirection,
    visited: usize,
}

impl PartitionRangeSource {
    pub fn new(table: Arc<dyn TableAccessor>, direction: ScanDirection) -> Self {
        Self {
            table,
            direction,
            visited: 0,
        }
    }

    pub fn direction(&self) -> ScanDirection {
        self.direction
    }
}

impl RowRangeSource for PartitionRangeSource {
    fn next_range(&mut self) -> Result<Option<RowRange>> {
        let count = self.table.partition_count();
        while self.visited < count {
            let position = match self.direction {
                ScanDirection::Forward => self.visited,
                ScanDirection::Backward => count - 1 - self.visited,
            };
            self.visited += 1;
            let partition = position as PartitionIndex;
            let row_count = self.table.partition_row_count(partition)?;
            if row_count > 0 {
                return Ok(Some(RowRange::new(partition, 0, row_count)));
            }
        }
        Ok(None)
    }

    fn reset_to_start(&mut self) {
        self.visited = 0;
    }

    fn table(&self) -> &Arc<dyn TableAccessor> {
        &self.table
    }
}

/// Yields a fixed list of ranges in the order given, e.g. the survivors of
/// interval pruning on a designated timestamp.
pub struct IntervalRangeSource {
    table: Arc<dyn TableAccessor>,
    ranges: Vec<RowRange>,
    position: usize,
}

impl IntervalRangeSource {
    pub fn new(table: Arc<dyn TableAccessor>, ranges: Vec<RowRange>) -> Self {
        Self {
            table,
            ranges,
            position: 0,
        }
    }
}

impl RowRangeSource for IntervalRangeSource {
    fn next_range(&mut self) -> Result<Option<RowRange>> {
        let next = self.ranges.get(self.position).copied();
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    fn reset_to_start(&mut self) {
        self.position = 0;
    }

    fn table(&self) -> &Arc<dyn TableAccessor> {
        &self.table
    }
}
