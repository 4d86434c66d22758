//! In-memory table accessor and row-range sources.
//!
//! `MemTable` keeps every column as owned byte vectors laid out exactly the way
//! a mapped partition would be: fixed-width columns as one flat vector,
//! variable-width columns as data + auxiliary vectors, rows below a column's
//! top absent. Once wrapped in an `Arc` its buffers never move, so addresses
//! reported in page frames stay valid for the table's lifetime.

use std::sync::Arc;

use croaring::Treemap;
use llkv_result::{Error, Result};
use llkv_types::{
    ColumnIndex, ColumnType, MAX_PARTITION_INDEX, PartitionIndex, RowIndex, ScanDirection,
};
use rustc_hash::FxHashMap;

use crate::driver::driver_for;
use crate::memory::ColumnMemory;
use crate::traits::{
    BitmapIndexReader, NULL_SYMBOL_KEY, StaticSymbolTable, SymbolTable, TableAccessor,
};

mod bitmap;
mod range_source;
mod symbol;

use bitmap::PostingLists;
pub use bitmap::MemBitmapIndexReader;
pub use range_source::{IntervalRangeSource, PartitionRangeSource};
pub use symbol::MemSymbolTable;

/// Column definition for a [`MemTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemColumnMeta {
    pub name: String,
    pub column_type: ColumnType,
    /// Maintain bitmap indexes for this (symbol) column.
    pub indexed: bool,
}

impl MemColumnMeta {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            indexed: false,
        }
    }

    pub fn with_index(mut self) -> Self {
        self.indexed = true;
        self
    }
}

enum MemColumnStorage {
    Fixed(Vec<u8>),
    Variable { data: Vec<u8>, aux: Vec<u8> },
    AllNull,
}

struct MemColumn {
    top: RowIndex,
    storage: MemColumnStorage,
}

struct MemPartition {
    row_count: RowIndex,
    columns: Vec<MemColumn>,
    indexes: FxHashMap<ColumnIndex, Arc<PostingLists>>,
}

/// Partitioned column table held in process memory.
pub struct MemTable {
    columns: Vec<MemColumnMeta>,
    partitions: Vec<MemPartition>,
    symbols: FxHashMap<ColumnIndex, Arc<MemSymbolTable>>,
}

impl MemTable {
    pub fn new(columns: Vec<MemColumnMeta>) -> Self {
        let symbols = columns
            .iter()
            .enumerate()
            .filter(|(_, meta)| meta.column_type.is_symbol())
            .map(|(idx, _)| (idx, Arc::new(MemSymbolTable::new())))
            .collect();
        Self {
            columns,
            partitions: Vec::new(),
            symbols,
        }
    }

    /// Append a partition of `row_count` rows in which every column starts out
    /// all-null.
    pub fn add_partition(&mut self, row_count: RowIndex) -> Result<PartitionIndex> {
        let index = PartitionIndex::try_from(self.partitions.len())
            .ok()
            .filter(|idx| *idx <= MAX_PARTITION_INDEX)
            .ok_or_else(|| Error::invalid_argument("partition limit reached"))?;
        let columns = (0..self.columns.len())
            .map(|_| MemColumn {
                top: row_count,
                storage: MemColumnStorage::AllNull,
            })
            .collect();
        self.partitions.push(MemPartition {
            row_count,
            columns,
            indexes: FxHashMap::default(),
        });
        tracing::trace!(partition = index, row_count, "mem table partition added");
        Ok(index)
    }

    /// Store raw fixed-width bytes for rows `[top, row_count)`.
    pub fn set_fixed_column(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let column_type = self.meta(column)?.column_type;
        let shift = column_type.fixed_shift().ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "column {column} is {column_type}, not fixed width"
            ))
        })?;
        let rows = self.stored_rows(partition, top)?;
        if bytes.len() as u64 != rows << shift {
            return Err(Error::InvalidArgumentError(format!(
                "column {column} expects {} bytes for {rows} rows, got {}",
                rows << shift,
                bytes.len()
            )));
        }
        self.put(partition, column, top, MemColumnStorage::Fixed(bytes))
    }

    pub fn set_i64_column(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        values: &[i64],
    ) -> Result<()> {
        let bytes = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.set_fixed_column(partition, column, top, bytes)
    }

    pub fn set_i32_column(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        values: &[i32],
    ) -> Result<()> {
        let bytes = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.set_fixed_column(partition, column, top, bytes)
    }

    /// Encode `values` for rows `[top, row_count)` with the column's driver.
    pub fn set_var_column(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        values: &[Option<&[u8]>],
    ) -> Result<()> {
        let column_type = self.meta(column)?.column_type;
        let driver = driver_for(column_type).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "column {column} is {column_type}, not variable width"
            ))
        })?;
        self.check_value_count(partition, column, top, values.len())?;
        let mut data = Vec::new();
        let mut aux = Vec::with_capacity(driver.aux_vector_size(values.len() as u64) as usize);
        for value in values {
            driver.append(&mut data, &mut aux, *value)?;
        }
        self.put(
            partition,
            column,
            top,
            MemColumnStorage::Variable { data, aux },
        )
    }

    /// Intern `values` into the column's dictionary and store their keys for
    /// rows `[top, row_count)`. Indexed columns also get posting lists; rows
    /// below the top are indexed as nulls.
    pub fn set_symbol_column(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        values: &[Option<&str>],
    ) -> Result<()> {
        let meta = self.meta(column)?.clone();
        if !meta.column_type.is_symbol() {
            return Err(Error::InvalidArgumentError(format!(
                "column {column} is {}, not SYMBOL",
                meta.column_type
            )));
        }
        self.check_value_count(partition, column, top, values.len())?;

        let dictionary = Arc::make_mut(self.symbols.entry(column).or_default());
        let keys: Vec<i32> = values.iter().map(|v| dictionary.intern(*v)).collect();
        if top > 0 {
            dictionary.mark_null();
        }

        if meta.indexed {
            let mut postings = PostingLists::default();
            if top > 0 {
                let nulls = postings.entry(NULL_SYMBOL_KEY).or_insert_with(Treemap::new);
                (0..top).for_each(|row| nulls.add(row));
            }
            for (i, key) in keys.iter().enumerate() {
                postings
                    .entry(*key)
                    .or_insert_with(Treemap::new)
                    .add(top + i as u64);
            }
            self.partition_mut(partition)?
                .indexes
                .insert(column, Arc::new(postings));
        }

        let bytes = keys.iter().flat_map(|k| k.to_le_bytes()).collect();
        self.set_fixed_column(partition, column, top, bytes)
    }

    /// Mark a column as having no storage at all in `partition`.
    pub fn set_all_null(&mut self, partition: PartitionIndex, column: ColumnIndex) -> Result<()> {
        self.meta(column)?;
        let row_count = self.partition(partition)?.row_count;
        self.put(partition, column, row_count, MemColumnStorage::AllNull)
    }

    pub fn column_meta(&self) -> &[MemColumnMeta] {
        &self.columns
    }

    fn meta(&self, column: ColumnIndex) -> Result<&MemColumnMeta> {
        self.columns.get(column).ok_or(Error::NotFound)
    }

    fn partition(&self, partition: PartitionIndex) -> Result<&MemPartition> {
        self.partitions
            .get(partition as usize)
            .ok_or(Error::NotFound)
    }

    fn partition_mut(&mut self, partition: PartitionIndex) -> Result<&mut MemPartition> {
        self.partitions
            .get_mut(partition as usize)
            .ok_or(Error::NotFound)
    }

    fn column(&self, partition: PartitionIndex, column: ColumnIndex) -> Result<&MemColumn> {
        self.partition(partition)?
            .columns
            .get(column)
            .ok_or(Error::NotFound)
    }

    fn stored_rows(&self, partition: PartitionIndex, top: RowIndex) -> Result<RowIndex> {
        let row_count = self.partition(partition)?.row_count;
        row_count.checked_sub(top).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "top {top} exceeds partition {partition} row count {row_count}"
            ))
        })
    }

    fn check_value_count(
        &self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        count: usize,
    ) -> Result<()> {
        let rows = self.stored_rows(partition, top)?;
        if rows != count as u64 {
            return Err(Error::InvalidArgumentError(format!(
                "column {column} expects {rows} values below partition {partition} end, got {count}"
            )));
        }
        Ok(())
    }

    fn put(
        &mut self,
        partition: PartitionIndex,
        column: ColumnIndex,
        top: RowIndex,
        storage: MemColumnStorage,
    ) -> Result<()> {
        let slot = self
            .partition_mut(partition)?
            .columns
            .get_mut(column)
            .ok_or(Error::NotFound)?;
        *slot = MemColumn { top, storage };
        Ok(())
    }
}

impl TableAccessor for MemTable {
    fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    fn partition_row_count(&self, partition: PartitionIndex) -> Result<RowIndex> {
        Ok(self.partition(partition)?.row_count)
    }

    fn total_row_count(&self) -> u64 {
        self.partitions.iter().map(|p| p.row_count).sum()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_type(&self, column: ColumnIndex) -> Result<ColumnType> {
        Ok(self.meta(column)?.column_type)
    }

    fn column_top(&self, partition: PartitionIndex, column: ColumnIndex) -> Result<RowIndex> {
        Ok(self.column(partition, column)?.top)
    }

    fn column_memory(
        &self,
        partition: PartitionIndex,
        column: ColumnIndex,
    ) -> Result<ColumnMemory<'_>> {
        Ok(match &self.column(partition, column)?.storage {
            MemColumnStorage::Fixed(data) => ColumnMemory::Fixed { data },
            MemColumnStorage::Variable { data, aux } => ColumnMemory::Variable { data, aux },
            MemColumnStorage::AllNull => ColumnMemory::AllNull,
        })
    }

    fn symbol_table(&self, column: ColumnIndex) -> Result<Arc<dyn StaticSymbolTable>> {
        let table = self.symbols.get(&column).ok_or(Error::NotFound)?;
        Ok(Arc::clone(table) as Arc<dyn StaticSymbolTable>)
    }

    fn new_symbol_table(&self, column: ColumnIndex) -> Result<Box<dyn SymbolTable>> {
        let table = self.symbols.get(&column).ok_or(Error::NotFound)?;
        Ok(Box::new(MemSymbolTable::clone(table)))
    }

    fn bitmap_index_reader(
        &self,
        partition: PartitionIndex,
        column: ColumnIndex,
        direction: ScanDirection,
    ) -> Result<Arc<dyn BitmapIndexReader>> {
        let postings = self
            .partition(partition)?
            .indexes
            .get(&column)
            .ok_or(Error::NotFound)?;
        Ok(Arc::new(MemBitmapIndexReader::new(
            Arc::clone(postings),
            direction,
        )))
    }
}
