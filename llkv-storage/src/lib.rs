//! Storage contracts consumed by LLKV page frame cursors.
//!
//! The cursor never maps files itself. It asks a [`TableAccessor`] for column
//! tops and column memory, pulls candidate row ranges from a
//! [`RowRangeSource`], and resolves variable-width offsets through a
//! [`ColumnTypeDriver`]. This crate defines those seams, the concrete drivers
//! for the variable-width encodings, and an in-memory table ([`MemTable`])
//! used by tests, benchmarks and embedders that hold their columns in RAM.

pub mod driver;
pub mod mem;
pub mod memory;
pub mod traits;

pub use driver::{
    ColumnTypeDriver, STRING_DRIVER, StringDriver, VARCHAR_DRIVER, VARCHAR_INLINE_LIMIT,
    VarcharDriver, driver_for,
};
pub use mem::{
    IntervalRangeSource, MemBitmapIndexReader, MemColumnMeta, MemSymbolTable, MemTable,
    PartitionRangeSource,
};
pub use memory::{ColumnMemory, address_of};
pub use traits::{
    BitmapIndexReader, NULL_SYMBOL_KEY, RowRange, RowRangeSource, StaticSymbolTable, SymbolTable,
    TableAccessor,
};
