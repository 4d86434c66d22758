//! Columns a cursor materializes, fixed for the cursor's lifetime.

use std::fmt;

use llkv_result::{Error, Result};
use llkv_storage::{ColumnTypeDriver, TableAccessor, driver_for};
use llkv_types::{ColumnIndex, ColumnType, DEFAULT_NULL_SHIFT, MAX_COLUMN_SHIFT};

/// Physical shape of a selected column, decided once at selection time.
#[derive(Clone, Copy)]
pub enum ColumnKind {
    /// One flat vector of `1 << shift`-byte elements.
    Fixed { shift: u8 },
    /// Auxiliary + data vectors addressed through a driver.
    Variable { driver: &'static dyn ColumnTypeDriver },
}

impl ColumnKind {
    pub fn fixed(shift: u8) -> Result<Self> {
        if shift > MAX_COLUMN_SHIFT {
            return Err(Error::InvalidArgumentError(format!(
                "column shift {shift} exceeds {MAX_COLUMN_SHIFT}"
            )));
        }
        Ok(ColumnKind::Fixed { shift })
    }

    pub fn variable(driver: &'static dyn ColumnTypeDriver) -> Self {
        ColumnKind::Variable { driver }
    }

    pub fn for_type(column_type: ColumnType) -> Result<Self> {
        if let Some(shift) = column_type.fixed_shift() {
            return Self::fixed(shift);
        }
        driver_for(column_type)
            .map(Self::variable)
            .ok_or_else(|| Error::Internal(format!("no column type driver for {column_type}")))
    }

    /// Element shift for fixed-width columns.
    #[inline]
    pub fn shift(&self) -> Option<u8> {
        match self {
            ColumnKind::Fixed { shift } => Some(*shift),
            ColumnKind::Variable { .. } => None,
        }
    }

    /// Shift used to size implicit-null spans.
    #[inline]
    pub fn null_shift(&self) -> u8 {
        self.shift().unwrap_or(DEFAULT_NULL_SHIFT)
    }
}

impl fmt::Debug for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Fixed { shift } => f.debug_struct("Fixed").field("shift", shift).finish(),
            ColumnKind::Variable { driver } => f
                .debug_struct("Variable")
                .field("driver", &driver.name())
                .finish(),
        }
    }
}

/// Ordered table columns plus their kinds. Position `i` in the selection is
/// the column index page frames and symbol lookups are keyed by.
#[derive(Clone, Debug)]
pub struct ColumnSelection {
    column_indexes: Vec<ColumnIndex>,
    kinds: Vec<ColumnKind>,
}

impl ColumnSelection {
    pub fn new(column_indexes: Vec<ColumnIndex>, kinds: Vec<ColumnKind>) -> Result<Self> {
        if column_indexes.len() != kinds.len() {
            return Err(Error::InvalidArgumentError(format!(
                "column selection has {} indexes but {} kinds",
                column_indexes.len(),
                kinds.len()
            )));
        }
        Ok(Self {
            column_indexes,
            kinds,
        })
    }

    /// Select `column_indexes` of `table`, deriving each kind from metadata.
    pub fn from_table(table: &dyn TableAccessor, column_indexes: &[ColumnIndex]) -> Result<Self> {
        let kinds = column_indexes
            .iter()
            .map(|&idx| ColumnKind::for_type(table.column_type(idx)?))
            .collect::<Result<Vec<_>>>()?;
        Self::new(column_indexes.to_vec(), kinds)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.column_indexes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.column_indexes.is_empty()
    }

    /// Table column behind selected column `position`.
    pub fn column_index(&self, position: usize) -> Result<ColumnIndex> {
        self.column_indexes.get(position).copied().ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "selected column {position} out of range for {} columns",
                self.len()
            ))
        })
    }

    pub fn kind(&self, position: usize) -> Option<&ColumnKind> {
        self.kinds.get(position)
    }

    pub fn column_indexes(&self) -> &[ColumnIndex] {
        &self.column_indexes
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnIndex, &ColumnKind)> + '_ {
        self.column_indexes.iter().copied().zip(self.kinds.iter())
    }
}
