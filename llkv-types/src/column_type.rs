use std::fmt;

/// Largest element shift a fixed-width column may use (64-byte elements).
pub const MAX_COLUMN_SHIFT: u8 = 6;

/// Shift applied to implicit-null spans of variable-width columns.
///
/// Variable-width columns have no element size, so a null region below their
/// top is reported in 8-byte-per-row units.
pub const DEFAULT_NULL_SHIFT: u8 = 3;

/// Logical column type as recorded in table metadata.
///
/// Fixed-width types are stored as one flat vector whose element size is a
/// power of two; [`ColumnType::fixed_shift`] returns that power. Variable-width
/// types are stored as an auxiliary vector plus a data vector and have no
/// shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Float,
    /// Dictionary-encoded string stored as `i32` keys.
    Symbol,
    Long,
    Date,
    Timestamp,
    Double,
    Uuid,
    Long256,
    /// Length-prefixed UTF-16/UTF-8 payload addressed by an offset vector.
    String,
    /// Length-prefixed raw bytes addressed by an offset vector.
    Binary,
    /// UTF-8 payload with small values inlined in the auxiliary vector.
    Varchar,
}

impl ColumnType {
    /// `log2` of the element size for fixed-width types, `None` otherwise.
    #[inline]
    pub fn fixed_shift(self) -> Option<u8> {
        match self {
            ColumnType::Boolean | ColumnType::Byte => Some(0),
            ColumnType::Short | ColumnType::Char => Some(1),
            ColumnType::Int | ColumnType::Float | ColumnType::Symbol => Some(2),
            ColumnType::Long | ColumnType::Date | ColumnType::Timestamp | ColumnType::Double => {
                Some(3)
            }
            ColumnType::Uuid => Some(4),
            ColumnType::Long256 => Some(5),
            ColumnType::String | ColumnType::Binary | ColumnType::Varchar => None,
        }
    }

    #[inline]
    pub fn is_variable_width(self) -> bool {
        self.fixed_shift().is_none()
    }

    #[inline]
    pub fn is_symbol(self) -> bool {
        matches!(self, ColumnType::Symbol)
    }

    /// Shift used when reporting an implicit-null span of this type.
    #[inline]
    pub fn null_shift(self) -> u8 {
        self.fixed_shift().unwrap_or(DEFAULT_NULL_SHIFT)
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Byte => "BYTE",
            ColumnType::Short => "SHORT",
            ColumnType::Char => "CHAR",
            ColumnType::Int => "INT",
            ColumnType::Float => "FLOAT",
            ColumnType::Symbol => "SYMBOL",
            ColumnType::Long => "LONG",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Double => "DOUBLE",
            ColumnType::Uuid => "UUID",
            ColumnType::Long256 => "LONG256",
            ColumnType::String => "STRING",
            ColumnType::Binary => "BINARY",
            ColumnType::Varchar => "VARCHAR",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
