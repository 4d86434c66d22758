//! Variable-width column type drivers.
//!
//! A variable-width column is stored as two vectors: an auxiliary vector with
//! one fixed-size entry per row, and a data vector holding the payloads. How an
//! auxiliary entry locates its payload differs per encoding, so slicing goes
//! through a [`ColumnTypeDriver`] instead of a fixed element shift.

use std::fmt;

use llkv_result::{Error, Result};
use llkv_types::{ColumnType, RowIndex};

pub mod string;
pub mod varchar;

pub use string::{STRING_DRIVER, StringDriver};
pub use varchar::{VARCHAR_DRIVER, VARCHAR_INLINE_LIMIT, VarcharDriver};

/// Addressing rules for one variable-width encoding.
pub trait ColumnTypeDriver: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Byte offset of `row`'s entry in the auxiliary vector.
    fn aux_vector_offset(&self, row: RowIndex) -> u64;

    /// Bytes of auxiliary vector needed for `row_count` rows.
    fn aux_vector_size(&self, row_count: RowIndex) -> u64;

    /// Size of the data vector covering rows `[0, row]` inclusive.
    fn data_vector_size_through(&self, aux: &[u8], row: RowIndex) -> Result<u64>;

    /// Append one value (`None` for null) to the vectors.
    ///
    /// Fails without touching either vector when the value's length or the
    /// resulting data offset does not fit the encoding.
    fn append(&self, data: &mut Vec<u8>, aux: &mut Vec<u8>, value: Option<&[u8]>) -> Result<()>;

    /// Payload of `row`, where `aux` starts at that slice's first row and
    /// `data` is the data vector from its base address.
    fn decode_row<'a>(
        &self,
        data: &'a [u8],
        aux: &'a [u8],
        row: RowIndex,
    ) -> Result<Option<&'a [u8]>>;
}

/// Driver for a logical type, `None` for fixed-width types.
pub fn driver_for(column_type: ColumnType) -> Option<&'static dyn ColumnTypeDriver> {
    match column_type {
        ColumnType::String | ColumnType::Binary => Some(&STRING_DRIVER),
        ColumnType::Varchar => Some(&VARCHAR_DRIVER),
        _ => None,
    }
}

pub(crate) fn read_u64_le(bytes: &[u8], offset: u64) -> Result<u64> {
    let raw = read_array::<8>(bytes, offset)?;
    Ok(u64::from_le_bytes(raw))
}

pub(crate) fn read_i32_le(bytes: &[u8], offset: u64) -> Result<i32> {
    let raw = read_array::<4>(bytes, offset)?;
    Ok(i32::from_le_bytes(raw))
}

pub(crate) fn read_array<const N: usize>(bytes: &[u8], offset: u64) -> Result<[u8; N]> {
    let start = usize::try_from(offset).map_err(Error::internal)?;
    bytes
        .get(start..start + N)
        .and_then(|s| <[u8; N]>::try_from(s).ok())
        .ok_or_else(|| {
            Error::Internal(format!(
                "read of {N} bytes at offset {offset} overruns vector of {} bytes",
                bytes.len()
            ))
        })
}

pub(crate) fn slice_at(bytes: &[u8], offset: u64, len: u64) -> Result<&[u8]> {
    let start = usize::try_from(offset).map_err(Error::internal)?;
    let len = usize::try_from(len).map_err(Error::internal)?;
    start
        .checked_add(len)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| {
            Error::Internal(format!(
                "payload of {len} bytes at offset {offset} overruns vector of {} bytes",
                bytes.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_lookup_follows_type() {
        assert_eq!(driver_for(ColumnType::String).map(|d| d.name()), Some("string"));
        assert_eq!(driver_for(ColumnType::Binary).map(|d| d.name()), Some("string"));
        assert_eq!(driver_for(ColumnType::Varchar).map(|d| d.name()), Some("varchar"));
        assert!(driver_for(ColumnType::Long).is_none());
    }

    #[test]
    fn reads_reject_overruns() {
        let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0, 9];
        assert_eq!(read_u64_le(&bytes, 0).unwrap(), 1);
        assert!(read_u64_le(&bytes, 2).is_err());
        assert!(slice_at(&bytes, 8, 2).is_err());
        assert_eq!(slice_at(&bytes, 8, 1).unwrap(), &[9]);
    }
}
