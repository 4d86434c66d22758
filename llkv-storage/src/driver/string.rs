//! Offset-vector encoding shared by `STRING` and `BINARY` columns.
//!
//! ```text
//! aux:  | off(0) | off(1) | ... | off(N) |     N+1 little-endian u64
//! data: | len i32 | bytes... | len i32 | bytes... |
//! ```
//!
//! `off(r)` is where row `r`'s entry starts; `off(r + 1)` is where it ends. A
//! length of `-1` marks a null with no payload bytes.

use llkv_result::{Error, Result};
use llkv_types::RowIndex;

use super::{ColumnTypeDriver, read_i32_le, read_u64_le, slice_at};

const OFFSET_SHIFT: u32 = 3;
const NULL_LEN: i32 = -1;

fn length_prefix(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::InvalidArgumentError(format!("string value of {len} bytes exceeds {}", i32::MAX))
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StringDriver;

pub static STRING_DRIVER: StringDriver = StringDriver;

impl ColumnTypeDriver for StringDriver {
    fn name(&self) -> &'static str {
        "string"
    }

    #[inline]
    fn aux_vector_offset(&self, row: RowIndex) -> u64 {
        row << OFFSET_SHIFT
    }

    fn aux_vector_size(&self, row_count: RowIndex) -> u64 {
        if row_count == 0 {
            0
        } else {
            (row_count + 1) << OFFSET_SHIFT
        }
    }

    fn data_vector_size_through(&self, aux: &[u8], row: RowIndex) -> Result<u64> {
        read_u64_le(aux, (row + 1) << OFFSET_SHIFT)
    }

    fn append(&self, data: &mut Vec<u8>, aux: &mut Vec<u8>, value: Option<&[u8]>) -> Result<()> {
        let len = match value {
            Some(bytes) => length_prefix(bytes.len())?,
            None => NULL_LEN,
        };
        if aux.is_empty() {
            aux.extend_from_slice(&(data.len() as u64).to_le_bytes());
        }
        data.extend_from_slice(&len.to_le_bytes());
        if let Some(bytes) = value {
            data.extend_from_slice(bytes);
        }
        aux.extend_from_slice(&(data.len() as u64).to_le_bytes());
        Ok(())
    }

    fn decode_row<'a>(
        &self,
        data: &'a [u8],
        aux: &'a [u8],
        row: RowIndex,
    ) -> Result<Option<&'a [u8]>> {
        let offset = read_u64_le(aux, self.aux_vector_offset(row))?;
        let len = read_i32_le(data, offset)?;
        if len == NULL_LEN {
            return Ok(None);
        }
        let len = u64::try_from(len)
            .map_err(|_| Error::Internal(format!("negative string length {len} at row {row}")))?;
        slice_at(data, offset + 4, len).map(Some)
    }
}
