//! Inline-capable UTF-8 encoding used by `VARCHAR` columns.
//!
//! Every row owns a 16-byte auxiliary entry:
//!
//! ```text
//! | header u32 | inline / prefix (6 bytes) | data offset (48 bits) |
//! ```
//!
//! The header is `(len << 4) | flags`. Values of at most
//! [`VARCHAR_INLINE_LIMIT`] bytes are stored entirely in the entry and
//! consume no data vector space. Longer values keep a 6-byte prefix inline and
//! their full payload at `data offset`. Inlined and null rows record the data
//! vector size at the time they were written as their offset.

use llkv_result::{Error, Result};
use llkv_types::RowIndex;

use super::{ColumnTypeDriver, read_array, slice_at};

/// Longest value stored entirely inside the auxiliary entry.
pub const VARCHAR_INLINE_LIMIT: usize = 6;

const ENTRY_SHIFT: u32 = 4;
const FLAG_INLINED: u32 = 0b01;
const FLAG_NULL: u32 = 0b10;
const LEN_SHIFT: u32 = 4;
const OFFSET_POS: u64 = 10;
const MAX_LEN: usize = (u32::MAX >> LEN_SHIFT) as usize;
const MAX_OFFSET: u64 = (1 << 48) - 1;

/// Header for a value of `len` bytes; lengths need 28 bits.
fn header_for(len: usize) -> Result<u32> {
    if len > MAX_LEN {
        return Err(Error::InvalidArgumentError(format!(
            "varchar value of {len} bytes exceeds {MAX_LEN}"
        )));
    }
    let header = (len as u32) << LEN_SHIFT;
    Ok(if len <= VARCHAR_INLINE_LIMIT {
        header | FLAG_INLINED
    } else {
        header
    })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VarcharDriver;

pub static VARCHAR_DRIVER: VarcharDriver = VarcharDriver;

#[derive(Debug, Clone, Copy)]
struct AuxEntry {
    header: u32,
    offset: u64,
}

impl AuxEntry {
    fn read(aux: &[u8], pos: u64) -> Result<Self> {
        let raw = read_array::<16>(aux, pos)?;
        let header = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let mut off = [0u8; 8];
        off[..6].copy_from_slice(&raw[OFFSET_POS as usize..16]);
        Ok(Self {
            header,
            offset: u64::from_le_bytes(off),
        })
    }

    #[inline]
    fn len(&self) -> u64 {
        u64::from(self.header >> LEN_SHIFT)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.header & FLAG_NULL != 0
    }

    #[inline]
    fn is_inlined(&self) -> bool {
        self.header & FLAG_INLINED != 0
    }
}

impl ColumnTypeDriver for VarcharDriver {
    fn name(&self) -> &'static str {
        "varchar"
    }

    #[inline]
    fn aux_vector_offset(&self, row: RowIndex) -> u64 {
        row << ENTRY_SHIFT
    }

    fn aux_vector_size(&self, row_count: RowIndex) -> u64 {
        row_count << ENTRY_SHIFT
    }

    fn data_vector_size_through(&self, aux: &[u8], row: RowIndex) -> Result<u64> {
        let entry = AuxEntry::read(aux, self.aux_vector_offset(row))?;
        if entry.is_null() || entry.is_inlined() {
            Ok(entry.offset)
        } else {
            Ok(entry.offset + entry.len())
        }
    }

    fn append(&self, data: &mut Vec<u8>, aux: &mut Vec<u8>, value: Option<&[u8]>) -> Result<()> {
        let offset = data.len() as u64;
        if offset > MAX_OFFSET {
            return Err(Error::InvalidArgumentError(format!(
                "varchar data offset {offset} exceeds 48 bits"
            )));
        }
        let mut entry = [0u8; 16];
        let header = match value {
            None => FLAG_NULL,
            Some(bytes) => {
                let header = header_for(bytes.len())?;
                let prefix = bytes.len().min(VARCHAR_INLINE_LIMIT);
                entry[4..4 + prefix].copy_from_slice(&bytes[..prefix]);
                if header & FLAG_INLINED == 0 {
                    data.extend_from_slice(bytes);
                }
                header
            }
        };
        entry[..4].copy_from_slice(&header.to_le_bytes());
        entry[OFFSET_POS as usize..].copy_from_slice(&offset.to_le_bytes()[..6]);
        aux.extend_from_slice(&entry);
        Ok(())
    }

    fn decode_row<'a>(
        &self,
        data: &'a [u8],
        aux: &'a [u8],
        row: RowIndex,
    ) -> Result<Option<&'a [u8]>> {
        let pos = self.aux_vector_offset(row);
        let entry = AuxEntry::read(aux, pos)?;
        if entry.is_null() {
            return Ok(None);
        }
        if entry.is_inlined() {
            if entry.len() > VARCHAR_INLINE_LIMIT as u64 {
                return Err(Error::Internal(format!(
                    "inlined varchar of {} bytes at row {row}",
                    entry.len()
                )));
            }
            return slice_at(aux, pos + 4, entry.len()).map(Some);
        }
        slice_at(data, entry.offset, entry.len()).map(Some)
    }
}
