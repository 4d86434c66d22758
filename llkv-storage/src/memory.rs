//! Column memory descriptors returned by table accessors.

/// Memory backing one column of one partition.
///
/// Slices borrow the accessor's mapping; their start pointers are the column's
/// base addresses and their lengths are the mapped lengths. `AllNull` marks a
/// column with no storage at all in this partition: every row reads as null.
#[derive(Clone, Copy, Debug)]
pub enum ColumnMemory<'a> {
    Fixed { data: &'a [u8] },
    Variable { data: &'a [u8], aux: &'a [u8] },
    AllNull,
}

impl<'a> ColumnMemory<'a> {
    #[inline]
    pub fn is_all_null(&self) -> bool {
        matches!(self, ColumnMemory::AllNull)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnMemory::Fixed { .. } => "fixed",
            ColumnMemory::Variable { .. } => "variable",
            ColumnMemory::AllNull => "all-null",
        }
    }
}

/// Address of the first byte of `bytes`, as reported in page frames.
#[inline]
pub fn address_of(bytes: &[u8]) -> u64 {
    bytes.as_ptr() as usize as u64
}
