//! Identifiers shared across LLKV crates.
//!
//! These types live in `llkv-types` so the cursor, the storage contracts and
//! downstream consumers can agree on them without depending on each other.

// `modular_bitfield` expands to parenthesized and braced getters that trip these lints.
#![allow(unused_parens, unused_braces)]

use std::cmp::Ordering;
use std::fmt;

use llkv_result::{Error, Result};
use modular_bitfield::prelude::*;

/// Index of a partition within a table, in storage order.
///
/// Partition indexes are embedded in [`FrameRowId`], which reserves 20 bits for
/// them, so at most [`MAX_PARTITION_INDEX`] + 1 partitions are addressable.
pub type PartitionIndex = u32;

/// Row number local to one partition.
pub type RowIndex = u64;

/// Logical column position within a table's metadata.
pub type ColumnIndex = usize;

/// Largest partition index representable by [`FrameRowId`].
pub const MAX_PARTITION_INDEX: PartitionIndex = (1 << 20) - 1;

/// Largest partition-local row offset representable by [`FrameRowId`].
pub const MAX_ROW_OFFSET: RowIndex = (1 << 44) - 1;

/// Row identifier handed to downstream update and merge logic.
///
/// A `FrameRowId` packs a partition index and a partition-local row offset into
/// a single `u64` so it can be stored, sorted and compared as one integer.
///
/// # Bit Layout
///
/// ```text
/// |-------- 64 bits total --------|
/// | partition_index | row_offset  |
/// |     20 bits     |   44 bits   |
/// ```
///
/// Because the partition index occupies the high bits, ids are monotonic within
/// a partition and ordered by partition across partitions.
#[bitfield]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u64)]
pub struct FrameRowId {
    /// Row offset within the partition (44 bits).
    pub row_offset: B44,

    /// Partition index (20 bits).
    pub partition_index: B20,
}

impl FrameRowId {
    /// Pack `(partition_index, row_offset)` into a row id.
    ///
    /// Fails when either component exceeds its bitfield width.
    pub fn encode(partition_index: PartitionIndex, row_offset: RowIndex) -> Result<Self> {
        if partition_index > MAX_PARTITION_INDEX {
            return Err(Error::InvalidArgumentError(format!(
                "partition index {partition_index} exceeds {MAX_PARTITION_INDEX}"
            )));
        }
        if row_offset > MAX_ROW_OFFSET {
            return Err(Error::InvalidArgumentError(format!(
                "row offset {row_offset} exceeds {MAX_ROW_OFFSET}"
            )));
        }
        Ok(FrameRowId::new()
            .with_partition_index(partition_index)
            .with_row_offset(row_offset))
    }

    /// Unpack into `(partition_index, row_offset)`.
    #[inline]
    pub fn decode(self) -> (PartitionIndex, RowIndex) {
        (self.partition_index(), self.row_offset())
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.into()
    }
}

impl Ord for FrameRowId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u64().cmp(&other.as_u64())
    }
}

impl PartialOrd for FrameRowId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FrameRowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRowId")
            .field("partition_index", &self.partition_index())
            .field("row_offset", &self.row_offset())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_preserves_components() {
        let id = FrameRowId::encode(7, 123_456).unwrap();
        assert_eq!(id.decode(), (7, 123_456));
        assert_eq!(id.as_u64(), (7u64 << 44) | 123_456);

        let back = FrameRowId::from(id.as_u64());
        assert_eq!(back, id);
    }

    #[test]
    fn encode_rejects_out_of_range_components() {
        assert!(FrameRowId::encode(MAX_PARTITION_INDEX + 1, 0).is_err());
        assert!(FrameRowId::encode(0, MAX_ROW_OFFSET + 1).is_err());
        let edge = FrameRowId::encode(MAX_PARTITION_INDEX, MAX_ROW_OFFSET).unwrap();
        assert_eq!(edge.as_u64(), u64::MAX);
    }

    #[test]
    fn ordering_follows_partition_then_row() {
        let a = FrameRowId::encode(1, 500).unwrap();
        let b = FrameRowId::encode(1, 501).unwrap();
        let c = FrameRowId::encode(2, 0).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn random_ids_sort_like_their_components() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let mut pairs: Vec<(PartitionIndex, RowIndex)> = (0..500)
            .map(|_| {
                (
                    rng.random_range(0..=MAX_PARTITION_INDEX),
                    rng.random_range(0..=MAX_ROW_OFFSET),
                )
            })
            .collect();
        let mut ids: Vec<FrameRowId> = pairs
            .iter()
            .map(|&(p, r)| FrameRowId::encode(p, r).unwrap())
            .collect();
        pairs.sort_unstable();
        ids.sort();
        let decoded: Vec<_> = ids.into_iter().map(FrameRowId::decode).collect();
        assert_eq!(decoded, pairs);
    }
}
