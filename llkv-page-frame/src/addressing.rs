//! Translation of a frame's row slice into per-column memory pages.

use llkv_result::{Error, Result};
use llkv_storage::{ColumnMemory, address_of};
use llkv_types::{ColumnIndex, PartitionIndex, RowIndex};

use crate::frame::ColumnPage;
use crate::selection::ColumnKind;

/// Where a slice sits: partition, table column and the column's top.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SliceTarget {
    pub partition: PartitionIndex,
    pub column: ColumnIndex,
    pub top: RowIndex,
}

/// Page(s) to read for rows `[lo, hi)` of one column.
///
/// Row numbers are partition-local; the column's own vectors start at its
/// top, so both bounds are shifted down by it before addressing. A slice that
/// lies wholly below the top (or a column with no storage at all) yields a
/// null page whose size still spans the implicit nulls.
pub(crate) fn column_page(
    kind: &ColumnKind,
    memory: ColumnMemory<'_>,
    target: SliceTarget,
    lo: RowIndex,
    hi: RowIndex,
) -> Result<ColumnPage> {
    let top = if memory.is_all_null() { hi } else { target.top };
    if top >= hi {
        return Ok(ColumnPage::null((hi - lo) << kind.null_shift()));
    }

    let lo_local = lo.checked_sub(top).ok_or_else(|| {
        Error::Internal(format!(
            "frame [{lo}, {hi}) straddles top {top} of column {} in partition {}",
            target.column, target.partition
        ))
    })?;
    let hi_local = hi - top;

    match (kind, memory) {
        (ColumnKind::Fixed { shift }, ColumnMemory::Fixed { data }) => {
            let end = hi_local << shift;
            check_mapped(target, end, data.len())?;
            let offset = lo_local << shift;
            Ok(ColumnPage {
                address: address_of(data) + offset,
                size: end - offset,
                aux_address: 0,
                aux_size: 0,
            })
        }
        (ColumnKind::Variable { driver }, ColumnMemory::Variable { data, aux }) => {
            let aux_lo = driver.aux_vector_offset(lo_local);
            let aux_hi = driver.aux_vector_offset(hi_local);
            check_mapped(target, aux_hi, aux.len())?;

            let data_size = driver.data_vector_size_through(aux, hi_local - 1)?;
            check_mapped(target, data_size, data.len())?;
            // Fully inlined columns may not have a data vector at all.
            let address = if data_size > 0 { address_of(data) } else { 0 };

            Ok(ColumnPage {
                address,
                size: data_size,
                aux_address: address_of(aux) + aux_lo,
                aux_size: aux_hi - aux_lo,
            })
        }
        (kind, memory) => Err(Error::Internal(format!(
            "column {} selected as {kind:?} but partition {} maps {} memory",
            target.column,
            target.partition,
            memory.kind_name()
        ))),
    }
}

#[inline]
fn check_mapped(target: SliceTarget, required: u64, mapped: usize) -> Result<()> {
    if required > mapped as u64 {
        return Err(Error::PageOutOfBounds {
            partition: target.partition,
            column: target.column,
            required,
            mapped: mapped as u64,
        });
    }
    Ok(())
}
