//! Cursor slicing row ranges into page frames.

use std::fmt;
use std::sync::Arc;

use llkv_result::{Error, Result};
use llkv_storage::{RowRange, RowRangeSource, StaticSymbolTable, SymbolTable, TableAccessor};
use llkv_types::{FrameRowId, PartitionIndex, RowIndex, ScanDirection};

use crate::addressing::{SliceTarget, column_page};
use crate::config::PageFrameConfig;
use crate::frame::PageFrame;
use crate::selection::ColumnSelection;

/// Leftover of the current row range, sliced on the next advance before the
/// source is consulted again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reentry {
    Idle,
    PendingSplit { lo: RowIndex, hi: RowIndex },
}

/// Walks the ranges of a [`RowRangeSource`] and yields [`PageFrame`]s.
///
/// Each upstream range is cut into frames of at most
/// [`PageFrameConfig::row_limit`] rows, taken from the end of the range for
/// [`ScanDirection::Backward`] and from the start for
/// [`ScanDirection::Forward`]. A frame never crosses the top of any selected
/// column, so every column is either entirely backed by storage or entirely
/// implicit nulls within one frame.
///
/// The row limit is computed once per upstream range and reused for every
/// frame cut from it, including the leftovers of a top split; the frame right
/// after a split can therefore be smaller than `min_rows`.
///
/// A cursor is single-threaded. Run one cursor per worker for parallel scans;
/// they may share the same table accessor.
pub struct PageFrameCursor {
    selection: Arc<ColumnSelection>,
    config: PageFrameConfig,
    direction: ScanDirection,
    source: Option<Box<dyn RowRangeSource>>,
    table: Option<Arc<dyn TableAccessor>>,
    frame: PageFrame,
    tops: Vec<RowIndex>,
    reentry: Reentry,
    partition_index: PartitionIndex,
    row_limit: u64,
    closed: bool,
}

impl PageFrameCursor {
    pub fn new(
        selection: ColumnSelection,
        config: PageFrameConfig,
        direction: ScanDirection,
    ) -> Result<Self> {
        config.validate()?;
        let selection = Arc::new(selection);
        let tops = vec![0; selection.len()];
        Ok(Self {
            frame: PageFrame::new(Arc::clone(&selection)),
            selection,
            config,
            direction,
            source: None,
            table: None,
            tops,
            reentry: Reentry::Idle,
            partition_index: 0,
            row_limit: 0,
            closed: false,
        })
    }

    /// Cursor walking rows in descending order.
    pub fn backward(selection: ColumnSelection, config: PageFrameConfig) -> Result<Self> {
        Self::new(selection, config, ScanDirection::Backward)
    }

    pub fn forward(selection: ColumnSelection, config: PageFrameConfig) -> Result<Self> {
        Self::new(selection, config, ScanDirection::Forward)
    }

    /// Bind a fresh row-range source (replacing any previous one) and rewind.
    pub fn attach(&mut self, source: Box<dyn RowRangeSource>) -> Result<&mut Self> {
        self.ensure_open()?;
        let table = Arc::clone(source.table());
        self.frame.bind(Some(Arc::clone(&table)));
        self.table = Some(table);
        self.source = Some(source);
        self.reset_to_start()?;
        Ok(self)
    }

    /// Rewind the source and drop any pending split.
    pub fn reset_to_start(&mut self) -> Result<()> {
        self.ensure_open()?;
        let source = self.source.as_mut().ok_or(Error::NotAttached)?;
        source.reset_to_start();
        self.frame.clear();
        self.tops.fill(0);
        self.reentry = Reentry::Idle;
        self.partition_index = 0;
        self.row_limit = 0;
        tracing::debug!(
            columns = self.selection.len(),
            direction = ?self.direction,
            "page frame cursor reset"
        );
        Ok(())
    }

    /// Next frame, or `None` once the source is exhausted.
    ///
    /// The returned frame is overwritten by the following call.
    pub fn next_frame(&mut self) -> Result<Option<&PageFrame>> {
        self.ensure_open()?;
        self.frame.invalidate();
        let (lo, hi) = match std::mem::replace(&mut self.reentry, Reentry::Idle) {
            Reentry::PendingSplit { lo, hi } => (lo, hi),
            Reentry::Idle => match self.next_range()? {
                Some(range) => {
                    self.partition_index = range.partition_index;
                    self.row_limit = self.config.row_limit(range.len());
                    (range.lo, range.hi)
                }
                None => {
                    tracing::debug!("page frame cursor exhausted");
                    return Ok(None);
                }
            },
        };
        self.compute_frame(lo, hi)?;
        Ok(Some(&self.frame))
    }

    /// Total rows in the attached table.
    pub fn size(&self) -> Result<u64> {
        Ok(self.attached_table()?.total_row_count())
    }

    /// Shared dictionary of selected column `column`.
    pub fn symbol_table(&self, column: usize) -> Result<Arc<dyn StaticSymbolTable>> {
        let table = self.attached_table()?;
        table.symbol_table(self.selection.column_index(column)?)
    }

    /// Fresh dictionary instance of selected column `column`.
    pub fn new_symbol_table(&self, column: usize) -> Result<Box<dyn SymbolTable>> {
        let table = self.attached_table()?;
        table.new_symbol_table(self.selection.column_index(column)?)
    }

    /// Row id of the `row_offset`-th row of the current frame.
    ///
    /// Fails when no frame is current (before the first advance, after a reset
    /// or once the cursor is exhausted) or the offset lies outside the frame.
    pub fn update_row_id(&self, row_offset: u64) -> Result<FrameRowId> {
        self.ensure_open()?;
        self.frame.row_id(row_offset)
    }

    /// Release the attached source. Safe mid-scan and safe to repeat.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.source = None;
        self.table = None;
        self.frame.bind(None);
        self.reentry = Reentry::Idle;
        self.closed = true;
        tracing::debug!("page frame cursor closed");
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    #[inline]
    pub fn config(&self) -> &PageFrameConfig {
        &self.config
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.selection.len()
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::CursorClosed);
        }
        Ok(())
    }

    fn attached_table(&self) -> Result<&Arc<dyn TableAccessor>> {
        self.ensure_open()?;
        self.table.as_ref().ok_or(Error::NotAttached)
    }

    /// Pull the next non-empty, well-formed range from the source.
    fn next_range(&mut self) -> Result<Option<RowRange>> {
        let table = Arc::clone(self.attached_table()?);
        let source = self.source.as_mut().ok_or(Error::NotAttached)?;
        while let Some(range) = source.next_range()? {
            let row_count = table.partition_row_count(range.partition_index)?;
            if range.lo > range.hi || range.hi > row_count {
                return Err(Error::InvalidArgumentError(format!(
                    "row range [{}, {}) is invalid for partition {} with {row_count} rows",
                    range.lo, range.hi, range.partition_index
                )));
            }
            if !range.is_empty() {
                return Ok(Some(range));
            }
        }
        Ok(None)
    }

    fn compute_frame(&mut self, lo: RowIndex, hi: RowIndex) -> Result<()> {
        let table = Arc::clone(self.attached_table()?);
        let selection = Arc::clone(&self.selection);
        let partition = self.partition_index;
        let row_count = table.partition_row_count(partition)?;

        for (slot, column) in self.tops.iter_mut().zip(selection.column_indexes()) {
            let top = table.column_top(partition, *column)?;
            if top > row_count {
                tracing::warn!(
                    partition,
                    column = *column,
                    top,
                    row_count,
                    "column top beyond partition end"
                );
                return Err(Error::InconsistentColumnTop {
                    partition,
                    column: *column,
                    top,
                    row_count,
                });
            }
            *slot = top;
        }

        // Split along the row limit first, then pull the bound in to the
        // nearest top inside the frame so no column changes null-ness in it.
        let (frame_lo, frame_hi) = match self.direction {
            ScanDirection::Backward => {
                let mut adjusted_lo = lo.max(hi.saturating_sub(self.row_limit));
                for &top in &self.tops {
                    if top > adjusted_lo && top < hi {
                        adjusted_lo = top;
                    }
                }
                (adjusted_lo, hi)
            }
            ScanDirection::Forward => {
                let mut adjusted_hi = hi.min(lo.saturating_add(self.row_limit));
                for &top in &self.tops {
                    if top > lo && top < adjusted_hi {
                        adjusted_hi = top;
                    }
                }
                (lo, adjusted_hi)
            }
        };

        for (position, (column, kind)) in selection.iter().enumerate() {
            let target = SliceTarget {
                partition,
                column,
                top: self.tops[position],
            };
            let memory = table.column_memory(partition, column)?;
            let page = column_page(kind, memory, target, frame_lo, frame_hi)?;
            self.frame.set_page(position, page);
        }

        self.reentry = if lo < frame_lo {
            Reentry::PendingSplit { lo, hi: frame_lo }
        } else if frame_hi < hi {
            Reentry::PendingSplit { lo: frame_hi, hi }
        } else {
            Reentry::Idle
        };
        self.frame.set_bounds(partition, frame_lo, frame_hi);

        tracing::trace!(
            partition,
            lo = frame_lo,
            hi = frame_hi,
            deferred = matches!(self.reentry, Reentry::PendingSplit { .. }),
            "page frame"
        );
        Ok(())
    }
}

impl fmt::Debug for PageFrameCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFrameCursor")
            .field("selection", &self.selection)
            .field("config", &self.config)
            .field("direction", &self.direction)
            .field("attached", &self.source.is_some())
            .field("reentry", &self.reentry)
            .field("closed", &self.closed)
            .finish()
    }
}
