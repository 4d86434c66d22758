use std::sync::Arc;

use croaring::Treemap;
use llkv_types::{RowIndex, ScanDirection};
use rustc_hash::FxHashMap;

use crate::traits::BitmapIndexReader;

/// Posting lists of one indexed column in one partition.
pub(crate) type PostingLists = FxHashMap<i32, Treemap>;

/// Bitmap index reader over in-memory posting lists.
#[derive(Clone)]
pub struct MemBitmapIndexReader {
    postings: Arc<PostingLists>,
    direction: ScanDirection,
}

impl MemBitmapIndexReader {
    pub(crate) fn new(postings: Arc<PostingLists>, direction: ScanDirection) -> Self {
        Self {
            postings,
            direction,
        }
    }
}

impl BitmapIndexReader for MemBitmapIndexReader {
    fn direction(&self) -> ScanDirection {
        self.direction
    }

    fn row_cursor(
        &self,
        key: i32,
        lo: RowIndex,
        hi: RowIndex,
    ) -> Box<dyn Iterator<Item = RowIndex> + '_> {
        let Some(rows) = self.postings.get(&key) else {
            return Box::new(std::iter::empty());
        };
        let mut hits: Vec<RowIndex> = rows.iter().filter(|r| *r >= lo && *r < hi).collect();
        if self.direction.is_backward() {
            hits.reverse();
        }
        Box::new(hits.into_iter())
    }

    fn key_count(&self) -> usize {
        self.postings.len()
    }
}
