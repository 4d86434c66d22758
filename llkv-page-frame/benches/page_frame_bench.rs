//! Frame slicing throughput over a large in-memory table.
//!
//! Every partition carries a late-added column and a string column, so each
//! range is split at a top and every frame resolves variable-width offsets.
//!
//! Run:
//!   cargo bench --bench page_frame_bench

#![forbid(unsafe_code)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use llkv_page_frame::{ColumnSelection, PageFrameConfig, PageFrameCursor};
use llkv_storage::{MemColumnMeta, MemTable, PartitionRangeSource, TableAccessor};
use llkv_types::{ColumnType, ScanDirection};

const PARTITIONS: u32 = 16;
const ROWS_PER_PARTITION: u64 = 250_000;
const LATE_COLUMN_TOP: u64 = 100_000;

fn build_table() -> Arc<dyn TableAccessor> {
    let mut table = MemTable::new(vec![
        MemColumnMeta::new("ts", ColumnType::Timestamp),
        MemColumnMeta::new("price", ColumnType::Double),
        MemColumnMeta::new("tag", ColumnType::String),
    ]);
    let ts: Vec<i64> = (0..ROWS_PER_PARTITION as i64).collect();
    let price: Vec<i64> = (LATE_COLUMN_TOP as i64..ROWS_PER_PARTITION as i64).collect();
    let tags: Vec<Vec<u8>> = (0..ROWS_PER_PARTITION)
        .map(|r| format!("tag-{}", r % 97).into_bytes())
        .collect();
    let tag_refs: Vec<Option<&[u8]>> = tags.iter().map(|t| Some(t.as_slice())).collect();

    for _ in 0..PARTITIONS {
        let p = table.add_partition(ROWS_PER_PARTITION).unwrap();
        table.set_i64_column(p, 0, 0, &ts).unwrap();
        table.set_i64_column(p, 1, LATE_COLUMN_TOP, &price).unwrap();
        table.set_var_column(p, 2, 0, &tag_refs).unwrap();
    }
    Arc::new(table)
}

fn drain(table: &Arc<dyn TableAccessor>, direction: ScanDirection, config: PageFrameConfig) -> u64 {
    let selection = ColumnSelection::from_table(table.as_ref(), &[0, 1, 2]).unwrap();
    let mut cursor = PageFrameCursor::new(selection, config, direction).unwrap();
    cursor
        .attach(Box::new(PartitionRangeSource::new(Arc::clone(table), direction)))
        .unwrap();
    let mut bytes = 0u64;
    while let Some(frame) = cursor.next_frame().unwrap() {
        bytes += frame.pages().iter().map(|p| p.size + p.aux_size).sum::<u64>();
    }
    bytes
}

fn bench_page_frames(c: &mut Criterion) {
    let table = build_table();
    let mut group = c.benchmark_group("page_frame_cursor_4M");
    group.sample_size(30);

    for (label, config) in [
        ("small_frames", PageFrameConfig::new(8, 1_000, 4_000)),
        ("default_limits", PageFrameConfig::new(8, 100_000, 1_000_000)),
    ] {
        group.bench_function(format!("backward_{label}"), |b| {
            b.iter(|| black_box(drain(&table, ScanDirection::Backward, config)))
        });
        group.bench_function(format!("forward_{label}"), |b| {
            b.iter(|| black_box(drain(&table, ScanDirection::Forward, config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_page_frames);
criterion_main!(benches);
