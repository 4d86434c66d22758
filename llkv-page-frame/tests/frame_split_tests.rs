mod common;

use common::{base_addresses, bounds, drain, full_scan_cursor, share};
use llkv_page_frame::{ColumnPage, PageFrameConfig};
use llkv_storage::{MemColumnMeta, MemTable};
use llkv_test_utils::init_tracing_for_tests;
use llkv_types::{ColumnType, ScanDirection};

fn single_column_table(row_count: u64, top: u64) -> MemTable {
    let mut table = MemTable::new(vec![MemColumnMeta::new("a", ColumnType::Long)]);
    let p = table.add_partition(row_count).unwrap();
    let values: Vec<i64> = (top as i64..row_count as i64).collect();
    table.set_i64_column(p, 0, top, &values).unwrap();
    table
}

#[test]
fn backward_scan_splits_on_row_limit_then_top() {
    init_tracing_for_tests();
    let (table, dyn_table) = share(single_column_table(100, 40));
    let mut cursor = full_scan_cursor(
        &dyn_table,
        &[0],
        PageFrameConfig::new(2, 10, 50),
        ScanDirection::Backward,
    );

    let frames = drain(&mut cursor);
    assert_eq!(bounds(&frames), vec![(0, 50, 100), (0, 40, 50), (0, 0, 40)]);

    let (base, _) = base_addresses(&table, 0, 0).unwrap();
    assert_eq!(
        frames[0].pages[0],
        ColumnPage {
            address: base + 10 * 8,
            size: 50 * 8,
            aux_address: 0,
            aux_size: 0,
        }
    );
    assert_eq!(frames[1].pages[0].address, base);
    assert_eq!(frames[1].pages[0].size, 10 * 8);
    // Below the top: no storage, but the span still covers 40 implicit nulls.
    assert_eq!(frames[2].pages[0], ColumnPage::null(40 * 8));

    assert!(cursor.next_frame().unwrap().is_none());
}

#[test]
fn forward_scan_mirrors_backward_split() {
    init_tracing_for_tests();
    let (table, dyn_table) = share(single_column_table(100, 40));
    let mut cursor = full_scan_cursor(
        &dyn_table,
        &[0],
        PageFrameConfig::new(2, 10, 50),
        ScanDirection::Forward,
    );

    let frames = drain(&mut cursor);
    assert_eq!(bounds(&frames), vec![(0, 0, 40), (0, 40, 90), (0, 90, 100)]);

    let (base, _) = base_addresses(&table, 0, 0).unwrap();
    assert!(frames[0].pages[0].is_null());
    assert_eq!(frames[1].pages[0].address, base);
    assert_eq!(frames[1].pages[0].size, 50 * 8);
    assert_eq!(frames[2].pages[0].address, base + 50 * 8);
    assert_eq!(frames[2].pages[0].size, 10 * 8);
}

#[test]
fn row_limit_is_kept_across_top_split() {
    // The limit is computed once per upstream range. After the top at 45 cuts
    // the second frame short it stays at 5 rows, below `min_rows`.
    let (_table, dyn_table) = share(single_column_table(100, 45));
    let mut cursor = full_scan_cursor(
        &dyn_table,
        &[0],
        PageFrameConfig::new(2, 10, 50),
        ScanDirection::Backward,
    );
    let frames = drain(&mut cursor);
    assert_eq!(bounds(&frames), vec![(0, 50, 100), (0, 45, 50), (0, 0, 45)]);
    assert_eq!(frames[1].hi - frames[1].lo, 5);
}

#[test]
fn short_range_yields_single_frame() {
    let (_table, dyn_table) = share(single_column_table(5, 0));
    let mut cursor = full_scan_cursor(
        &dyn_table,
        &[0],
        PageFrameConfig::new(4, 10, 50),
        ScanDirection::Backward,
    );
    assert_eq!(bounds(&drain(&mut cursor)), vec![(0, 0, 5)]);
}

#[test]
fn latest_top_wins_among_staggered_columns() {
    let mut table = MemTable::new(vec![
        MemColumnMeta::new("a", ColumnType::Long),
        MemColumnMeta::new("b", ColumnType::Int),
        MemColumnMeta::new("c", ColumnType::Short),
    ]);
    let p = table.add_partition(100).unwrap();
    table.set_i64_column(p, 0, 40, &vec![1; 60]).unwrap();
    table.set_i32_column(p, 1, 70, &vec![2; 30]).unwrap();
    table.set_fixed_column(p, 2, 0, vec![0u8; 200]).unwrap();
    let (_table, dyn_table) = share(table);

    // Selection order puts the earlier top last to exercise the max rule.
    let mut cursor = full_scan_cursor(
        &dyn_table,
        &[1, 0, 2],
        PageFrameConfig::new(1, 10, 1_000),
        ScanDirection::Backward,
    );
    let frames = drain(&mut cursor);
    assert_eq!(bounds(&frames), vec![(0, 70, 100), (0, 40, 70), (0, 0, 40)]);

    let nulls: Vec<Vec<bool>> = frames
        .iter()
        .map(|f| f.pages.iter().map(ColumnPage::is_null).collect())
        .collect();
    assert_eq!(
        nulls,
        vec![
            vec![false, false, false],
            vec![true, false, false],
            vec![true, true, false],
        ]
    );
    assert_eq!(frames[1].pages[0].size, 30 << 2);
    assert_eq!(frames[2].pages[2].size, 40 << 1);
}

#[test]
fn partitions_are_visited_in_scan_direction() {
    let mut table = MemTable::new(vec![MemColumnMeta::new("a", ColumnType::Long)]);
    for rows in [30u64, 0, 20] {
        let p = table.add_partition(rows).unwrap();
        table.set_i64_column(p, 0, 0, &vec![0; rows as usize]).unwrap();
    }
    let (_table, dyn_table) = share(table);
    let config = PageFrameConfig::new(1, 10, 25);

    let mut backward = full_scan_cursor(&dyn_table, &[0], config, ScanDirection::Backward);
    assert_eq!(
        bounds(&drain(&mut backward)),
        vec![(2, 0, 20), (0, 5, 30), (0, 0, 5)]
    );

    let mut forward = full_scan_cursor(&dyn_table, &[0], config, ScanDirection::Forward);
    assert_eq!(
        bounds(&drain(&mut forward)),
        vec![(0, 0, 25), (0, 25, 30), (2, 0, 20)]
    );
}
