/*!
 * Heap Manager Tests
 * Allocation, release, and statistics behavior
 */

use memvis::heap::{FreeOutcome, HeapError, HeapManager, HeapPressure};
use pretty_assertions::assert_eq;

/// (start, size, allocated) triples, ignoring ids and timestamps
fn layout(heap: &HeapManager) -> Vec<(usize, usize, bool)> {
    heap.blocks()
        .iter()
        .map(|b| (b.start, b.size, b.allocated))
        .collect()
}

/// Heap shaped as [free 10][allocated 5][free 20]
fn heap_10_5_20() -> HeapManager {
    let mut heap = HeapManager::with_capacity(35);
    heap.allocate(10).unwrap();
    heap.allocate(5).unwrap();
    heap.allocate(20).unwrap();
    heap.free(0).unwrap();
    heap.free(15).unwrap();
    assert_eq!(
        layout(&heap),
        vec![(0, 10, false), (10, 5, true), (15, 20, false)]
    );
    heap
}

#[test]
fn test_initial_state() {
    let heap = HeapManager::with_capacity(100);
    assert_eq!(layout(&heap), vec![(0, 100, false)]);

    let stats = heap.stats();
    assert_eq!(stats.total_size, 100);
    assert_eq!(stats.used_size, 0);
    assert_eq!(stats.free_size, 100);
    assert_eq!(stats.block_count, 1);
    assert_eq!(stats.fragmentation, 0.0);
}

#[test]
fn test_allocation_splits_free_block() {
    let mut heap = HeapManager::with_capacity(100);
    let addr = heap.allocate(30).unwrap();
    assert_eq!(addr, 0);
    assert_eq!(layout(&heap), vec![(0, 30, true), (30, 70, false)]);
}

#[test]
fn test_exact_fit_flips_block_in_place() {
    let mut heap = HeapManager::with_capacity(100);
    let id_before = heap.blocks()[0].id;
    let addr = heap.allocate(100).unwrap();
    assert_eq!(addr, 0);
    assert_eq!(layout(&heap), vec![(0, 100, true)]);
    assert_eq!(heap.blocks()[0].id, id_before);
}

#[test]
fn test_allocate_then_free_restores_heap() {
    let mut heap = HeapManager::with_capacity(100);
    let before = layout(&heap);
    let addr = heap.allocate(30).unwrap();
    heap.free(addr).unwrap();
    assert_eq!(layout(&heap), before);
}

#[test]
fn test_first_fit_prefers_earlier_block() {
    let mut heap = heap_10_5_20();
    // Both holes fit; the earlier one must win even though the later one
    // is tighter
    let addr = heap.allocate(8).unwrap();
    assert_eq!(addr, 0);
}

#[test]
fn test_first_fit_skips_too_small_blocks() {
    let mut heap = heap_10_5_20();
    let addr = heap.allocate(15).unwrap();
    assert_eq!(addr, 15);
    assert_eq!(
        layout(&heap),
        vec![(0, 10, false), (10, 5, true), (15, 15, true), (30, 5, false)]
    );
}

#[test]
fn test_out_of_memory_leaves_state_unchanged() {
    let mut heap = heap_10_5_20();
    let before = layout(&heap);

    // 30 units are free in total, but no single hole holds 25
    let err = heap.allocate(25).unwrap_err();
    assert_eq!(
        err,
        HeapError::OutOfMemory {
            requested: 25,
            largest_free: 20,
            free: 30,
        }
    );
    assert_eq!(layout(&heap), before);
}

#[test]
fn test_zero_size_allocation_is_rejected() {
    let mut heap = HeapManager::with_capacity(100);
    let before = layout(&heap);
    assert_eq!(heap.allocate(0).unwrap_err(), HeapError::InvalidSize(0));
    assert_eq!(layout(&heap), before);
}

#[test]
fn test_free_at_non_boundary_address() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(30).unwrap();
    let before = layout(&heap);

    // 7 falls inside the block at 0 but is not a block start
    assert_eq!(heap.free(7).unwrap_err(), HeapError::InvalidAddress(7));
    assert_eq!(layout(&heap), before);
}

#[test]
fn test_double_free_is_a_warning() {
    let mut heap = HeapManager::with_capacity(100);
    let addr = heap.allocate(30).unwrap();
    heap.free(addr).unwrap();

    let before = layout(&heap);
    assert_eq!(
        heap.free(addr).unwrap(),
        FreeOutcome::AlreadyFree { address: addr }
    );
    assert_eq!(layout(&heap), before);
}

#[test]
fn test_fragmentation_many_small_holes() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(5).unwrap(); // 0..5
    heap.allocate(25).unwrap(); // 5..30
    heap.allocate(5).unwrap(); // 30..35
    heap.allocate(25).unwrap(); // 35..60
    heap.allocate(5).unwrap(); // 60..65
    heap.allocate(35).unwrap(); // 65..100
    heap.free(0).unwrap();
    heap.free(30).unwrap();
    heap.free(60).unwrap();

    let stats = heap.stats();
    assert_eq!(stats.used_size, 85);
    assert_eq!(stats.free_size, 15);
    assert_eq!(stats.largest_free_block, 5);
    assert!((stats.fragmentation - (1.0 - 5.0 / 15.0)).abs() < 1e-9);
}

#[test]
fn test_fragmentation_single_free_block_is_zero() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(85).unwrap();

    let stats = heap.stats();
    assert_eq!(stats.free_size, 15);
    assert_eq!(stats.fragmentation, 0.0);
}

#[test]
fn test_fragmentation_full_heap_is_zero() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(100).unwrap();

    let stats = heap.stats();
    assert_eq!(stats.free_size, 0);
    assert_eq!(stats.fragmentation, 0.0);
    assert!(stats.fragmentation.is_finite());
}

#[test]
fn test_reset_restores_single_free_block() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(10).unwrap();
    heap.allocate(20).unwrap();
    heap.free(0).unwrap();
    heap.reset();
    assert_eq!(layout(&heap), vec![(0, 100, false)]);
}

#[test]
fn test_snapshot_is_detached_from_live_state() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(40).unwrap();
    let snapshot = heap.snapshot();

    heap.allocate(10).unwrap();
    assert_eq!(snapshot.stats.used_size, 40);
    assert_eq!(snapshot.blocks.len(), 2);
}

#[test]
fn test_memory_map_rendering() {
    let mut heap = HeapManager::with_capacity(100);
    heap.allocate(40).unwrap();
    assert_eq!(
        heap.snapshot().memory_map(),
        "0: 40 [Allocated]\n40: 60 [Free]"
    );
}

#[test]
fn test_pressure_levels() {
    let mut heap = HeapManager::with_capacity(100);
    assert_eq!(heap.stats().pressure(), HeapPressure::Low);
    heap.allocate(60).unwrap();
    assert_eq!(heap.stats().pressure(), HeapPressure::Medium);
    heap.allocate(25).unwrap();
    assert_eq!(heap.stats().pressure(), HeapPressure::High);
    heap.allocate(11).unwrap();
    assert_eq!(heap.stats().pressure(), HeapPressure::Critical);
}
