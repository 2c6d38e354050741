/*!
 * Coalescing Tests
 * Adjacent free block merging, including chains of three or more
 */

use memvis::heap::HeapManager;
use pretty_assertions::assert_eq;

fn layout(heap: &HeapManager) -> Vec<(usize, usize, bool)> {
    heap.blocks()
        .iter()
        .map(|b| (b.start, b.size, b.allocated))
        .collect()
}

#[test]
fn test_merge_with_right_neighbor() {
    let mut heap = HeapManager::with_capacity(40);
    heap.allocate(10).unwrap();
    heap.allocate(30).unwrap();
    heap.free(10).unwrap();
    heap.free(0).unwrap();
    assert_eq!(layout(&heap), vec![(0, 40, false)]);
}

#[test]
fn test_merge_with_left_neighbor() {
    let mut heap = HeapManager::with_capacity(40);
    heap.allocate(10).unwrap();
    heap.allocate(30).unwrap();
    heap.free(0).unwrap();
    heap.free(10).unwrap();
    assert_eq!(layout(&heap), vec![(0, 40, false)]);
}

#[test]
fn test_three_chain_collapses_to_one_block() {
    let mut heap = HeapManager::with_capacity(40);
    heap.allocate(10).unwrap(); // 0
    heap.allocate(10).unwrap(); // 10
    heap.allocate(10).unwrap(); // 20
    heap.allocate(10).unwrap(); // 30
    heap.free(0).unwrap();
    heap.free(20).unwrap();
    heap.free(30).unwrap();
    assert_eq!(
        layout(&heap),
        vec![(0, 10, false), (10, 10, true), (20, 20, false)]
    );

    // Freeing the middle block leaves free space on both sides; the whole
    // run must collapse into a single block
    heap.free(10).unwrap();
    assert_eq!(layout(&heap), vec![(0, 40, false)]);
}

#[test]
fn test_left_block_identity_survives_merge() {
    let mut heap = HeapManager::with_capacity(40);
    heap.allocate(10).unwrap();
    heap.allocate(30).unwrap();
    heap.free(0).unwrap();
    let left_id = heap.blocks()[0].id;
    heap.free(10).unwrap();
    assert_eq!(heap.blocks().len(), 1);
    assert_eq!(heap.blocks()[0].id, left_id);
}
