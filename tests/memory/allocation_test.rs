/*!
 * First-Fit Allocation Tests
 * Placement, hole reuse and failure classification
 */

use memsim::memory::{Allocator, MemoryBlock, MemoryError, MemoryManager, MemoryPressure};
use pretty_assertions::assert_eq;

#[test]
fn test_memory_manager_initialization() {
    let mem_mgr = MemoryManager::with_capacity(1024);
    let (total, used, available) = mem_mgr.info();

    assert_eq!(total, 1024);
    assert_eq!(used, 0);
    assert_eq!(available, total);
    assert_eq!(mem_mgr.snapshot(), vec![MemoryBlock::free(0, 1024)]);
}

#[test]
fn test_freed_hole_is_reused_first() {
    let mut mem = MemoryManager::with_capacity(100);

    assert_eq!(mem.allocate(30), Ok(0));
    assert_eq!(mem.allocate(40), Ok(30));
    assert_eq!(mem.deallocate(0), Some(30));
    assert_eq!(mem.allocate(20), Ok(0));

    assert_eq!(
        mem.snapshot(),
        vec![
            MemoryBlock::allocated(0, 20),
            MemoryBlock::free(20, 10),
            MemoryBlock::allocated(30, 40),
            MemoryBlock::free(70, 30),
        ]
    );
}

#[test]
fn test_out_of_memory() {
    let mut mem = MemoryManager::with_capacity(100);
    mem.allocate(90).unwrap();

    match mem.allocate(20) {
        Err(MemoryError::OutOfMemory {
            requested,
            available,
            used,
            total,
        }) => {
            assert_eq!(requested, 20);
            assert_eq!(available, 10);
            assert_eq!(used, 90);
            assert_eq!(total, 100);
        }
        other => panic!("Expected OutOfMemory error, got {:?}", other),
    }
}

#[test]
fn test_fragmentation_is_distinguished() {
    let mut mem = MemoryManager::from_blocks(
        vec![
            MemoryBlock::allocated(0, 10),
            MemoryBlock::free(10, 20),
            MemoryBlock::allocated(30, 10),
            MemoryBlock::free(40, 10),
        ],
        50,
    )
    .unwrap();

    let err = mem.allocate(25).unwrap_err();
    assert_eq!(
        err,
        MemoryError::Fragmented {
            requested: 25,
            available: 30,
            largest_free: 20
        }
    );
    assert!(err.is_fragmentation());
}

#[test]
fn test_trait_object_interface() {
    let mut mem = MemoryManager::with_capacity(64);
    let alloc: &mut dyn Allocator = &mut mem;

    let addr = alloc.allocate(16).unwrap();
    assert!(alloc.is_allocated(addr));
    assert_eq!(alloc.block_size(addr), Some(16));
    assert_eq!(alloc.total_free(), 48);

    assert_eq!(alloc.deallocate(addr), Some(16));
    assert_eq!(alloc.deallocate(addr), None);
    assert!(!alloc.is_allocated(addr));
}

#[test]
fn test_stats_track_fragmentation() {
    let mut mem = MemoryManager::with_capacity(100);
    let a = mem.allocate(25).unwrap();
    mem.allocate(25).unwrap();
    let c = mem.allocate(25).unwrap();
    mem.allocate(25).unwrap();
    assert_eq!(mem.stats().memory_pressure(), MemoryPressure::Critical);
    mem.deallocate(a);
    mem.deallocate(c);

    let stats = mem.stats();
    assert_eq!(stats.used_memory, 50);
    assert_eq!(stats.available_memory, 50);
    assert_eq!(stats.allocated_blocks, 2);
    assert_eq!(stats.free_blocks, 2);
    assert_eq!(stats.largest_free_block, 25);
    assert!((stats.external_fragmentation() - 0.5).abs() < 1e-9);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Low);
}
