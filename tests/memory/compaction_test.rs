/*!
 * Compaction Tests
 * Packing, conservation and idempotence
 */

use memsim::memory::{MemoryBlock, MemoryManager, Relocation};
use pretty_assertions::assert_eq;

fn fragmented() -> MemoryManager {
    MemoryManager::from_blocks(
        vec![
            MemoryBlock::allocated(0, 10),
            MemoryBlock::free(10, 20),
            MemoryBlock::allocated(30, 10),
            MemoryBlock::free(40, 10),
        ],
        50,
    )
    .unwrap()
}

#[test]
fn test_compaction_then_retry_succeeds() {
    let mut mem = fragmented();
    assert!(mem.allocate(25).is_err());

    let mut moves: Vec<Relocation> = Vec::new();
    mem.compact(&mut moves);

    assert_eq!(
        moves,
        vec![Relocation {
            from: 30,
            to: 10,
            size: 10
        }]
    );
    assert_eq!(
        mem.snapshot(),
        vec![
            MemoryBlock::allocated(0, 10),
            MemoryBlock::allocated(10, 10),
            MemoryBlock::free(20, 30),
        ]
    );
    assert_eq!(mem.allocate(25), Ok(20));
}

#[test]
fn test_compaction_is_idempotent() {
    let mut mem = fragmented();
    let mut moves: Vec<Relocation> = Vec::new();

    mem.compact(&mut moves);
    let once = mem.snapshot();
    moves.clear();
    let summary = mem.compact(&mut moves);

    assert_eq!(mem.snapshot(), once);
    assert!(moves.is_empty());
    assert_eq!(summary.moved_blocks, 0);
    assert_eq!(mem.compactions(), 2);
}

#[test]
fn test_compaction_conserves_allocations() {
    let mut mem = MemoryManager::with_capacity(200);
    let addrs: Vec<_> = [12, 7, 30, 5, 41, 9]
        .iter()
        .map(|&size| mem.allocate(size).unwrap())
        .collect();
    mem.deallocate(addrs[1]);
    mem.deallocate(addrs[3]);

    let sizes_before: Vec<_> = mem
        .snapshot()
        .iter()
        .filter(|b| b.is_allocated())
        .map(|b| b.size)
        .collect();
    let allocated_before = mem.block_list().total_allocated();

    mem.compact(&mut Vec::<Relocation>::new());

    let sizes_after: Vec<_> = mem
        .snapshot()
        .iter()
        .filter(|b| b.is_allocated())
        .map(|b| b.size)
        .collect();
    assert_eq!(sizes_after, sizes_before);
    assert_eq!(mem.block_list().total_allocated(), allocated_before);
    assert_eq!(mem.block_list().len(), sizes_after.len() + 1);
    mem.check_integrity().unwrap();
}
