/*!
 * Block List Invariant Tests
 * Randomized operation sequences checked with proptest
 */

use memsim::memory::{Allocator, MemoryManager, Relocation};
use memsim::process::{ResidentSet, RunningProcess};
use proptest::prelude::*;

const TOTAL: usize = 256;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    Free(usize),
    Compact,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..=64).prop_map(Op::Allocate),
        3 => any::<usize>().prop_map(Op::Free),
        1 => Just(Op::Compact),
    ]
}

fn assert_no_adjacent_free(mem: &MemoryManager) {
    for pair in mem.block_list().blocks().windows(2) {
        assert!(
            !(pair[0].is_free() && pair[1].is_free()),
            "adjacent free blocks at {} and {}",
            pair[0].start,
            pair[1].start
        );
    }
}

proptest! {
    #[test]
    fn prop_blocks_always_cover_memory(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut mem = MemoryManager::with_capacity(TOTAL);
        let mut residents = ResidentSet::new();
        let mut next_pid = 1;

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    let free_before = mem.total_free();
                    if let Ok(start) = mem.allocate(size) {
                        // Never smaller than the request, never a zero-size remainder
                        prop_assert_eq!(mem.block_size(start), Some(size));
                        prop_assert_eq!(mem.total_free(), free_before - size);
                        residents.insert(RunningProcess { pid: next_pid, start, size, finish_time: 0 });
                        next_pid += 1;
                    } else {
                        prop_assert_eq!(mem.total_free(), free_before);
                    }
                }
                Op::Free(pick) => {
                    let live = residents.sorted();
                    if !live.is_empty() {
                        let victim = live[pick % live.len()];
                        let mut rest = ResidentSet::new();
                        for r in live.iter().filter(|r| r.start != victim.start) {
                            rest.insert(*r);
                        }
                        prop_assert_eq!(mem.deallocate(victim.start), Some(victim.size));
                        residents = rest;
                        assert_no_adjacent_free(&mem);
                    }
                }
                Op::Compact => {
                    let allocated_before = mem.block_list().total_allocated();
                    mem.compact(&mut residents);
                    prop_assert_eq!(mem.block_list().total_allocated(), allocated_before);
                    assert_no_adjacent_free(&mem);
                }
            }

            prop_assert!(mem.check_integrity().is_ok());
            prop_assert!(residents.check_against(mem.block_list().blocks()).is_ok());
            prop_assert!(mem.block_list().blocks().iter().all(|b| b.size > 0));
        }
    }

    #[test]
    fn prop_compaction_is_idempotent(sizes in prop::collection::vec(1usize..=32, 1..16), frees in prop::collection::vec(any::<bool>(), 16)) {
        let mut mem = MemoryManager::with_capacity(TOTAL);
        let starts: Vec<_> = sizes.iter().filter_map(|&s| mem.allocate(s).ok()).collect();
        for (start, free) in starts.iter().zip(frees) {
            if free {
                mem.deallocate(*start);
            }
        }

        let mut moves: Vec<Relocation> = Vec::new();
        mem.compact(&mut moves);
        prop_assert!(moves.iter().all(|m| m.to < m.from));
        let once = mem.snapshot();
        moves.clear();
        mem.compact(&mut moves);

        prop_assert_eq!(mem.snapshot(), once);
        prop_assert!(moves.is_empty());
    }
}
