//! Transposition table for caching search results.
//!
//! Keyed by Zobrist hash. Entries record the searched depth, the score, the
//! bound classification relative to the alpha-beta window, and the best move
//! found, packed into a single u64 alongside the verification key.
//!
//! The table is plain mutable state: the search is single-threaded by
//! design, so no synchronization is needed. A parallel search would have to
//! shard or lock this table and is explicitly out of scope.

use std::mem;

use crate::board::Move;

/// How a stored score relates to the alpha-beta window it was searched in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is the exact value of the node
    Exact,
    /// Score is at least this value (fail high, score >= beta)
    Lower,
    /// Score is at most this value (fail low, score <= alpha)
    Upper,
}

impl Bound {
    fn to_bits(self) -> u64 {
        match self {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        }
    }

    fn from_bits(bits: u64) -> Self {
        match bits & 0x3 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        }
    }
}

/// Unpacked table entry.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub depth: u8,
    pub score: i16,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

// Packed entry layout:
// - bits 0-31:  move (u32, 0 = no move)
// - bits 32-47: score (i16 as u16)
// - bits 48-55: depth (u8)
// - bits 56-57: bound
// - bit  58:    occupancy marker, so an all-zero entry is distinguishable
const OCCUPIED_BIT: u64 = 1 << 58;

fn pack_entry(depth: u8, score: i16, bound: Bound, best_move: Option<Move>) -> u64 {
    let mv = best_move.map_or(0, |m| m.as_u32());
    (mv as u64)
        | ((score as u16 as u64) << 32)
        | ((depth as u64) << 48)
        | (bound.to_bits() << 56)
        | OCCUPIED_BIT
}

fn unpack_entry(data: u64) -> TtEntry {
    let mv_bits = (data & 0xFFFF_FFFF) as u32;
    let score = ((data >> 32) & 0xFFFF) as u16 as i16;
    let depth = ((data >> 48) & 0xFF) as u8;
    let bound = Bound::from_bits(data >> 56);

    let best_move = if mv_bits == 0 {
        None
    } else {
        Some(Move::from_u32(mv_bits))
    };

    TtEntry {
        depth,
        score,
        bound,
        best_move,
    }
}

#[derive(Clone, Copy)]
struct TtSlot {
    key: u64,
    data: u64,
}

impl TtSlot {
    const EMPTY: TtSlot = TtSlot { key: 0, data: 0 };

    fn is_empty(&self) -> bool {
        self.data == 0
    }

    fn depth(&self) -> u8 {
        ((self.data >> 48) & 0xFF) as u8
    }
}

/// Fixed-size hash table of search results.
pub struct TranspositionTable {
    slots: Vec<TtSlot>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<TtSlot>();
        let mut num_slots = (size_mb * 1024 * 1024) / slot_size;

        // Power of two for mask indexing
        num_slots = num_slots.next_power_of_two() / 2;
        if num_slots == 0 {
            num_slots = 1024;
        }

        TranspositionTable {
            slots: vec![TtSlot::EMPTY; num_slots],
            mask: num_slots - 1,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Look up an entry for the given hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        let slot = &self.slots[self.index(hash)];
        if !slot.is_empty() && slot.key == hash {
            Some(unpack_entry(slot.data))
        } else {
            None
        }
    }

    /// Store an entry, preferring deeper searches when evicting a
    /// different position.
    pub fn store(&mut self, hash: u64, depth: u32, score: i32, bound: Bound, best_move: Option<Move>) {
        let depth_u8 = depth.min(255) as u8;
        let score_i16 = score.clamp(i16::MIN as i32, i16::MAX as i32) as i16;

        let idx = self.index(hash);
        let slot = &mut self.slots[idx];
        if !slot.is_empty() && slot.key != hash && slot.depth() > depth_u8 {
            return;
        }

        slot.key = hash;
        slot.data = pack_entry(depth_u8, score_i16, bound, best_move);
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.slots.fill(TtSlot::EMPTY);
    }

    /// Table fullness in per mille (0-1000), sampled.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let occupied = self.slots[..sample].iter().filter(|s| !s.is_empty()).count();
        ((occupied as u64 * 1000) / sample as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_roundtrip() {
        let test_cases = [
            (10u8, 500i16, Bound::Exact, Some(Move::from_u32(0x1234))),
            (255u8, -32000i16, Bound::Lower, None),
            (0u8, 0i16, Bound::Upper, Some(Move::from_u32(0xFFFF))),
        ];

        for (depth, score, bound, mv) in test_cases {
            let packed = pack_entry(depth, score, bound, mv);
            let unpacked = unpack_entry(packed);

            assert_eq!(unpacked.depth, depth);
            assert_eq!(unpacked.score, score);
            assert_eq!(unpacked.bound, bound);
            assert_eq!(
                unpacked.best_move.map(|m| m.as_u32()),
                mv.map(|m| m.as_u32())
            );
        }
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 10, 500, Bound::Exact, None);

        let entry = tt.probe(hash).expect("should find entry");
        assert_eq!(entry.depth, 10);
        assert_eq!(entry.score, 500);
        assert_eq!(entry.bound, Bound::Exact);
    }

    #[test]
    fn test_no_false_positives() {
        let mut tt = TranspositionTable::new(1);
        let hash1 = 0x1234_5678_9ABC_DEF0;
        let hash2 = 0xFEDC_BA98_7654_3210;

        tt.store(hash1, 10, 500, Bound::Exact, None);

        assert!(tt.probe(hash2).is_none());
    }

    #[test]
    fn test_deeper_entry_survives_shallow_evict() {
        let mut tt = TranspositionTable::new(1);
        // Two hashes colliding on the same slot index
        let hash1 = 0x40;
        let hash2 = hash1 + ((tt.mask as u64) + 1);

        tt.store(hash1, 12, 100, Bound::Exact, None);
        tt.store(hash2, 3, -50, Bound::Lower, None);

        assert!(tt.probe(hash1).is_some(), "deeper entry was evicted");
        assert!(tt.probe(hash2).is_none());
    }
}
