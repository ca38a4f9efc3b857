//! Transposition table for caching search results.
//!
//! One slot per index, `hash % len`, last writer wins. Each slot holds two
//! atomic words: the packed entry and the hash XOR the packed entry. A read
//! is accepted only if the two words still agree with the probe hash, so a
//! stale or half-overwritten slot is simply a miss.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::{Move, MATE_SCORE, MAX_PLY};

/// Scores at least this far from zero are mate scores.
const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact, // Score is the exact value
    Lower, // Score is at least this value (failed high - score >= beta)
    Upper, // Score is at most this value (failed low - score <= alpha)
}

impl Bound {
    fn to_bits(self) -> u64 {
        match self {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        }
    }
}

/// Unpacked table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub score: i32,
    /// Remaining depth the entry was searched to
    pub depth: u32,
    pub bound: Bound,
    /// `Move::EMPTY` when the node had no best move
    pub best_move: Move,
}

/// Errors raised while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The slot array could not be allocated
    Allocation { entries: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Allocation { entries } => {
                write!(f, "Failed to allocate transposition table of {entries} entries")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Re-base a mate score from "plies from the root" to "plies from this node".
#[must_use]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`] for a probe at `ply`.
#[must_use]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Packed entry format:
/// - bits 0-15:  move (`Move::EMPTY` has bit 15 set, so a used slot is never 0)
/// - bits 16-31: score (i16 as u16)
/// - bits 32-39: depth (u8)
/// - bits 40-41: bound
fn pack_entry(score: i32, depth: u32, bound: Bound, best_move: Move) -> u64 {
    let score = score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
    let depth = depth.min(u32::from(u8::MAX)) as u8;

    u64::from(best_move.as_u16())
        | (u64::from(score as u16) << 16)
        | (u64::from(depth) << 32)
        | (bound.to_bits() << 40)
}

fn unpack_entry(data: u64) -> TtEntry {
    TtEntry {
        best_move: Move::from_u16((data & 0xFFFF) as u16),
        score: i32::from(((data >> 16) & 0xFFFF) as u16 as i16),
        depth: ((data >> 32) & 0xFF) as u32,
        bound: Bound::from_bits(data >> 40),
    }
}

struct Slot {
    /// hash ^ packed data
    key_xor: AtomicU64,
    data: AtomicU64,
}

impl Slot {
    fn new() -> Self {
        Slot {
            key_xor: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn store(&self, hash: u64, packed: u64) {
        self.data.store(packed, Ordering::Relaxed);
        self.key_xor.store(hash ^ packed, Ordering::Relaxed);
    }

    fn probe(&self, hash: u64) -> Option<TtEntry> {
        let key_xor = self.key_xor.load(Ordering::Relaxed);
        let data = self.data.load(Ordering::Relaxed);

        if data != 0 && key_xor ^ data == hash {
            Some(unpack_entry(data))
        } else {
            None
        }
    }

    fn clear(&self) {
        self.key_xor.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
    }

    fn is_empty(&self) -> bool {
        self.data.load(Ordering::Relaxed) == 0
    }
}

/// Fixed-size always-replace transposition table.
pub struct TranspositionTable {
    slots: Vec<Slot>,
}

impl TranspositionTable {
    /// Create a table with `entries` slots (at least one).
    #[must_use]
    pub fn new(entries: usize) -> Self {
        let slots = (0..entries.max(1)).map(|_| Slot::new()).collect();
        TranspositionTable { slots }
    }

    /// Like [`TranspositionTable::new`], but reports allocation failure
    /// instead of aborting.
    pub fn try_new(entries: usize) -> Result<Self, TableError> {
        let entries = entries.max(1);
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(entries)
            .map_err(|_| TableError::Allocation { entries })?;
        slots.extend((0..entries).map(|_| Slot::new()));
        Ok(TranspositionTable { slots })
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    fn slot(&self, hash: u64) -> &Slot {
        &self.slots[(hash % self.slots.len() as u64) as usize]
    }

    /// Raw entry for `hash`, whatever its depth and bound.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        self.slot(hash).probe(hash)
    }

    /// Entry for `hash` if it may stand in for a search of `depth_needed` in
    /// the window `(alpha, beta)` at `ply`. The returned score is re-based to
    /// `ply`.
    ///
    /// Zero scores are never trusted: a stored zero may be a path-dependent
    /// draw that does not hold along the probing path.
    #[must_use]
    pub fn lookup(
        &self,
        hash: u64,
        depth_needed: u32,
        alpha: i32,
        beta: i32,
        ply: usize,
    ) -> Option<TtEntry> {
        let entry = self.probe(hash)?;
        if entry.depth < depth_needed || entry.score == 0 {
            return None;
        }

        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };

        usable.then_some(TtEntry { score, ..entry })
    }

    /// Overwrite the slot for `hash`. `score` is relative to the root at
    /// `ply` and is stored relative to this node.
    pub fn store(&self, hash: u64, score: i32, depth: u32, best_move: Move, bound: Bound, ply: usize) {
        let packed = pack_entry(score_to_tt(score, ply), depth, bound, best_move);
        self.slot(hash).store(hash, packed);
    }

    /// Clear all entries from the table.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.clear();
        }
    }

    /// Occupied slots per thousand, sampled over the first 1000 slots.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample].iter().filter(|s| !s.is_empty()).count();
        ((used * 1000) / sample) as u32
    }
}
