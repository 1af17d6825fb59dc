//! 4-way set-associative transposition table.
//!
//! Entries are 16 bytes, clusters hold four of them and span one cache
//! line. The cluster count is always a power of two so indexing is a single
//! mask. Mate scores cross the table boundary in absolute-ply form; probe
//! and store translate them.

use std::mem::size_of;

use chess::{Move, PackedMove};

use crate::eval::Eval;

/******************************************\
|==========================================|
|               Entry Types                |
|==========================================|
\******************************************/

/// What the stored score proves about the subtree value.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TTBound {
    /// The score equals the subtree minimax value.
    Exact,
    /// Fail-low: the subtree value is at most the score.
    #[default]
    Upper,
    /// Fail-high: the subtree value is at least the score.
    Lower,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[repr(C)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: PackedMove,
    pub score: Eval,
    pub depth: u8,
    pub bound: TTBound,
    pub generation: u8,
    padding: u8,
}

const _: () = assert!(size_of::<TTEntry>() == 16);

#[derive(Copy, Clone, Debug, Default)]
#[repr(C)]
struct TTCluster {
    entries: [TTEntry; 4],
}

const _: () = assert!(size_of::<TTCluster>() == 64);

/******************************************\
|==========================================|
|           Transposition Table            |
|==========================================|
\******************************************/

pub struct TT {
    clusters: Vec<TTCluster>,
    generation: u8,
}

impl Default for TT {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MB)
    }
}

impl TT {
    pub const DEFAULT_MB: usize = 16;

    pub fn new(mb: usize) -> Self {
        let mut tt = Self {
            clusters: Vec::new(),
            generation: 0,
        };

        tt.resize(mb);

        tt
    }

    /// Reallocates to the largest power-of-two cluster count that fits in
    /// `mb` mebibytes. Zero mebibytes leaves the table empty: probes always
    /// miss and stores are dropped.
    pub fn resize(&mut self, mb: usize) {
        let cluster_count = (mb << 20) / size_of::<TTCluster>();

        if cluster_count == 0 {
            self.clusters = Vec::new();
            self.generation = 0;
            return;
        }

        let mut pow2 = 1;
        while pow2 << 1 <= cluster_count {
            pow2 <<= 1;
        }

        log::trace!("TT resized to {mb} MiB, {pow2} clusters");

        self.clusters = vec![TTCluster::default(); pow2];
        self.generation = 0;
    }

    pub fn clear(&mut self) {
        self.clusters.fill(TTCluster::default());
        self.generation = 0;
    }

    /// Bumps the generation; called once per root search so stale entries
    /// age out instead of being wiped.
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key & (self.clusters.len() as u64 - 1)) as usize
    }

    /// Scans the key's cluster; on a hit the stored score comes back
    /// converted to ply-relative form.
    pub fn probe(&self, key: u64, ply: u16) -> Option<TTEntry> {
        if self.clusters.is_empty() {
            return None;
        }

        let cluster = &self.clusters[self.index(key)];

        for entry in &cluster.entries {
            if entry.key == key {
                let mut found = *entry;
                found.score = found.score.from_tt(ply);
                return Some(found);
            }
        }

        None
    }

    /// Stores an entry under the aging-plus-depth replacement policy: a
    /// same-key slot is always updated; otherwise the victim is the entry
    /// scoring highest on (old generation -> +1000) + (255 − depth), with
    /// ties broken towards earlier slots.
    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        score: Eval,
        bound: TTBound,
        best_move: Move,
        ply: u16,
    ) {
        if self.clusters.is_empty() {
            return;
        }

        let generation = self.generation;
        let index = self.index(key);
        let cluster = &mut self.clusters[index];

        let mut target = 0;
        let mut replace_score = i32::MIN;

        for (i, entry) in cluster.entries.iter().enumerate() {
            if entry.key == key {
                target = i;
                break;
            }

            let mut entry_score = 0;
            if entry.generation != generation {
                entry_score += 1000;
            }
            entry_score += 255 - entry.depth as i32;

            if entry_score > replace_score {
                replace_score = entry_score;
                target = i;
            }
        }

        cluster.entries[target] = TTEntry {
            key,
            best_move: PackedMove::pack(best_move),
            score: score.to_tt(ply),
            depth,
            bound,
            generation,
            padding: 0,
        };
    }

    /// Permilage fill estimate over the first thousand clusters.
    pub fn hashfull(&self) -> usize {
        if self.clusters.is_empty() {
            return 0;
        }

        let limit = self.clusters.len().min(1000);
        let mut occupied = 0;
        let mut samples = 0;

        for cluster in &self.clusters[..limit] {
            for entry in &cluster.entries {
                samples += 1;
                if entry.key != 0 {
                    occupied += 1;
                }
            }
        }

        occupied * 1000 / samples
    }

    /// Number of clusters currently allocated.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use chess::{MoveFlags, Square};

    fn mv(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveFlags::QUIET)
    }

    #[test]
    fn test_cluster_count_is_power_of_two() {
        for mb in [1, 2, 3, 5, 16, 33] {
            let tt = TT::new(mb);
            let n = tt.len();
            assert!(n.is_power_of_two(), "{n} clusters for {mb} MiB");
            assert!(n * size_of::<TTCluster>() <= mb << 20);
            assert!(n * size_of::<TTCluster>() * 2 > mb << 20);
        }
    }

    #[test]
    fn test_zero_size_table_drops_everything() {
        let mut tt = TT::new(0);
        assert!(tt.is_empty());

        tt.store(0x1234, 5, Eval(10), TTBound::Exact, mv(Square::E2, Square::E4), 0);
        assert_eq!(tt.probe(0x1234, 0), None);
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    fn test_store_probe_roundtrip() {
        let mut tt = TT::new(1);
        let best = mv(Square::G1, Square::F3);

        tt.store(0xABCD, 7, Eval(42), TTBound::Exact, best, 3);

        let entry = tt.probe(0xABCD, 3).expect("stored entry vanished");
        assert_eq!(entry.key, 0xABCD);
        assert_eq!(entry.depth, 7);
        assert_eq!(entry.score, Eval(42));
        assert_eq!(entry.bound, TTBound::Exact);
        assert_eq!(entry.best_move.unpack(), best);

        assert_eq!(tt.probe(0xDCBA, 0), None);
    }

    #[test]
    fn test_mate_scores_are_ply_normalized() {
        let mut tt = TT::new(1);

        // "Mate in 3 plies from here" stored at ply 10 becomes an absolute
        // mate, probed at ply 4 it is mate in 9 plies from there
        let score = Eval::mate_in(3);
        tt.store(0x77, 5, score, TTBound::Exact, Move::NONE, 10);

        let raw = tt.probe(0x77, 0).unwrap();
        assert_eq!(raw.score, Eval::MATE - Eval(3) + Eval(10));

        let relative = tt.probe(0x77, 4).unwrap();
        assert_eq!(relative.score, Eval::MATE - Eval(3) + Eval(10) - Eval(4));

        // Non-mate scores pass through unchanged
        tt.store(0x78, 5, Eval(123), TTBound::Lower, Move::NONE, 10);
        assert_eq!(tt.probe(0x78, 4).unwrap().score, Eval(123));
    }

    #[test]
    fn test_same_key_always_updates() {
        let mut tt = TT::new(1);

        tt.store(0x10, 9, Eval(1), TTBound::Exact, mv(Square::A2, Square::A3), 0);
        tt.store(0x10, 2, Eval(2), TTBound::Upper, mv(Square::B2, Square::B3), 0);

        let entry = tt.probe(0x10, 0).unwrap();
        assert_eq!(entry.depth, 2, "same-key store must overwrite");
        assert_eq!(entry.score, Eval(2));
    }

    #[test]
    fn test_replacement_prefers_shallow_entries() {
        let mut tt = TT::new(1);
        let n = tt.len() as u64;

        // Five keys landing in cluster 0: the shallowest entry dies
        let depths = [10, 4, 8, 6];
        for (i, depth) in depths.iter().enumerate() {
            tt.store(
                (i as u64 + 1) * n,
                *depth,
                Eval(i as i16),
                TTBound::Exact,
                Move::NONE,
                0,
            );
        }

        tt.store(5 * n, 12, Eval(99), TTBound::Exact, Move::NONE, 0);

        // Depth 4 was the weakest
        assert!(tt.probe(2 * n, 0).is_none(), "shallowest entry survived");
        for key in [n, 3 * n, 4 * n, 5 * n] {
            assert!(tt.probe(key, 0).is_some(), "entry {key:#x} evicted wrongly");
        }
    }

    #[test]
    fn test_replacement_prefers_old_generations() {
        let mut tt = TT::new(1);
        let n = tt.len() as u64;

        // Fill a cluster in generation 0 with deep entries, except one
        // shallow entry refreshed in the new generation
        for i in 0..4u64 {
            tt.store((i + 1) * n, 50, Eval(0), TTBound::Exact, Move::NONE, 0);
        }

        tt.new_search();
        tt.store(n, 3, Eval(0), TTBound::Exact, Move::NONE, 0);

        // A new store evicts an aged deep entry, not the fresh shallow one
        tt.store(5 * n, 1, Eval(0), TTBound::Exact, Move::NONE, 0);

        assert!(tt.probe(n, 0).is_some(), "fresh entry evicted");
        assert!(tt.probe(5 * n, 0).is_some(), "new entry missing");

        let survivors = [2 * n, 3 * n, 4 * n]
            .iter()
            .filter(|&&k| tt.probe(k, 0).is_some())
            .count();
        assert_eq!(survivors, 2, "exactly one aged entry should die");
    }

    #[test]
    fn test_hashfull_grows() {
        let mut tt = TT::new(1);
        assert_eq!(tt.hashfull(), 0);

        let n = tt.len() as u64;
        for i in 0..(n / 2) {
            tt.store(i, 1, Eval(0), TTBound::Exact, Move::NONE, 0);
        }

        let fill = tt.hashfull();
        assert!(fill > 0, "fill should rise after stores");
        assert!(fill <= 1000);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut tt = TT::new(1);
        tt.store(0x42, 1, Eval(7), TTBound::Exact, Move::NONE, 0);
        assert!(tt.probe(0x42, 0).is_some());

        tt.clear();
        assert!(tt.probe(0x42, 0).is_none());
        assert_eq!(tt.hashfull(), 0);
    }
}
