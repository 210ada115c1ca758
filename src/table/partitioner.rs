use anyhow::{ensure, Result};

/// Static partition of the flat slot space into contiguous per-rank ranges.
///
/// A pure function of `(capacity, rank_count)` decided once at construction;
/// every rank computes identical owners for every slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotPartitioner {
    capacity: u64,
    rank_count: usize,
    slots_per_rank: u64,
}

impl SlotPartitioner {
    pub fn new(capacity: u64, rank_count: usize) -> Result<Self> {
        ensure!(capacity > 0, "table capacity must be non-zero");
        ensure!(rank_count > 0, "rank count must be non-zero");
        ensure!(
            capacity % rank_count as u64 == 0,
            "capacity {} does not divide evenly across {} ranks",
            capacity,
            rank_count
        );

        Ok(Self {
            capacity,
            rank_count,
            slots_per_rank: capacity / rank_count as u64,
        })
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn rank_count(&self) -> usize {
        self.rank_count
    }

    pub fn slots_per_rank(&self) -> u64 {
        self.slots_per_rank
    }

    /// First probe slot for a key hash.
    pub fn home_slot(&self, hash: u64) -> u64 {
        hash % self.capacity
    }

    /// Rank owning a global slot. Probing may carry a candidate slot past a
    /// partition boundary, so ownership is recomputed per candidate.
    pub fn owner_of(&self, slot: u64) -> usize {
        ((slot % self.capacity) / self.slots_per_rank) as usize
    }

    /// Index of a global slot inside its owner's region.
    pub fn local_index(&self, slot: u64) -> u64 {
        slot % self.slots_per_rank
    }
}
