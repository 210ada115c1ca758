//! Distributed Hash Table Module
//!
//! Implements a fixed-capacity, linearly probed hash table whose slot space is
//! sharded across ranks and accessed only through one-sided remote reads and
//! writes.
//!
//! ## Core Concepts
//! - **Partitioning**: The flat slot space is split into contiguous per-rank
//!   ranges, fixed at construction (`SlotPartitioner`).
//! - **Probing**: Collisions resolve by linear probing modulo the total
//!   capacity, bounded by one full pass (`ProbeSequence`).
//! - **Claiming**: A slot is claimed with an independent remote read followed
//!   by a remote write. Two ranks can both observe a slot as free and both
//!   claim it; the later record write wins and the earlier one is silently
//!   lost. This is accepted behavior, not a bug to patch here.
//! - **Local guard**: Inserts issued by one rank are serialized by a
//!   rank-local mutex. Finds take no lock, and the guard offers no protection
//!   against other ranks.

pub mod map;
pub mod partitioner;
pub mod probe;
pub mod types;
