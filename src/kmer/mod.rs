//! K-mer Data Model Module
//!
//! Defines the fixed-length genomic key and record types stored in the
//! distributed hash table, plus the dataset reader that produces them.
//!
//! ## Core Concepts
//! - **Packing**: A k-mer of `KMER_LEN` bases is 2-bit encoded (`A/C/G/T`) and
//!   packed four bases per byte, so records stay small and fixed-size.
//! - **Extensions**: Each record carries the symbol preceding and following its
//!   k-mer in the source read, or `F` when the k-mer starts or ends a contig.
//! - **Hashing**: Keys hash with a fixed, seedless function so every rank in a
//!   job computes identical slot placements.
//!
//! ## Submodules
//! - **`types`**: `PackedKmer` and `KmerRecord`.
//! - **`reader`**: Dataset parsing and per-rank input sharding.

pub mod reader;
pub mod types;

#[cfg(test)]
mod tests;
