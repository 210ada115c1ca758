//! Contig Assembly Module
//!
//! Walks de Bruijn chains through the distributed table to reconstruct
//! contigs. Each rank starts from the start k-mers of its own input shard and
//! follows forward extensions with repeated `find` calls, which may land on
//! any rank's partition.

pub mod walker;
