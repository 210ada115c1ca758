//! Distributed K-mer Hash Table Library
//!
//! This library crate implements the shared data structure at the heart of a
//! parallel genome assembler: one logical, fixed-capacity hash table whose
//! slots are physically sharded across cooperating ranks and reached only
//! through one-sided remote memory operations.
//!
//! ## Architecture Modules
//! The crate is composed of four loosely coupled subsystems:
//!
//! - **`kmer`**: The data model. Fixed-length 2-bit packed k-mer keys, records
//!   carrying contig extension symbols, and the dataset reader that shards
//!   input lines across ranks.
//! - **`table`**: The core. Static slot partitioning across ranks, linear
//!   probing over the flat slot space, and the non-atomic two-step slot claim
//!   whose cross-rank race is documented, accepted behavior.
//! - **`transport`**: The one-sided access seam. `RemoteArray` is the only
//!   path to another rank's memory; an in-process emulation with simulated
//!   latency stands in for an RDMA/PGAS fabric.
//! - **`assembly`**: The consumer. Walks forward extensions through the table
//!   to reconstruct contigs from start k-mers.

pub mod assembly;
pub mod kmer;
pub mod table;
pub mod transport;
