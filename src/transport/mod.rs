//! Remote Memory Transport Module
//!
//! Models the global address space: every rank's exposed memory is addressable
//! by every other rank through one-sided reads and writes, with no code running
//! on the remote side to service a request.
//!
//! ## Core Concepts
//! - **One-sided access**: `RemoteArray` exposes exactly `remote_read` and
//!   `remote_write`, each a suspension point that blocks the issuing rank for
//!   one round trip. No local dereference exists, even on the owning rank.
//! - **External allocation**: Regions are allocated and registered by the
//!   runtime bootstrap and handed to the table by value; the table never
//!   creates or tears them down.
//! - **Reference substrate**: `memory` emulates the address space inside one
//!   process so multi-rank behavior (including claim races) can run and be
//!   tested without an RDMA fabric.

use std::future::Future;

use anyhow::Result;

pub mod memory;

#[cfg(test)]
mod tests;

/// A remotely addressable array of `T` resident on one rank.
///
/// Both operations suspend the caller until the owning rank's memory has
/// serviced the access. There is no batching at this layer: one call, one
/// slot, one round trip.
pub trait RemoteArray<T>: Send + Sync {
    /// Rank that physically holds this region.
    fn owner_rank(&self) -> usize;

    /// Number of slots in the region.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remote_read(&self, index: u64) -> impl Future<Output = Result<T>> + Send;

    fn remote_write(&self, index: u64, value: T) -> impl Future<Output = Result<()>> + Send;
}
