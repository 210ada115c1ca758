use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Result};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RemoteArray;

/// In-process stand-in for the partitioned global address space.
///
/// Allocates per-rank regions that every rank task shares. An optional
/// simulated round-trip latency widens the window between the occupancy read
/// and write of a claim, which the race tests rely on.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    rank_count: usize,
    latency: Option<Duration>,
}

impl MemoryWorld {
    pub fn new(rank_count: usize) -> Self {
        Self {
            rank_count,
            latency: None,
        }
    }

    /// Apply a simulated round trip to every remote operation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn rank_count(&self) -> usize {
        self.rank_count
    }

    /// Allocate one region per rank, each `per_rank_len` slots long.
    pub fn alloc<T>(&self, per_rank_len: usize) -> Vec<MemoryRegion<T>> {
        (0..self.rank_count)
            .map(|rank| MemoryRegion {
                owner: rank,
                len: per_rank_len,
                slots: Arc::new(DashMap::new()),
                latency: self.latency,
                _marker: PhantomData,
            })
            .collect()
    }
}

/// One rank's exposed memory region.
///
/// Slot contents are held as serialized bytes, the way they would cross a
/// wire; an unwritten slot reads back as `T::default()`, standing in for
/// zeroed registered memory.
pub struct MemoryRegion<T> {
    owner: usize,
    len: usize,
    slots: Arc<DashMap<u64, Vec<u8>>>,
    latency: Option<Duration>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for MemoryRegion<T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            len: self.len,
            slots: Arc::clone(&self.slots),
            latency: self.latency,
            _marker: PhantomData,
        }
    }
}

impl<T> MemoryRegion<T> {
    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl<T> RemoteArray<T> for MemoryRegion<T>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    fn owner_rank(&self) -> usize {
        self.owner
    }

    fn len(&self) -> usize {
        self.len
    }

    async fn remote_read(&self, index: u64) -> Result<T> {
        self.round_trip().await;
        ensure!(
            (index as usize) < self.len,
            "remote read past region end: {} >= {}",
            index,
            self.len
        );
        match self.slots.get(&index) {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(T::default()),
        }
    }

    async fn remote_write(&self, index: u64, value: T) -> Result<()> {
        self.round_trip().await;
        ensure!(
            (index as usize) < self.len,
            "remote write past region end: {} >= {}",
            index,
            self.len
        );
        let bytes = serde_json::to_vec(&value)?;
        self.slots.insert(index, bytes);
        Ok(())
    }
}
