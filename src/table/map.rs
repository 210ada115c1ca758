use std::marker::PhantomData;

use anyhow::{ensure, Result};
use tokio::sync::Mutex;

use super::partitioner::SlotPartitioner;
use super::probe::ProbeSequence;
use super::types::{TableKey, TableRecord};
use crate::transport::RemoteArray;

/// One logical hash table over physically sharded storage.
///
/// Each rank constructs its own instance against the same remote regions.
/// All cross-rank traffic goes through the `RemoteArray` handles; nothing is
/// dereferenced locally, even for slots this rank happens to own.
pub struct DistributedHashMap<R, D, U>
where
    R: TableRecord,
    D: RemoteArray<R>,
    U: RemoteArray<i32>,
{
    partitioner: SlotPartitioner,
    data: Vec<D>,
    used: Vec<U>,
    insert_guard: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R, D, U> DistributedHashMap<R, D, U>
where
    R: TableRecord,
    D: RemoteArray<R>,
    U: RemoteArray<i32>,
{
    /// Wrap pre-allocated remote regions, one record region and one occupancy
    /// region per rank, each `capacity / rank_count` slots long.
    ///
    /// Region mismatches are setup bugs in the caller and fail construction
    /// outright rather than surfacing later as misrouted slots.
    pub fn new(capacity: u64, data: Vec<D>, used: Vec<U>) -> Result<Self> {
        ensure!(!data.is_empty(), "at least one rank region is required");
        ensure!(
            data.len() == used.len(),
            "record and occupancy region counts differ: {} vs {}",
            data.len(),
            used.len()
        );

        let partitioner = SlotPartitioner::new(capacity, data.len())?;
        let per_rank = partitioner.slots_per_rank() as usize;
        for (rank, (records, flags)) in data.iter().zip(used.iter()).enumerate() {
            ensure!(
                records.len() == per_rank,
                "rank {} record region holds {} slots, expected {}",
                rank,
                records.len(),
                per_rank
            );
            ensure!(
                flags.len() == per_rank,
                "rank {} occupancy region holds {} slots, expected {}",
                rank,
                flags.len(),
                per_rank
            );
        }

        Ok(Self {
            partitioner,
            data,
            used,
            insert_guard: Mutex::new(()),
            _record: PhantomData,
        })
    }

    /// Total logical slot count, identical on every rank.
    pub fn size(&self) -> u64 {
        self.partitioner.capacity()
    }

    pub fn rank_count(&self) -> usize {
        self.data.len()
    }

    pub fn partitioner(&self) -> &SlotPartitioner {
        &self.partitioner
    }

    /// Insert a record, probing from its key's home slot.
    ///
    /// Returns `Ok(false)` only if every slot in the table was already
    /// occupied. Inserts issued by this rank are serialized by the local
    /// guard; inserts from other ranks are not, and a concurrent remote claim
    /// of the same slot can silently overwrite this record.
    pub async fn insert(&self, record: &R) -> Result<bool> {
        let _guard = self.insert_guard.lock().await;

        let hash = record.key().hash();
        for slot in ProbeSequence::new(self.partitioner.home_slot(hash), self.size()) {
            if self.try_claim_slot(slot).await? {
                self.write_record(slot, record.clone()).await?;
                tracing::debug!("INSERT: claimed slot {} for hash {:#x}", slot, hash);
                return Ok(true);
            }
        }

        tracing::warn!(
            "INSERT: all {} slots occupied, dropping record with hash {:#x}",
            self.size(),
            hash
        );
        Ok(false)
    }

    /// Look up a record by key. Lock-free with respect to the insert guard
    /// and safe to run concurrently with inserts from any rank.
    pub async fn find(&self, key: &R::Key) -> Result<Option<R>> {
        let start = self.partitioner.home_slot(key.hash());
        for slot in ProbeSequence::new(start, self.size()) {
            if !self.slot_used(slot).await? {
                continue;
            }
            let record = self.read_record(slot).await?;
            // Probing may have displaced the key past its home slot, so only
            // the embedded key identifies the occupant.
            if record.key() == key {
                tracing::debug!("FIND: hit at slot {} (home {})", slot, start);
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Remote-read the occupancy flag of a global slot.
    pub async fn slot_used(&self, slot: u64) -> Result<bool> {
        let rank = self.partitioner.owner_of(slot);
        let flag = self.used[rank]
            .remote_read(self.partitioner.local_index(slot))
            .await?;
        Ok(flag != 0)
    }

    /// Remote-read the record stored in a global slot.
    pub async fn read_record(&self, slot: u64) -> Result<R> {
        let rank = self.partitioner.owner_of(slot);
        self.data[rank]
            .remote_read(self.partitioner.local_index(slot))
            .await
    }

    /// Remote-write a record into a global slot.
    pub async fn write_record(&self, slot: u64, record: R) -> Result<()> {
        let rank = self.partitioner.owner_of(slot);
        self.data[rank]
            .remote_write(self.partitioner.local_index(slot), record)
            .await
    }

    async fn mark_used(&self, slot: u64) -> Result<()> {
        let rank = self.partitioner.owner_of(slot);
        self.used[rank]
            .remote_write(self.partitioner.local_index(slot), 1)
            .await
    }

    /// Claim a free slot with two independent remote operations: read the
    /// occupancy flag, then write it.
    ///
    /// Not atomic across ranks. Two ranks can both read the flag as free
    /// before either writes it, and both will treat the slot as claimed; the
    /// later record write wins with no error raised. A true atomic remote
    /// exchange would replace this method and nothing else.
    pub async fn try_claim_slot(&self, slot: u64) -> Result<bool> {
        if self.slot_used(slot).await? {
            return Ok(false);
        }
        self.mark_used(slot).await?;
        Ok(true)
    }
}
