//! Record and key contracts for the distributed table.
//!
//! The table never trusts slot position alone: every stored value embeds its
//! own key, which is re-checked after each remote read during lookup.

/// A key storable in the distributed table.
pub trait TableKey: PartialEq + Send + Sync {
    /// Deterministic 64-bit hash. Must be seedless: every rank in the job has
    /// to compute the same value for the same key, across processes.
    fn hash(&self) -> u64;
}

/// A value storable in the distributed table.
///
/// Records embed the key they are stored under, so a lookup can verify the
/// occupant of a probed slot.
pub trait TableRecord: Clone + Send + Sync {
    type Key: TableKey;

    fn key(&self) -> &Self::Key;
}
