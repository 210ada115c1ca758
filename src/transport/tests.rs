//! Transport Module Tests
//!
//! Validates the in-process remote-array substrate: zeroed-memory defaults,
//! write/read round trips, bounds checking, and shared storage across rank
//! handles.

#[cfg(test)]
mod tests {
    use crate::transport::memory::{MemoryRegion, MemoryWorld};
    use crate::transport::RemoteArray;

    #[tokio::test]
    async fn test_unwritten_slot_reads_default() {
        let world = MemoryWorld::new(1);
        let regions: Vec<MemoryRegion<i32>> = world.alloc(4);

        let value = regions[0].remote_read(2).await.unwrap();
        assert_eq!(value, 0, "unwritten memory must read back zeroed");
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let world = MemoryWorld::new(1);
        let regions: Vec<MemoryRegion<String>> = world.alloc(4);

        regions[0]
            .remote_write(1, "payload".to_string())
            .await
            .unwrap();
        assert_eq!(regions[0].remote_read(1).await.unwrap(), "payload");
        assert_eq!(
            regions[0].remote_read(0).await.unwrap(),
            "",
            "neighboring slots stay untouched"
        );
    }

    #[tokio::test]
    async fn test_out_of_bounds_access_fails() {
        let world = MemoryWorld::new(1);
        let regions: Vec<MemoryRegion<i32>> = world.alloc(4);

        assert!(regions[0].remote_read(4).await.is_err());
        assert!(regions[0].remote_write(4, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_regions_carry_owner_and_length() {
        let world = MemoryWorld::new(3);
        let regions: Vec<MemoryRegion<i32>> = world.alloc(8);

        assert_eq!(regions.len(), 3);
        for (rank, region) in regions.iter().enumerate() {
            assert_eq!(region.owner_rank(), rank);
            assert_eq!(region.len(), 8);
        }
    }

    #[tokio::test]
    async fn test_cloned_handles_share_storage() {
        // Every rank holds its own handle to the same physical region.
        let world = MemoryWorld::new(2);
        let regions: Vec<MemoryRegion<i32>> = world.alloc(4);

        let writer = regions[1].clone();
        let reader = regions[1].clone();

        writer.remote_write(3, 7).await.unwrap();
        assert_eq!(reader.remote_read(3).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_distinct_ranks_do_not_share_storage() {
        let world = MemoryWorld::new(2);
        let regions: Vec<MemoryRegion<i32>> = world.alloc(4);

        regions[0].remote_write(0, 9).await.unwrap();
        assert_eq!(
            regions[1].remote_read(0).await.unwrap(),
            0,
            "rank 1's region is separate memory"
        );
    }
}
