use anyhow::{bail, ensure, Result};

use crate::kmer::types::KmerRecord;
use crate::table::map::DistributedHashMap;
use crate::transport::RemoteArray;

/// Follow forward extensions from a start k-mer until the terminal record,
/// returning the reconstructed contig sequence.
///
/// Bounded by the table capacity: a chain longer than the table can only mean
/// a cycle in the extensions, which is an input defect.
pub async fn walk_contig<D, U>(
    table: &DistributedHashMap<KmerRecord, D, U>,
    start: &KmerRecord,
) -> Result<String>
where
    D: RemoteArray<KmerRecord>,
    U: RemoteArray<i32>,
{
    ensure!(
        start.is_start(),
        "contig walk must begin at a start k-mer, got extensions '{}{}'",
        start.backward_ext() as char,
        start.forward_ext() as char
    );

    let mut contig = start.kmer().to_string();
    let mut current = *start;
    let mut steps = 0u64;

    while !current.is_terminal() {
        ensure!(
            steps < table.size(),
            "contig exceeded table capacity; extension cycle suspected"
        );
        let next_key = current.next_kmer()?;
        let Some(next) = table.find(&next_key).await? else {
            bail!("dangling forward extension: k-mer {} not in table", next_key);
        };
        contig.push(current.forward_ext() as char);
        current = next;
        steps += 1;
    }

    Ok(contig)
}

/// Walk every start k-mer of a rank's shard.
pub async fn assemble<D, U>(
    table: &DistributedHashMap<KmerRecord, D, U>,
    starts: &[KmerRecord],
) -> Result<Vec<String>>
where
    D: RemoteArray<KmerRecord>,
    U: RemoteArray<i32>,
{
    let mut contigs = Vec::with_capacity(starts.len());
    for start in starts {
        contigs.push(walk_contig(table, start).await?);
    }
    tracing::debug!("Assembled {} contigs from {} starts", contigs.len(), starts.len());
    Ok(contigs)
}
