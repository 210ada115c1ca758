use std::path::PathBuf;
use std::sync::Arc;

use kmer_dht::assembly::walker;
use kmer_dht::kmer::reader;
use kmer_dht::kmer::types::KmerRecord;
use kmer_dht::table::map::DistributedHashMap;
use kmer_dht::transport::memory::{MemoryRegion, MemoryWorld};
use tokio::sync::Barrier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --kmers <file> [--ranks <n>] [--capacity <slots>] [--output <file>]",
            args[0]
        );
        eprintln!("Example: {} --kmers test.txt --ranks 4", args[0]);
        std::process::exit(1);
    }

    let mut kmers_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut rank_count: usize = 2;
    let mut capacity: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--kmers" => {
                kmers_path = Some(args[i + 1].clone().into());
                i += 2;
            }
            "--output" => {
                output_path = Some(args[i + 1].clone().into());
                i += 2;
            }
            "--ranks" => {
                rank_count = args[i + 1].parse()?;
                i += 2;
            }
            "--capacity" => {
                capacity = Some(args[i + 1].parse()?);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let kmers_path = kmers_path.expect("--kmers is required");
    anyhow::ensure!(rank_count > 0, "--ranks must be at least 1");

    let records = Arc::new(reader::read_kmers(&kmers_path)?);

    // Default to twice the input size, rounded up to divide evenly.
    let capacity = capacity.unwrap_or_else(|| {
        let wanted = (records.len() as u64 * 2).max(rank_count as u64);
        wanted.div_ceil(rank_count as u64) * rank_count as u64
    });
    anyhow::ensure!(
        capacity % rank_count as u64 == 0,
        "--capacity {} does not divide evenly across {} ranks",
        capacity,
        rank_count
    );
    let per_rank = (capacity / rank_count as u64) as usize;

    tracing::info!(
        "Starting {} ranks, {} slots total ({} per rank)",
        rank_count,
        capacity,
        per_rank
    );

    let world = MemoryWorld::new(rank_count);
    let data: Vec<MemoryRegion<KmerRecord>> = world.alloc(per_rank);
    let used: Vec<MemoryRegion<i32>> = world.alloc(per_rank);

    let barrier = Arc::new(Barrier::new(rank_count));
    let mut handles = Vec::with_capacity(rank_count);

    for rank in 0..rank_count {
        let data = data.clone();
        let used = used.clone();
        let records = Arc::clone(&records);
        let barrier = Arc::clone(&barrier);

        handles.push(tokio::spawn(async move {
            let table = DistributedHashMap::new(capacity, data, used)?;

            let shard = reader::rank_shard(records.len(), rank, rank_count);
            let mine = &records[shard];
            for record in mine {
                if !table.insert(record).await? {
                    anyhow::bail!("hash table full while rank {} inserted its shard", rank);
                }
            }

            // All shards must be inserted before any rank starts walking.
            barrier.wait().await;

            let starts: Vec<KmerRecord> = mine.iter().filter(|r| r.is_start()).copied().collect();
            let contigs = walker::assemble(&table, &starts).await?;
            tracing::info!(
                "Rank {}: inserted {} k-mers, assembled {} contigs",
                rank,
                mine.len(),
                contigs.len()
            );
            anyhow::Ok(contigs)
        }));
    }

    let mut contigs = Vec::new();
    for handle in handles {
        contigs.extend(handle.await??);
    }

    let total_bases: usize = contigs.iter().map(|c| c.len()).sum();
    tracing::info!("Assembled {} contigs, {} total bases", contigs.len(), total_bases);

    if let Some(path) = output_path {
        std::fs::write(&path, contigs.join("\n") + "\n")?;
        tracing::info!("Wrote contigs to {}", path.display());
    }

    Ok(())
}
