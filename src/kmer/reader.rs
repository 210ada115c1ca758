use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use super::types::KmerRecord;

/// Read an assembly dataset: one record per line, a k-mer followed by its
/// two extension symbols, e.g. `ACGT...CCA TG`.
pub fn read_kmers(path: &Path) -> Result<Vec<KmerRecord>> {
    let file = File::open(path)
        .with_context(|| format!("opening k-mer dataset {}", path.display()))?;

    let mut records = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = parse_line(trimmed)
            .with_context(|| format!("line {} of {}", line_no + 1, path.display()))?;
        records.push(record);
    }

    tracing::info!("Read {} k-mers from {}", records.len(), path.display());
    Ok(records)
}

pub fn parse_line(line: &str) -> Result<KmerRecord> {
    let mut fields = line.split_whitespace();
    let (Some(seq), Some(exts)) = (fields.next(), fields.next()) else {
        bail!("expected '<kmer> <extensions>', got '{}'", line);
    };
    ensure!(
        exts.len() == 2,
        "expected two extension symbols, got '{}'",
        exts
    );

    let kmer = seq.parse()?;
    let exts = exts.as_bytes();
    KmerRecord::new(kmer, exts[0], exts[1])
}

/// The contiguous range of input lines rank `rank` is responsible for.
///
/// Every rank computes the same split: disjoint, exhaustive, with any
/// remainder spread over the first ranks.
pub fn rank_shard(total: usize, rank: usize, rank_count: usize) -> Range<usize> {
    let base = total / rank_count;
    let extra = total % rank_count;
    let start = rank * base + rank.min(extra);
    let len = base + usize::from(rank < extra);
    start..start + len
}
