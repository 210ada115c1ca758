//! K-mer Module Tests
//!
//! Validates 2-bit packing, key-only equality, extension stepping, hash
//! stability, and the dataset reader.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;

    use rand::Rng;

    use crate::kmer::reader::{parse_line, rank_shard, read_kmers};
    use crate::kmer::types::{KmerRecord, PackedKmer, KMER_LEN};

    const SAMPLE: &str = "ACGTACGTACGTACGTACG";

    fn random_kmer(rng: &mut impl Rng) -> String {
        (0..KMER_LEN)
            .map(|_| b"ACGT"[rng.gen_range(0..4)] as char)
            .collect()
    }

    // ============================================================
    // PACKING AND EQUALITY
    // ============================================================

    #[test]
    fn test_pack_roundtrip() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        assert_eq!(kmer.to_string(), SAMPLE);
    }

    #[test]
    fn test_pack_roundtrip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let seq = random_kmer(&mut rng);
            let kmer: PackedKmer = seq.parse().unwrap();
            assert_eq!(kmer.to_string(), seq);
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("ACGT".parse::<PackedKmer>().is_err(), "too short");
        assert!(
            format!("{}A", SAMPLE).parse::<PackedKmer>().is_err(),
            "too long"
        );
        assert!(
            SAMPLE.replace('G', "N").parse::<PackedKmer>().is_err(),
            "invalid base"
        );
    }

    #[test]
    fn test_record_equality_ignores_extensions() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        let a = KmerRecord::new(kmer, b'A', b'T').unwrap();
        let b = KmerRecord::new(kmer, b'F', b'G').unwrap();
        assert_eq!(a, b, "equality is defined on the key portion only");
    }

    #[test]
    fn test_record_rejects_bad_extensions() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        assert!(KmerRecord::new(kmer, b'X', b'T').is_err());
        assert!(KmerRecord::new(kmer, b'A', b'0').is_err());
    }

    // ============================================================
    // EXTENSION STEPPING
    // ============================================================

    #[test]
    fn test_next_kmer_shifts_and_appends() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        let record = KmerRecord::new(kmer, b'F', b'T').unwrap();

        let next = record.next_kmer().unwrap();
        assert_eq!(next.to_string(), "CGTACGTACGTACGTACGT");
    }

    #[test]
    fn test_next_kmer_fails_on_terminal() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        let record = KmerRecord::new(kmer, b'A', b'F').unwrap();

        assert!(record.is_terminal());
        assert!(record.next_kmer().is_err());
    }

    #[test]
    fn test_start_and_terminal_flags() {
        let kmer: PackedKmer = SAMPLE.parse().unwrap();
        let start = KmerRecord::new(kmer, b'F', b'A').unwrap();
        let middle = KmerRecord::new(kmer, b'C', b'A').unwrap();

        assert!(start.is_start());
        assert!(!start.is_terminal());
        assert!(!middle.is_start());
    }

    // ============================================================
    // HASHING
    // ============================================================

    #[test]
    fn test_hash_is_deterministic() {
        let a: PackedKmer = SAMPLE.parse().unwrap();
        let b: PackedKmer = SAMPLE.parse().unwrap();
        assert_eq!(a.hash(), b.hash(), "same key must hash identically");
    }

    #[test]
    fn test_hash_distributes() {
        // Mirror of the partition distribution check: 1000 random keys over
        // 256 buckets should use well over 100 of them.
        let mut rng = rand::thread_rng();
        let mut buckets = HashSet::new();
        for _ in 0..1000 {
            let kmer: PackedKmer = random_kmer(&mut rng).parse().unwrap();
            buckets.insert(kmer.hash() % 256);
        }
        assert!(
            buckets.len() > 100,
            "expected a reasonable spread, got {} buckets",
            buckets.len()
        );
    }

    // ============================================================
    // READER
    // ============================================================

    #[test]
    fn test_parse_line() {
        let record = parse_line(&format!("{} FT", SAMPLE)).unwrap();
        assert_eq!(record.kmer().to_string(), SAMPLE);
        assert_eq!(record.backward_ext(), b'F');
        assert_eq!(record.forward_ext(), b'T');
    }

    #[test]
    fn test_parse_line_rejects_malformed_input() {
        assert!(parse_line(SAMPLE).is_err(), "missing extensions");
        assert!(parse_line(&format!("{} FTA", SAMPLE)).is_err(), "three symbols");
        assert!(parse_line(&format!("{} F", SAMPLE)).is_err(), "one symbol");
    }

    #[test]
    fn test_read_kmers_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{} FA", SAMPLE).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{} AF", SAMPLE).unwrap();

        let records = read_kmers(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_start());
        assert!(records[1].is_terminal());
    }

    #[test]
    fn test_read_kmers_reports_bad_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{} FA", SAMPLE).unwrap();
        writeln!(file, "NOTAKMER FA").unwrap();

        assert!(read_kmers(file.path()).is_err());
    }

    // ============================================================
    // SHARDING
    // ============================================================

    #[test]
    fn test_rank_shard_is_disjoint_and_exhaustive() {
        for (total, ranks) in [(10, 3), (8, 2), (7, 7), (5, 8), (0, 4)] {
            let mut covered = Vec::new();
            for rank in 0..ranks {
                let shard = rank_shard(total, rank, ranks);
                assert!(shard.end <= total);
                covered.extend(shard);
            }
            assert_eq!(
                covered,
                (0..total).collect::<Vec<_>>(),
                "shards for total={} ranks={} must cover each line exactly once",
                total,
                ranks
            );
        }
    }

    #[test]
    fn test_rank_shard_spreads_remainder() {
        // 10 lines over 3 ranks: 4 + 3 + 3.
        assert_eq!(rank_shard(10, 0, 3), 0..4);
        assert_eq!(rank_shard(10, 1, 3), 4..7);
        assert_eq!(rank_shard(10, 2, 3), 7..10);
    }
}
