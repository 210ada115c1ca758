use std::fmt;
use std::str::FromStr;

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::table::types::{TableKey, TableRecord};

/// Number of bases in a k-mer. Fixed for the whole job; every rank must be
/// built with the same value or slot placements diverge.
pub const KMER_LEN: usize = 19;

/// Bytes needed to hold `KMER_LEN` 2-bit encoded bases.
pub const KMER_PACKED_LEN: usize = (KMER_LEN + 3) / 4;

/// Extension symbol marking the start or end of a contig.
pub const TERMINAL_EXT: u8 = b'F';

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn encode_base(base: u8) -> Result<u8> {
    match base {
        b'A' => Ok(0),
        b'C' => Ok(1),
        b'G' => Ok(2),
        b'T' => Ok(3),
        other => bail!("invalid base '{}' (expected A, C, G or T)", other as char),
    }
}

fn decode_base(code: u8) -> u8 {
    match code & 0b11 {
        0 => b'A',
        1 => b'C',
        2 => b'G',
        _ => b'T',
    }
}

fn is_extension(symbol: u8) -> bool {
    matches!(symbol, b'A' | b'C' | b'G' | b'T' | TERMINAL_EXT)
}

/// A fixed-length genomic substring, 2-bit packed.
///
/// This is the key type of the distributed table. Two k-mers are equal iff
/// their packed forms are equal, and `hash()` depends only on the packed
/// bytes, so placement is identical on every rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PackedKmer {
    data: [u8; KMER_PACKED_LEN],
}

impl PackedKmer {
    /// Build from 2-bit base codes.
    pub(crate) fn from_bases(bases: &[u8; KMER_LEN]) -> Self {
        let mut data = [0u8; KMER_PACKED_LEN];
        for (i, &code) in bases.iter().enumerate() {
            data[i / 4] |= (code & 0b11) << ((i % 4) * 2);
        }
        Self { data }
    }

    /// Unpack into 2-bit base codes.
    pub(crate) fn bases(&self) -> [u8; KMER_LEN] {
        let mut bases = [0u8; KMER_LEN];
        for (i, code) in bases.iter_mut().enumerate() {
            *code = (self.data[i / 4] >> ((i % 4) * 2)) & 0b11;
        }
        bases
    }

    /// Seedless FNV-1a over the packed bytes. Stable across processes, unlike
    /// `RandomState`-backed hashers.
    pub fn hash(&self) -> u64 {
        self.data
            .iter()
            .fold(FNV_OFFSET, |h, &b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
    }
}

impl FromStr for PackedKmer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ensure!(
            s.len() == KMER_LEN,
            "k-mer '{}' has {} bases, expected {}",
            s,
            s.len(),
            KMER_LEN
        );
        let mut bases = [0u8; KMER_LEN];
        for (code, &byte) in bases.iter_mut().zip(s.as_bytes()) {
            *code = encode_base(byte)?;
        }
        Ok(Self::from_bases(&bases))
    }
}

impl fmt::Display for PackedKmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.bases() {
            write!(f, "{}", decode_base(code) as char)?;
        }
        Ok(())
    }
}

/// A k-mer plus its backward and forward extension symbols.
///
/// Immutable once constructed; equality is defined on the key portion only,
/// so a record found in the table compares equal to the record originally
/// inserted under the same k-mer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KmerRecord {
    kmer: PackedKmer,
    exts: [u8; 2],
}

impl PartialEq for KmerRecord {
    fn eq(&self, other: &Self) -> bool {
        self.kmer == other.kmer
    }
}

impl Eq for KmerRecord {}

impl KmerRecord {
    pub fn new(kmer: PackedKmer, backward: u8, forward: u8) -> Result<Self> {
        ensure!(
            is_extension(backward) && is_extension(forward),
            "invalid extension pair '{}{}'",
            backward as char,
            forward as char
        );
        Ok(Self {
            kmer,
            exts: [backward, forward],
        })
    }

    pub fn kmer(&self) -> &PackedKmer {
        &self.kmer
    }

    /// Symbol preceding this k-mer in the source read, or `F`.
    pub fn backward_ext(&self) -> u8 {
        self.exts[0]
    }

    /// Symbol following this k-mer in the source read, or `F`.
    pub fn forward_ext(&self) -> u8 {
        self.exts[1]
    }

    /// A start k-mer begins a contig.
    pub fn is_start(&self) -> bool {
        self.exts[0] == TERMINAL_EXT
    }

    /// A terminal k-mer ends a contig.
    pub fn is_terminal(&self) -> bool {
        self.exts[1] == TERMINAL_EXT
    }

    /// The k-mer one base further along the contig: drop the first base,
    /// append the forward extension.
    pub fn next_kmer(&self) -> Result<PackedKmer> {
        ensure!(
            !self.is_terminal(),
            "terminal k-mer {} has no following k-mer",
            self.kmer
        );
        let mut bases = self.kmer.bases();
        bases.copy_within(1.., 0);
        bases[KMER_LEN - 1] = encode_base(self.exts[1])?;
        Ok(PackedKmer::from_bases(&bases))
    }
}

impl TableKey for PackedKmer {
    fn hash(&self) -> u64 {
        PackedKmer::hash(self)
    }
}

impl TableRecord for KmerRecord {
    type Key = PackedKmer;

    fn key(&self) -> &PackedKmer {
        &self.kmer
    }
}
