//! # Sketches of individual sequences
//!
//! A [`Signature`] ties a sequence identifier to the [`KmerMinHash`] built
//! from its canonical k-mer hashes.

use std::iter::Iterator;

use log::debug;
use typed_builder::TypedBuilder;

use crate::cmd::ComputeParameters;
use crate::encodings::{complement, is_valid_dna, revcomp};
use crate::sketch::minhash::KmerMinHash;
use crate::Error;
use crate::HashIntoType;

pub trait SigsTrait {
    fn size(&self) -> usize;
    fn to_vec(&self) -> Vec<u64>;
    fn ksize(&self) -> usize;
    fn check_compatible(&self, other: &Self) -> Result<(), Error>;
    fn seed(&self) -> u64;

    fn add_hash(&mut self, hash: HashIntoType);

    fn add_sequence(&mut self, seq: &[u8], force: bool) -> Result<(), Error> {
        let ready_hashes = SeqToHashes::new(seq, self.ksize(), force, self.seed());

        for hash_value in ready_hashes {
            self.add_hash(hash_value?);
        }

        Ok(())
    }
}

/// Number of k-mer windows in a sequence of `len` bytes.
///
/// `len - ksize + 1`, or zero when the sequence is shorter than `ksize` or
/// `ksize` is zero.
#[inline]
pub fn kmer_count(len: usize, k_size: usize) -> usize {
    if k_size > 0 && len >= k_size {
        len - k_size + 1
    } else {
        0
    }
}

/// Every contiguous window of `ksize` bytes, in position order.
///
/// Sketching goes through [`SeqToHashes`], which walks the same windows over
/// an upper-cased copy of the sequence. `Kmers` exposes the raw windows to
/// callers that need the k-mers themselves.
pub struct Kmers<'a> {
    sequence: &'a [u8],
    k_size: usize,
    kmer_index: usize,
    max_index: usize,
}

impl<'a> Kmers<'a> {
    pub fn new(seq: &'a [u8], k_size: usize) -> Kmers<'a> {
        Kmers {
            sequence: seq,
            k_size,
            kmer_index: 0,
            max_index: kmer_count(seq.len(), k_size),
        }
    }

    /// The `index`-th window, if there is one.
    #[inline]
    fn window(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.max_index {
            return None;
        }
        Some(&self.sequence[index..index + self.k_size])
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let kmer = self.window(self.kmer_index)?;
        self.kmer_index += 1;
        Some(kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.max_index - self.kmer_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Kmers<'_> {}

/// Strand-independent hash of an upper-case k-mer: the smaller of the hash
/// of the k-mer and the hash of its reverse complement.
pub fn canonical_hash(kmer: &[u8], seed: u64) -> Result<HashIntoType, Error> {
    let rc = revcomp(kmer)?;
    Ok(std::cmp::min(
        crate::_hash_murmur(kmer, seed),
        crate::_hash_murmur(&rc, seed),
    ))
}

/// Canonical hashes for every k-mer of a sequence, in position order.
///
/// The sequence is upper-cased first. A k-mer holding anything outside
/// `ACGTN` yields [`Error::InvalidDNA`] and ends the iteration, unless
/// `force` is set, in which case the k-mer is skipped.
pub struct SeqToHashes {
    sequence: Vec<u8>,
    rc: Vec<u8>,
    k_size: usize,
    kmer_index: usize,
    max_index: usize,
    force: bool,
    seed: u64,
}

impl SeqToHashes {
    pub fn new(seq: &[u8], k_size: usize, force: bool, seed: u64) -> SeqToHashes {
        let sequence = seq.to_ascii_uppercase();
        let max_index = kmer_count(sequence.len(), k_size);

        // invalid positions complement to 0; k-mers covering them are
        // rejected before their reverse complement is read
        let rc = sequence
            .iter()
            .rev()
            .map(|nt| complement(*nt))
            .collect();

        SeqToHashes {
            sequence,
            rc,
            k_size,
            kmer_index: 0,
            max_index,
            force,
            seed,
        }
    }
}

impl Iterator for SeqToHashes {
    type Item = Result<u64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.kmer_index < self.max_index {
            let start = self.kmer_index;
            let kmer = Kmers::new(&self.sequence, self.k_size).window(start)?;

            if !is_valid_dna(kmer) {
                if self.force {
                    self.kmer_index += 1;
                    continue;
                }
                // fuse: nothing else is produced after an error
                self.kmer_index = self.max_index;
                return Some(Err(Error::InvalidDNA {
                    message: String::from_utf8_lossy(kmer).into_owned(),
                }));
            }

            // The reverse complement of the k-mer starting at `i` sits at
            // `len - ksize - i` in the reverse complement of the sequence.
            let len = self.sequence.len();
            let krc = &self.rc[len - self.k_size - start..len - start];

            let hash = std::cmp::min(
                crate::_hash_murmur(kmer, self.seed),
                crate::_hash_murmur(krc, self.seed),
            );
            self.kmer_index += 1;
            return Some(Ok(hash));
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Signature {
    #[builder(setter(into))]
    name: String,

    #[builder(default, setter(into))]
    filename: Option<String>,

    #[builder(default)]
    minhash: KmerMinHash,
}

impl Signature {
    /// Empty signature named `name`, configured from `params`.
    pub fn from_params(name: &str, params: &ComputeParameters) -> Signature {
        Signature::builder()
            .name(name)
            .minhash(KmerMinHash::new(
                params.num(),
                params.ksize(),
                params.seed(),
            ))
            .build()
    }

    /// Sketch a whole sequence in one go.
    pub fn from_sequence(
        name: &str,
        seq: &[u8],
        params: &ComputeParameters,
    ) -> Result<Signature, Error> {
        let mut sig = Signature::from_params(name, params);
        sig.add_sequence(seq, params.force())?;
        debug!(
            "sketched {} ({} hashes, md5 {})",
            sig.name,
            sig.minhash.size(),
            sig.md5sum()
        );
        Ok(sig)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: &str) {
        self.filename = Some(filename.into());
    }

    pub fn minhash(&self) -> &KmerMinHash {
        &self.minhash
    }

    pub fn md5sum(&self) -> String {
        self.minhash.md5sum()
    }

    pub fn add_sequence(&mut self, seq: &[u8], force: bool) -> Result<(), Error> {
        self.minhash.add_sequence(seq, force)
    }

    /// Estimated Jaccard distance between the two sequences.
    pub fn jaccard_distance(&self, other: &Signature) -> Result<f64, Error> {
        self.minhash.jaccard_distance(&other.minhash)
    }
}
