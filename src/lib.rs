//! # Alignment-free distances between nucleotide sequences.
//!
//! minsketch decomposes every sequence into overlapping k-mers, hashes each
//! k-mer together with its reverse complement and keeps the smallest hashes
//! as a bounded-size [MinHash sketch][0]. Comparing two sketches gives a
//! fast estimate of the Jaccard distance between the full k-mer sets.
//!
//! [0]: https://en.wikipedia.org/wiki/MinHash
//!
//! The pipeline is split in stages, each returning its own output:
//! [`loader`] reads `(identifier, sequence)` records, [`cmd::compute_signatures`]
//! builds one [`signature::Signature`] per record and
//! [`compare::pairwise_distances`] reports every unordered pair.

pub mod errors;
pub use errors::MinSketchError as Error;

pub type Result<T> = std::result::Result<T, Error>;

pub mod cmd;
pub mod compare;
pub mod encodings;
pub mod loader;
pub mod signature;
pub mod sketch;

use murmurhash3::murmurhash3_x64_128;

pub type HashIntoType = u64;

pub fn _hash_murmur(kmer: &[u8], seed: u64) -> u64 {
    murmurhash3_x64_128(kmer, seed).0
}
