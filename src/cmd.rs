use std::path::Path;

use getset::{CopyGetters, Setters};
use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use typed_builder::TypedBuilder;

use crate::compare::{pairwise_distances, EmptyPolicy, PairDistance};
use crate::loader::{load_sequences, SequenceRecord};
use crate::signature::Signature;
use crate::sketch::minhash::{DEFAULT_KSIZE, DEFAULT_NUM, DEFAULT_SEED};
use crate::{Error, Result};

/// Run-wide settings for sketching and comparing sequences.
#[derive(Debug, TypedBuilder, CopyGetters, Setters, Clone, Copy, PartialEq)]
pub struct ComputeParameters {
    /// k-mer length.
    #[getset(get_copy = "pub", set = "pub")]
    #[builder(default = DEFAULT_KSIZE)]
    ksize: u32,

    /// Sketch size: how many of the smallest hashes are kept.
    #[getset(get_copy = "pub", set = "pub")]
    #[builder(default = DEFAULT_NUM)]
    num: u32,

    #[getset(get_copy = "pub", set = "pub")]
    #[builder(default = DEFAULT_SEED)]
    seed: u64,

    /// Skip k-mers with bases outside `ACGTN` instead of failing.
    #[getset(get_copy = "pub", set = "pub")]
    #[builder(default = false)]
    force: bool,

    #[getset(get_copy = "pub", set = "pub")]
    #[builder(default)]
    empty_policy: EmptyPolicy,
}

impl Default for ComputeParameters {
    fn default() -> Self {
        ComputeParameters::builder().build()
    }
}

impl ComputeParameters {
    pub fn validate(&self) -> Result<()> {
        if self.ksize == 0 {
            return Err(Error::InvalidKSize { ksize: self.ksize });
        }
        if self.num == 0 {
            return Err(Error::InvalidSketchSize { num: self.num });
        }
        Ok(())
    }
}

/// Build one signature per record, in record order.
pub fn compute_signatures(
    records: &[SequenceRecord],
    params: &ComputeParameters,
) -> Result<Vec<Signature>> {
    params.validate()?;

    info!(
        "Calculating sketches for {} sequences (k={}, num={})",
        records.len(),
        params.ksize(),
        params.num()
    );

    #[cfg(feature = "parallel")]
    let record_iter = records.par_iter();

    #[cfg(not(feature = "parallel"))]
    let record_iter = records.iter();

    record_iter
        .map(|record| -> Result<Signature> {
            info!("Calculating sketch for sequence {}", record.id());
            let mut sig = Signature::from_sequence(record.id(), record.seq(), params)?;
            sig.set_filename(record.source());
            Ok(sig)
        })
        .collect()
}

/// Sketch every record and report the distance of every unordered pair.
pub fn compute_and_compare(
    records: &[SequenceRecord],
    params: &ComputeParameters,
) -> Result<Vec<PairDistance>> {
    let sigs = compute_signatures(records, params)?;
    pairwise_distances(&sigs, params.empty_policy())
}

/// Load FASTA/FASTQ files (or directories of them) and compare all sequences.
pub fn compare_paths<P: AsRef<Path>>(
    inputs: &[P],
    params: &ComputeParameters,
) -> Result<Vec<PairDistance>> {
    params.validate()?;
    let records = load_sequences(inputs)?;
    compute_and_compare(&records, params)
}
