use std::io::Write;

use itertools::Itertools;
use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::signature::Signature;
use crate::{Error, Result};

/// What to report when both sketches of a pair are empty.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Report a distance of 0 and log a warning.
    #[default]
    Zero,
    /// Fail the run with [`Error::EmptySketchComparison`].
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairDistance {
    pub id_a: String,
    pub id_b: String,
    pub jaccard_distance: f64,
}

pub fn distance(a: &Signature, b: &Signature, policy: EmptyPolicy) -> Result<f64> {
    match a.jaccard_distance(b) {
        Err(Error::EmptySketchComparison) if policy == EmptyPolicy::Zero => {
            warn!(
                "{} and {} both have empty sketches, reporting distance 0",
                a.name(),
                b.name()
            );
            Ok(0.0)
        }
        res => res,
    }
}

/// Jaccard distance for every unordered pair of signatures.
///
/// Pairs come out in the order `(0, 1), (0, 2), .., (1, 2), ..` of the input
/// slice, with no self-pairs and no repeats.
pub fn pairwise_distances(sigs: &[Signature], policy: EmptyPolicy) -> Result<Vec<PairDistance>> {
    let pairs: Vec<(usize, usize)> = (0..sigs.len()).tuple_combinations().collect();

    info!(
        "Comparing {} sequences ({} pairs)",
        sigs.len(),
        pairs.len()
    );

    #[cfg(feature = "parallel")]
    let pair_iter = pairs.par_iter();

    #[cfg(not(feature = "parallel"))]
    let pair_iter = pairs.iter();

    pair_iter
        .map(|&(i, j)| -> Result<PairDistance> {
            let (a, b) = (&sigs[i], &sigs[j]);
            Ok(PairDistance {
                id_a: a.name().into(),
                id_b: b.name().into(),
                jaccard_distance: distance(a, b, policy)?,
            })
        })
        .collect()
}

/// One human-readable line per pair.
pub fn write_report<W: Write>(pairs: &[PairDistance], writer: &mut W) -> Result<()> {
    for pair in pairs {
        writeln!(
            writer,
            "Distance between {} and {} is: {}",
            pair.id_a, pair.id_b, pair.jaccard_distance
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// CSV with an `id_a,id_b,jaccard_distance` header.
pub fn write_csv<W: Write>(pairs: &[PairDistance], writer: W) -> Result<()> {
    let mut wrt = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wrt.write_record(["id_a", "id_b", "jaccard_distance"])?;
    for pair in pairs {
        wrt.serialize(pair)?;
    }
    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd::ComputeParameters;

    fn sig(name: &str, seq: &[u8]) -> Signature {
        let params = ComputeParameters::builder().ksize(4).num(50).build();
        Signature::from_sequence(name, seq, &params).unwrap()
    }

    #[test]
    fn pairs_in_enumeration_order() {
        let sigs = vec![
            sig("a", b"ACGTACGTAA"),
            sig("b", b"TTGCATGCAA"),
            sig("c", b"GGGCCCAAAT"),
        ];
        let pairs = pairwise_distances(&sigs, EmptyPolicy::Zero).unwrap();
        let ids: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.id_a.as_str(), p.id_b.as_str()))
            .collect();
        assert_eq!(ids, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn zero_or_one_signature_gives_no_pairs() {
        assert!(pairwise_distances(&[], EmptyPolicy::Error)
            .unwrap()
            .is_empty());
        let one = vec![sig("a", b"ACGTACGTAA")];
        assert!(pairwise_distances(&one, EmptyPolicy::Error)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn empty_sketches_follow_policy() {
        let a = sig("a", b"ACG");
        let b = sig("b", b"");
        assert_eq!(distance(&a, &b, EmptyPolicy::Zero).unwrap(), 0.0);
        assert!(matches!(
            distance(&a, &b, EmptyPolicy::Error),
            Err(Error::EmptySketchComparison)
        ));

        // one empty side is still defined
        let c = sig("c", b"ACGTACGTAA");
        assert_eq!(distance(&a, &c, EmptyPolicy::Error).unwrap(), 1.0);
    }

    #[test]
    fn report_lines() {
        let pairs = vec![PairDistance {
            id_a: "x".into(),
            id_b: "y".into(),
            jaccard_distance: 0.25,
        }];
        let mut out = Vec::new();
        write_report(&pairs, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Distance between x and y is: 0.25\n"
        );
    }

    #[test]
    fn csv_output() {
        let pairs = vec![
            PairDistance {
                id_a: "x".into(),
                id_b: "y".into(),
                jaccard_distance: 0.5,
            },
            PairDistance {
                id_a: "x".into(),
                id_b: "z".into(),
                jaccard_distance: 1.0,
            },
        ];
        let mut out = Vec::new();
        write_csv(&pairs, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id_a,id_b,jaccard_distance\nx,y,0.5\nx,z,1.0\n"
        );

        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id_a,id_b,jaccard_distance\n");
    }
}
