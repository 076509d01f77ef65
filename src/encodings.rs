use crate::Error;

const COMPLEMENT: [u8; 256] = {
    let mut lookup = [0; 256];
    lookup[b'A' as usize] = b'T';
    lookup[b'C' as usize] = b'G';
    lookup[b'G' as usize] = b'C';
    lookup[b'T' as usize] = b'A';
    lookup[b'N' as usize] = b'N';
    lookup
};

/// Bases accepted in a k-mer. `N` stands for an unknown base.
pub const VALID: [bool; 256] = {
    let mut lookup = [false; 256];
    lookup[b'A' as usize] = true;
    lookup[b'C' as usize] = true;
    lookup[b'G' as usize] = true;
    lookup[b'T' as usize] = true;
    lookup[b'N' as usize] = true;
    lookup
};

/// Complement of a single upper-case base, or `0` when it has none.
#[inline]
pub fn complement(nt: u8) -> u8 {
    COMPLEMENT[nt as usize]
}

#[inline]
pub fn is_valid_dna(seq: &[u8]) -> bool {
    seq.iter().all(|nt| VALID[*nt as usize])
}

/// Reverse complement of an upper-case nucleotide sequence.
///
/// A↔T, C↔G and N↔N. Any other byte is rejected with [`Error::InvalidDNA`].
#[inline]
pub fn revcomp(seq: &[u8]) -> Result<Vec<u8>, Error> {
    seq.iter()
        .rev()
        .map(|nt| match complement(*nt) {
            0 => Err(Error::InvalidDNA {
                message: String::from_utf8_lossy(seq).into_owned(),
            }),
            c => Ok(c),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn revcomp_simple() {
        assert_eq!(revcomp(b"ATCG").unwrap(), b"CGAT");
        assert_eq!(revcomp(b"AAAC").unwrap(), b"GTTT");
        assert_eq!(revcomp(b"ANNT").unwrap(), b"ANNT");
        assert_eq!(revcomp(b"").unwrap(), b"");
    }

    #[test]
    fn revcomp_is_an_involution() {
        let seq = b"TGCCGCCCAGCACCGGGTGACTAGGTTGAGCCATGATTAACCTGCAATGA";
        assert_eq!(revcomp(&revcomp(seq).unwrap()).unwrap(), seq.to_vec());
    }

    #[test]
    fn revcomp_rejects_unknown_bases() {
        match revcomp(b"ATGR") {
            Err(Error::InvalidDNA { message }) => assert_eq!(message, "ATGR"),
            other => panic!("expected InvalidDNA, got {:?}", other),
        }
        // lower case is not part of the complement table
        assert!(revcomp(b"atcg").is_err());
    }

    #[test]
    fn valid_dna() {
        assert!(is_valid_dna(b"ACGTN"));
        assert!(!is_valid_dna(b"ACGTR"));
        assert!(!is_valid_dna(b"acgt"));
    }
}
