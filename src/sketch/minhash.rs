use std::cmp::Ordering;
use std::iter::{Iterator, Peekable};
use std::sync::Mutex;

use typed_builder::TypedBuilder;

use crate::signature::SigsTrait;
use crate::Error;

pub const DEFAULT_KSIZE: u32 = 14;
pub const DEFAULT_NUM: u32 = 1000;
pub const DEFAULT_SEED: u64 = 42;

/// Bottom-`num` MinHash sketch.
///
/// `mins` is always sorted in ascending order, holds no repeated values and
/// never grows past `num` entries.
#[derive(Debug, TypedBuilder)]
pub struct KmerMinHash {
    #[builder(default = DEFAULT_NUM)]
    num: u32,

    #[builder(default = DEFAULT_KSIZE)]
    ksize: u32,

    #[builder(default = DEFAULT_SEED)]
    seed: u64,

    #[builder(default)]
    mins: Vec<u64>,

    #[builder(default)]
    md5sum: Mutex<Option<String>>,
}

impl PartialEq for KmerMinHash {
    fn eq(&self, other: &KmerMinHash) -> bool {
        self.num == other.num
            && self.ksize == other.ksize
            && self.seed == other.seed
            && self.mins == other.mins
    }
}

impl Clone for KmerMinHash {
    fn clone(&self) -> Self {
        KmerMinHash {
            num: self.num,
            ksize: self.ksize,
            seed: self.seed,
            mins: self.mins.clone(),
            md5sum: Mutex::new(Some(self.md5sum())),
        }
    }
}

impl Default for KmerMinHash {
    fn default() -> KmerMinHash {
        KmerMinHash::new(DEFAULT_NUM, DEFAULT_KSIZE, DEFAULT_SEED)
    }
}

impl KmerMinHash {
    pub fn new(num: u32, ksize: u32, seed: u64) -> KmerMinHash {
        KmerMinHash {
            num,
            ksize,
            seed,
            mins: Vec::new(),
            md5sum: Mutex::new(None),
        }
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn clear(&mut self) {
        self.mins.clear();
        self.reset_md5sum();
    }

    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    fn reset_md5sum(&self) {
        let mut data = self.md5sum.lock().unwrap();
        if data.is_some() {
            *data = None;
        }
    }

    /// Content digest over the ksize and the retained hashes.
    pub fn md5sum(&self) -> String {
        let mut data = self.md5sum.lock().unwrap();
        if data.is_none() {
            let mut md5_ctx = md5::Context::new();
            md5_ctx.consume(self.ksize.to_string());
            for x in &self.mins {
                md5_ctx.consume(x.to_string());
            }
            *data = Some(format!("{:x}", md5_ctx.compute()));
        }
        data.clone().unwrap_or_default()
    }

    pub fn add_hash(&mut self, hash: u64) {
        if self.num == 0 {
            // nothing can ever be kept
            return;
        }

        let full = self.mins.len() >= self.num as usize;
        if let Some(&current_max) = self.mins.last() {
            if full && hash >= current_max {
                return;
            }
        }

        if let Err(pos) = self.mins.binary_search(&hash) {
            self.mins.insert(pos, hash);
            if self.mins.len() > self.num as usize {
                self.mins.pop();
            }
            self.reset_md5sum();
        }
    }

    /// Add a batch of hashes: sort, drop repeats, keep the `num` smallest.
    pub fn add_many(&mut self, hashes: &[u64]) -> Result<(), Error> {
        if hashes.is_empty() {
            return Ok(());
        }
        self.mins.extend_from_slice(hashes);
        self.mins.sort_unstable();
        self.mins.dedup();
        self.mins.truncate(self.num as usize);
        self.reset_md5sum();
        Ok(())
    }

    /// Keep the bottom `num` hashes of the union of both sketches.
    pub fn merge(&mut self, other: &KmerMinHash) -> Result<(), Error> {
        self.check_compatible(other)?;

        let merged: Vec<u64> = Union::new(self.mins.iter(), other.mins.iter())
            .take(self.num as usize)
            .cloned()
            .collect();
        self.mins = merged;

        self.reset_md5sum();
        Ok(())
    }

    pub fn count_common(&self, other: &KmerMinHash) -> Result<u64, Error> {
        self.check_compatible(other)?;
        let iter = if self.size() < other.size() {
            Intersection::new(self.mins.iter(), other.mins.iter())
        } else {
            Intersection::new(other.mins.iter(), self.mins.iter())
        };

        Ok(iter.count() as u64)
    }

    /// Size of the intersection and of the union of the two hash sets.
    pub fn intersection_size(&self, other: &KmerMinHash) -> Result<(u64, u64), Error> {
        let common = self.count_common(other)?;
        let union = Union::new(self.mins.iter(), other.mins.iter()).count() as u64;
        Ok((common, union))
    }

    /// Jaccard index `|A ∩ B| / |A ∪ B|` of the two sketches.
    ///
    /// Fails with [`Error::EmptySketchComparison`] when both sketches are empty.
    pub fn jaccard(&self, other: &KmerMinHash) -> Result<f64, Error> {
        let (common, union) = self.intersection_size(other)?;
        if union == 0 {
            return Err(Error::EmptySketchComparison);
        }
        Ok(common as f64 / union as f64)
    }

    pub fn jaccard_distance(&self, other: &KmerMinHash) -> Result<f64, Error> {
        Ok(1.0 - self.jaccard(other)?)
    }

    pub fn mins(&self) -> Vec<u64> {
        self.mins.clone()
    }
}

impl SigsTrait for KmerMinHash {
    fn size(&self) -> usize {
        self.mins.len()
    }

    fn to_vec(&self) -> Vec<u64> {
        self.mins.clone()
    }

    fn ksize(&self) -> usize {
        self.ksize as usize
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn add_hash(&mut self, hash: u64) {
        KmerMinHash::add_hash(self, hash);
    }

    fn check_compatible(&self, other: &KmerMinHash) -> Result<(), Error> {
        if self.num != other.num {
            return Err(Error::MismatchNum {
                n1: self.num,
                n2: other.num,
            });
        }
        if self.ksize != other.ksize {
            return Err(Error::MismatchKSizes);
        }
        if self.seed != other.seed {
            return Err(Error::MismatchSeed);
        }
        Ok(())
    }
}

struct Intersection<T, I: Iterator<Item = T>> {
    iter: Peekable<I>,
    other: Peekable<I>,
}

impl<T, I: Iterator<Item = T>> Intersection<T, I> {
    pub fn new(left: I, right: I) -> Self {
        Intersection {
            iter: left.peekable(),
            other: right.peekable(),
        }
    }
}

impl<T: Ord, I: Iterator<Item = T>> Iterator for Intersection<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let res = match (self.iter.peek(), self.other.peek()) {
                (Some(left_key), Some(right_key)) => left_key.cmp(right_key),
                _ => return None,
            };

            match res {
                Ordering::Less => {
                    self.iter.next();
                }
                Ordering::Greater => {
                    self.other.next();
                }
                Ordering::Equal => {
                    self.other.next();
                    return self.iter.next();
                }
            }
        }
    }
}

struct Union<T, I: Iterator<Item = T>> {
    iter: Peekable<I>,
    other: Peekable<I>,
}

impl<T, I: Iterator<Item = T>> Union<T, I> {
    pub fn new(left: I, right: I) -> Self {
        Union {
            iter: left.peekable(),
            other: right.peekable(),
        }
    }
}

impl<T: Ord, I: Iterator<Item = T>> Iterator for Union<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let res = match (self.iter.peek(), self.other.peek()) {
            (Some(left_key), Some(right_key)) => left_key.cmp(right_key),
            (None, Some(_)) => {
                return self.other.next();
            }
            (Some(_), None) => {
                return self.iter.next();
            }
            _ => return None,
        };

        match res {
            Ordering::Less => self.iter.next(),
            Ordering::Greater => self.other.next(),
            Ordering::Equal => {
                self.other.next();
                self.iter.next()
            }
        }
    }
}
