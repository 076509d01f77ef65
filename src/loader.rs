//! Reading `(identifier, sequence)` records from FASTA/FASTQ input.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_file, parse_fastx_reader, FastxReader};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    id: String,
    seq: Vec<u8>,
    source: String,
}

impl SequenceRecord {
    pub fn new(id: &str, seq: Vec<u8>, source: &str) -> SequenceRecord {
        SequenceRecord {
            id: id.into(),
            seq,
            source: source.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    /// File (or stream) the record was read from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Record identifier: the header up to the first whitespace.
fn record_id(header: &[u8]) -> Result<String> {
    let header = std::str::from_utf8(header)?;
    Ok(header
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string())
}

fn is_empty_input(err: &ParseError) -> bool {
    matches!(err.kind, ParseErrorKind::EmptyFile)
}

struct Records {
    records: Vec<SequenceRecord>,
    seen: HashSet<String>,
}

impl Records {
    fn new() -> Self {
        Records {
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn read_all(&mut self, mut reader: Box<dyn FastxReader + '_>, source: &str) -> Result<()> {
        let mut n_records = 0;
        while let Some(record) = reader.next() {
            let record = record?;
            let id = record_id(record.id())?;
            let seq = record.seq();

            if seq.is_empty() {
                warn!("skipping record {} in {}: no sequence content", id, source);
                continue;
            }

            if !self.seen.insert(id.clone()) {
                return Err(Error::DuplicateSequenceId { id });
            }

            self.records
                .push(SequenceRecord::new(&id, seq.into_owned(), source));
            n_records += 1;
        }
        info!("loaded {} records from {}", n_records, source);
        Ok(())
    }
}

/// Read every record of a FASTA/FASTQ stream, in file order.
pub fn sequences_from_reader<R: io::Read + Send>(rdr: R, source: &str) -> Result<Vec<SequenceRecord>> {
    let mut records = Records::new();
    match parse_fastx_reader(rdr) {
        Ok(reader) => records.read_all(reader, source)?,
        Err(e) if is_empty_input(&e) => warn!("{} is empty", source),
        Err(e) => return Err(e.into()),
    }
    Ok(records.records)
}

/// Expand directories into the files they hold, sorted by name.
pub fn input_files<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = input.as_ref();
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<_>>()?;
            entries.retain(|p| p.is_file());
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Load every record from a list of files and directories.
///
/// Identifiers must be unique across all inputs. Calling this again re-reads
/// the inputs from scratch.
pub fn load_sequences<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<SequenceRecord>> {
    let mut records = Records::new();
    for path in input_files(inputs)? {
        let source = path.to_string_lossy().into_owned();
        match parse_fastx_file(&path) {
            Ok(reader) => records.read_all(reader, &source)?,
            Err(e) if is_empty_input(&e) => warn!("{} is empty", source),
            Err(e) => return Err(e.into()),
        }
    }
    info!("Returning {} sequences", records.records.len());
    Ok(records.records)
}
