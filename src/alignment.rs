//! Parsing of network alignment files
//!
//! An alignment file lists one aligned protein pair per line, in a
//! `.sif`-like format. The first column is the protein of species A,
//! the second column the protein of species B. All other columns,
//! such as an edge label, are ignored.
//!
//! ```text
//! # comments start with a hash
//! ENSP00000000233    ENSMUSP00000000001
//! ENSP00000000412    ENSMUSP00000000028    pp
//! ```

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::{FileKind, GoScoreError, GoScoreResult, ALIGNMENT_COMMENT};

/// Two aligned proteins, one from each species
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlignedPair {
    first: String,
    second: String,
}

impl AlignedPair {
    /// Constructs a new pair
    pub fn new<S: Into<String>, T: Into<String>>(first: S, second: T) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// The protein of the first species
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The protein of the second species
    pub fn second(&self) -> &str {
        &self.second
    }
}

impl Display for AlignedPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.first, self.second)
    }
}

/// How to handle alignment lines with fewer than two columns
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MalformedLines {
    /// Abort with [`GoScoreError::MalformedRecord`]
    #[default]
    Fail,
    /// Log a warning and ignore the line
    Skip,
}

/// Parses a single alignment line
///
/// Returns `Ok(None)` for comments and blank lines
fn parse_line(line: &str, line_number: usize) -> GoScoreResult<Option<AlignedPair>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(ALIGNMENT_COMMENT) {
        return Ok(None);
    }

    let mut cols = line.split_whitespace();
    match (cols.next(), cols.next()) {
        (Some(first), Some(second)) => Ok(Some(AlignedPair::new(first, second))),
        _ => Err(GoScoreError::MalformedRecord {
            line: line_number,
            record: line.to_string(),
        }),
    }
}

/// Parses an alignment file
///
/// # Errors
///
/// - [`GoScoreError::NotFound`]: The file does not exist or cannot be opened
/// - [`GoScoreError::MalformedRecord`]: A line has only one column and `malformed` is [`MalformedLines::Fail`]
/// - [`GoScoreError::InvalidInput`]: The file contains non-UTF8 data
pub fn from_file<P: AsRef<Path>>(
    file: P,
    malformed: MalformedLines,
) -> GoScoreResult<Vec<AlignedPair>> {
    let filename = file.as_ref().display().to_string();
    let file = File::open(file).map_err(|_| GoScoreError::NotFound {
        kind: FileKind::Alignment,
        path: filename.clone(),
    })?;
    let pairs = parse(BufReader::new(file), malformed)?;
    info!("Parsed {}: {} alignment pairs", filename, pairs.len());
    Ok(pairs)
}

/// Parses alignment data from any buffered reader
///
/// # Errors
///
/// - [`GoScoreError::MalformedRecord`]: A line has only one column and `malformed` is [`MalformedLines::Fail`]
/// - [`GoScoreError::InvalidInput`]: The data is not valid UTF8
///
/// # Examples
///
/// ```
/// use goscore::alignment::{parse, MalformedLines};
///
/// let data = "# header\nENSP1\tENSMUSP1\tpp\n\nENSP2 ENSMUSP2\n";
/// let pairs = parse(data.as_bytes(), MalformedLines::Fail).unwrap();
///
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0].first(), "ENSP1");
/// assert_eq!(pairs[1].second(), "ENSMUSP2");
///
/// assert!(parse("ENSP1\n".as_bytes(), MalformedLines::Fail).is_err());
/// assert!(parse("ENSP1\n".as_bytes(), MalformedLines::Skip).unwrap().is_empty());
/// ```
pub fn parse<R: BufRead>(reader: R, malformed: MalformedLines) -> GoScoreResult<Vec<AlignedPair>> {
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|_| {
            GoScoreError::InvalidInput(format!("Invalid data in alignment line {}", idx + 1))
        })?;
        match (parse_line(&line, idx + 1), malformed) {
            (Ok(Some(pair)), _) => pairs.push(pair),
            (Ok(None), _) => {}
            (Err(err), MalformedLines::Skip) => warn!("Skipping alignment line: {}", err),
            (Err(err), MalformedLines::Fail) => return Err(err),
        }
    }
    Ok(pairs)
}
