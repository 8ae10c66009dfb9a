#![doc = r#"
Score cross-species protein network alignments by Gene Ontology annotations

`goscore` measures how well an alignment of two protein-protein interaction
networks preserves biological function. Proteins of both species are mapped
to a canonical identifier, annotated with their GO terms and every aligned pair
is scored by the similarity of the two GO term sets.

The crate is built from three stages:

- [`IdentifierTable`]: parses a per-species mapping file of alternate identifiers
- [`AnnotationMap`]: parses a GO annotation file and resolves the identifiers
- [`Scorer`]: scores every aligned pair and aggregates the statistics

The [`Pipeline`] wires everything together.

# Examples

```
use goscore::{AnnotationMap, IdentifierTable, Scorer, TermExtraction};
use goscore::alignment::{self, MalformedLines};
use goscore::similarity::Jaccard;

let mapping = "Ensembl_ID\tSymbol\nENSP1\tABC\nENSP2\tXYZ\n";
let table = IdentifierTable::parse(mapping.as_bytes()).unwrap();

let go_file = "! a comment\n\
    UniProt\tABC\tx\tGO:0000001\n\
    UniProt\tABC\tx\tGO:0000002\n\
    UniProt\tXYZ\tx\tGO:0000002\n";
let annotations = AnnotationMap::parse(go_file.as_bytes(), &table, TermExtraction::All).unwrap();

let pairs = alignment::parse("ENSP1\tENSP2\n".as_bytes(), MalformedLines::Fail).unwrap();

let result = Scorer::new(Jaccard).score(&pairs, &annotations, &annotations);
assert_eq!(result.scored_pairs(), 1);
assert_eq!(result.total_score(), 0.5);
```
"#]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fmt::Display;
use std::num::ParseIntError;
use thiserror::Error;

pub mod alignment;
pub mod annotations;
pub mod mapping;
pub mod pipeline;
pub mod scorer;
pub mod similarity;
pub mod stats;
pub mod term;

pub use alignment::AlignedPair;
pub use annotations::{AnnotationMap, TermExtraction};
pub use mapping::{IdentifierTable, LookupMap};
pub use pipeline::{score_alignment, Inputs, Options, Pipeline, PipelineOutput};
pub use scorer::Scorer;
pub use stats::{PairScore, ScoringResult, Summary};
pub use term::{GoGroup, GoTermId};

/// Lines of a GO annotation file starting with this marker are comments
pub const GO_COMMENT: char = '!';
/// Lines of an alignment file starting with this marker are comments
pub const ALIGNMENT_COMMENT: char = '#';
/// Prefix of every GO term token
pub const GO_PREFIX: &str = "GO:";

/// The kind of input file, used to report which input is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Per-species identifier mapping file
    Mapping,
    /// Per-species GO annotation file
    GoAnnotation,
    /// Network alignment (`.sif`) file
    Alignment,
}

impl Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Mapping => write!(f, "mapping file"),
            FileKind::GoAnnotation => write!(f, "GO annotation file"),
            FileKind::Alignment => write!(f, "alignment file"),
        }
    }
}

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoScoreError {
    /// A required input file does not exist or cannot be opened
    #[error("{kind} not found: {path}")]
    NotFound {
        /// Which input is missing
        kind: FileKind,
        /// The path that was tried
        path: String,
    },
    /// A record of an alignment file does not contain a protein pair
    #[error("malformed record in line {line}: {record}")]
    MalformedRecord {
        /// 1-based line number
        line: usize,
        /// The offending line
        record: String,
    },
    /// The input data is not valid text
    #[error("invalid data: {0}")]
    InvalidInput(String),
    /// Failed to parse an integer, e.g. the code of a GO term
    #[error("unable to parse Integer")]
    ParseIntError,
    /// The name of a similarity metric is not known
    #[error("unknown similarity metric: {0}")]
    UnknownMetric(String),
}

impl From<ParseIntError> for GoScoreError {
    fn from(_: ParseIntError) -> Self {
        GoScoreError::ParseIntError
    }
}

/// Shortcut for `Result<T, GoScoreError>`
pub type GoScoreResult<T> = Result<T, GoScoreError>;

/// Converts a count into a float
///
/// Counts in this crate are far below the 2^52 limit of exact
/// representation, so the precision loss is accepted
#[allow(clippy::cast_precision_loss)]
fn f64_from_usize(n: usize) -> f64 {
    n as f64
}
