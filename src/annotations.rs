//! GO annotations of proteins
//!
//! GO annotation files (e.g. GAF files) connect a protein to a GO term, one
//! annotation per line. The protein is given by any of its alternate identifiers,
//! which are resolved to the canonical identifier through an [`IdentifierTable`].
//!
//! ```text
//! !gaf-version: 2.2
//! UniProtKB  P84085  ARF5  enables  GO:0005525  GO_REF:0000043  IEA  UniProtKB-KW:KW-0342  F
//! UniProtKB  P84085  ARF5  involved_in  GO:0006886  GO_REF:0000043  IEA  UniProtKB-KW:KW-0653  P
//! ```
//!
//! The second column holds the protein identifier, every column that starts
//! with `GO:` is a GO term. Lines starting with `!` are comments.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::mapping::IdentifierTable;
use crate::stats::AnnotationStats;
use crate::term::{GoGroup, GoTermId};
use crate::{FileKind, GoScoreError, GoScoreResult, GO_COMMENT, GO_PREFIX};

/// Defines which GO terms of an annotation line are recorded
///
/// Annotation files can contain more than one `GO:` token per line,
/// e.g. in the `With/From` column. The choice changes the completeness
/// of the annotations and therefore the similarity scores.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TermExtraction {
    /// Record every GO term of the line
    #[default]
    All,
    /// Record only the last GO term of the line
    ///
    /// This reproduces the behaviour of the classic `go_score` script
    /// and loses all but one term of lines with multiple GO terms.
    LastOnly,
}

/// A single data line of an annotation file
struct ParsedLine<'a> {
    protein: &'a str,
    terms: SmallVec<[GoTermId; 2]>,
}

/// Parses a single line of a GO annotation file
///
/// Returns `None` for comments, blank lines and lines without
/// a protein identifier.
fn parse_line(line: &str, extraction: TermExtraction) -> Option<ParsedLine<'_>> {
    if line.starts_with(GO_COMMENT) || line.trim().is_empty() {
        return None;
    }

    let mut cols = line.split_whitespace();
    let protein = match (cols.next(), cols.next()) {
        (Some(_), Some(protein)) => protein,
        _ => {
            warn!("Skipping malformed annotation line: {}", line);
            return None;
        }
    };

    let mut terms: SmallVec<[GoTermId; 2]> = line
        .split_whitespace()
        .filter(|token| token.starts_with(GO_PREFIX))
        .filter_map(|token| match GoTermId::try_from(token) {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring invalid GO term {} for {}", token, protein);
                None
            }
        })
        .collect();

    if extraction == TermExtraction::LastOnly && terms.len() > 1 {
        let last = terms[terms.len() - 1];
        terms.clear();
        terms.push(last);
    }

    Some(ParsedLine { protein, terms })
}

/// GO terms of all proteins of one species
///
/// Maps the canonical identifier of each protein to the [`GoGroup`]
/// of its GO terms. Every protein present in the map has at least one term.
///
/// # Examples
///
/// ```
/// use goscore::{AnnotationMap, GoTermId, IdentifierTable, TermExtraction};
///
/// let table = IdentifierTable::parse("Ensembl_ID\tSymbol\nENSP1\tABC\n".as_bytes()).unwrap();
/// let data = "! comment\nUniProt\tABC\tx\tGO:0008150\n";
///
/// let annotations = AnnotationMap::parse(data.as_bytes(), &table, TermExtraction::All).unwrap();
///
/// let terms = annotations.get("ENSP1").unwrap();
/// assert_eq!(terms.len(), 1);
/// assert!(terms.contains(&GoTermId::from(8150u32)));
/// ```
#[derive(Debug, Default, Clone)]
pub struct AnnotationMap {
    annotations: HashMap<String, GoGroup>,
    term_counts: HashMap<GoTermId, usize>,
    data_lines: usize,
    resolved_lines: usize,
    unresolved_lines: usize,
    lines_without_terms: usize,
}

impl AnnotationMap {
    /// Parses a GO annotation file
    ///
    /// # Errors
    ///
    /// - [`GoScoreError::NotFound`]: The file does not exist or cannot be opened
    /// - [`GoScoreError::InvalidInput`]: The file contains non-UTF8 data
    pub fn from_file<P: AsRef<Path>>(
        file: P,
        table: &IdentifierTable,
        extraction: TermExtraction,
    ) -> GoScoreResult<Self> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| GoScoreError::NotFound {
            kind: FileKind::GoAnnotation,
            path: filename.clone(),
        })?;
        let annotations = Self::parse(BufReader::new(file), table, extraction)?;
        info!(
            "Parsed {}: {} lines, {} resolved, {} annotated proteins",
            filename,
            annotations.data_lines,
            annotations.resolved_lines,
            annotations.len()
        );
        Ok(annotations)
    }

    /// Parses GO annotation data from any buffered reader
    ///
    /// Protein identifiers that cannot be resolved through `table`
    /// are skipped.
    ///
    /// # Errors
    ///
    /// [`GoScoreError::InvalidInput`]: The data is not valid UTF8
    pub fn parse<R: BufRead>(
        reader: R,
        table: &IdentifierTable,
        extraction: TermExtraction,
    ) -> GoScoreResult<Self> {
        let mut annotations = AnnotationMap::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|_| {
                GoScoreError::InvalidInput(format!("Invalid data in annotation line {}", idx + 1))
            })?;

            let Some(parsed) = parse_line(&line, extraction) else {
                continue;
            };
            annotations.data_lines += 1;

            if parsed.terms.is_empty() {
                debug!("No GO terms in line {}", idx + 1);
                annotations.lines_without_terms += 1;
                continue;
            }

            let Some(canonical) = table.canonical_id(parsed.protein) else {
                trace!("Unable to resolve {}", parsed.protein);
                annotations.unresolved_lines += 1;
                continue;
            };

            annotations.resolved_lines += 1;
            annotations.add_terms(canonical, &parsed.terms);
        }
        Ok(annotations)
    }

    fn add_terms(&mut self, protein: &str, terms: &[GoTermId]) {
        let group = match self.annotations.entry(protein.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(GoGroup::with_capacity(terms.len())),
        };
        for term in terms {
            group.insert(*term);
            *self.term_counts.entry(*term).or_default() += 1;
        }
    }

    /// Returns the GO terms of `protein`
    pub fn get(&self, protein: &str) -> Option<&GoGroup> {
        self.annotations.get(protein)
    }

    /// Returns `true` if `protein` has GO annotations
    pub fn contains(&self, protein: &str) -> bool {
        self.annotations.contains_key(protein)
    }

    /// Returns the number of annotated proteins
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if no protein is annotated
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterates all proteins and their GO terms in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GoGroup)> {
        self.annotations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns all proteins annotated with `term`, sorted by identifier
    pub fn proteins_with_term(&self, term: &GoTermId) -> Vec<&str> {
        let mut proteins: Vec<&str> = self
            .iter()
            .filter(|(_, terms)| terms.contains(term))
            .map(|(protein, _)| protein)
            .collect();
        proteins.sort_unstable();
        proteins
    }

    /// Returns a new map with all proteins that have at least `min_terms`
    /// of the `required` terms
    pub fn filter_by_terms(&self, required: &GoGroup, min_terms: usize) -> AnnotationMap {
        self.iter()
            .filter(|(_, terms)| terms.intersection_len(required) >= min_terms)
            .map(|(protein, terms)| (protein.to_string(), terms.clone()))
            .collect()
    }

    /// Returns every GO term used in the annotations
    pub fn all_terms(&self) -> GoGroup {
        self.annotations
            .values()
            .flat_map(GoGroup::iter)
            .collect()
    }

    /// How often a term was recorded while parsing
    ///
    /// Duplicate lines are counted each time, so this can exceed
    /// the number of proteins with the term.
    pub fn term_count(&self, term: &GoTermId) -> usize {
        self.term_counts.get(term).copied().unwrap_or_default()
    }

    /// The number of non-comment lines with a protein identifier
    pub fn data_lines(&self) -> usize {
        self.data_lines
    }

    /// The number of lines whose protein was resolved to a canonical identifier
    pub fn resolved_lines(&self) -> usize {
        self.resolved_lines
    }

    /// The number of lines whose protein could not be resolved
    pub fn unresolved_lines(&self) -> usize {
        self.unresolved_lines
    }

    /// The number of lines without any GO term
    pub fn lines_without_terms(&self) -> usize {
        self.lines_without_terms
    }

    /// Summary statistics of the annotations
    pub fn stats(&self) -> AnnotationStats {
        AnnotationStats::new(self.annotations.values().map(GoGroup::len), &self.term_counts)
    }
}

/// Builds an [`AnnotationMap`] directly from proteins and their terms
///
/// Proteins with an empty [`GoGroup`] are not added. If a protein
/// occurs more than once, its groups are merged.
impl<S: Into<String>> FromIterator<(S, GoGroup)> for AnnotationMap {
    fn from_iter<T: IntoIterator<Item = (S, GoGroup)>>(iter: T) -> Self {
        let mut map = AnnotationMap::default();
        for (protein, group) in iter {
            if group.is_empty() {
                continue;
            }
            let protein: String = protein.into();
            let terms: Vec<GoTermId> = group.iter().collect();
            map.add_terms(&protein, &terms);
        }
        map
    }
}
