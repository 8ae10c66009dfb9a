//! Scoring of a network alignment from the input files
//!
//! The [`Pipeline`] reads the mapping and GO annotation files of both species,
//! the alignment file and scores all aligned pairs.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::alignment::{self, AlignedPair, MalformedLines};
use crate::annotations::{AnnotationMap, TermExtraction};
use crate::mapping::IdentifierTable;
use crate::scorer::Scorer;
use crate::similarity::Builtins;
use crate::stats::{AnnotationStats, ScoringResult, SpeciesComparison};
use crate::GoScoreResult;

/// The five input files of a scoring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    alignment: PathBuf,
    go_first: PathBuf,
    go_second: PathBuf,
    mapping_first: PathBuf,
    mapping_second: PathBuf,
}

impl Inputs {
    /// Constructs the inputs, in the argument order of the classic `go_score` script
    pub fn new<P: AsRef<Path>>(
        alignment: P,
        go_first: P,
        go_second: P,
        mapping_first: P,
        mapping_second: P,
    ) -> Self {
        Self {
            alignment: alignment.as_ref().to_path_buf(),
            go_first: go_first.as_ref().to_path_buf(),
            go_second: go_second.as_ref().to_path_buf(),
            mapping_first: mapping_first.as_ref().to_path_buf(),
            mapping_second: mapping_second.as_ref().to_path_buf(),
        }
    }

    /// The alignment file
    pub fn alignment(&self) -> &Path {
        &self.alignment
    }

    /// The GO annotation file of the first species
    pub fn go_first(&self) -> &Path {
        &self.go_first
    }

    /// The GO annotation file of the second species
    pub fn go_second(&self) -> &Path {
        &self.go_second
    }

    /// The mapping file of the first species
    pub fn mapping_first(&self) -> &Path {
        &self.mapping_first
    }

    /// The mapping file of the second species
    pub fn mapping_second(&self) -> &Path {
        &self.mapping_second
    }
}

/// Settings of a scoring run
///
/// # Examples
///
/// ```
/// use goscore::Options;
/// use goscore::alignment::MalformedLines;
/// use goscore::similarity::Builtins;
/// use goscore::TermExtraction;
///
/// let options = Options::default()
///     .similarity(Builtins::Cosine)
///     .term_extraction(TermExtraction::LastOnly)
///     .malformed_lines(MalformedLines::Skip);
///
/// assert_eq!(options.get_similarity(), Builtins::Cosine);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    similarity: Builtins,
    extraction: TermExtraction,
    malformed: MalformedLines,
}

impl Options {
    /// Sets the similarity metric, [`Builtins::Jaccard`] by default
    #[must_use]
    pub fn similarity(mut self, similarity: Builtins) -> Self {
        self.similarity = similarity;
        self
    }

    /// Sets which GO terms of an annotation line are used, [`TermExtraction::All`] by default
    #[must_use]
    pub fn term_extraction(mut self, extraction: TermExtraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets how malformed alignment lines are handled, [`MalformedLines::Fail`] by default
    #[must_use]
    pub fn malformed_lines(mut self, malformed: MalformedLines) -> Self {
        self.malformed = malformed;
        self
    }

    /// The similarity metric
    pub fn get_similarity(&self) -> Builtins {
        self.similarity
    }

    /// The GO term extraction
    pub fn get_term_extraction(&self) -> TermExtraction {
        self.extraction
    }

    /// The handling of malformed alignment lines
    pub fn get_malformed_lines(&self) -> MalformedLines {
        self.malformed
    }
}

/// Identifier mapping and GO annotations of one species
struct Species {
    mapping_stats: Vec<(String, usize)>,
    annotations: AnnotationMap,
}

impl Species {
    fn load(mapping: &Path, go_file: &Path, extraction: TermExtraction) -> GoScoreResult<Self> {
        let table = IdentifierTable::from_file(mapping)?;
        let annotations = AnnotationMap::from_file(go_file, &table, extraction)?;
        Ok(Self {
            mapping_stats: table.stats(),
            annotations,
        })
    }
}

/// Everything calculated during a scoring run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    result: ScoringResult,
    comparison: SpeciesComparison,
    annotation_stats: (AnnotationStats, AnnotationStats),
    mapping_stats: (Vec<(String, usize)>, Vec<(String, usize)>),
}

impl PipelineOutput {
    /// The scores of the alignment
    pub fn result(&self) -> &ScoringResult {
        &self.result
    }

    /// Consumes the output and returns the scores of the alignment
    pub fn into_result(self) -> ScoringResult {
        self.result
    }

    /// Comparison of the annotations of both species
    pub fn comparison(&self) -> &SpeciesComparison {
        &self.comparison
    }

    /// Annotation statistics of the first species
    pub fn annotation_stats_first(&self) -> &AnnotationStats {
        &self.annotation_stats.0
    }

    /// Annotation statistics of the second species
    pub fn annotation_stats_second(&self) -> &AnnotationStats {
        &self.annotation_stats.1
    }

    /// Number of identifiers per mapping column of the first species
    pub fn mapping_stats_first(&self) -> &[(String, usize)] {
        &self.mapping_stats.0
    }

    /// Number of identifiers per mapping column of the second species
    pub fn mapping_stats_second(&self) -> &[(String, usize)] {
        &self.mapping_stats.1
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Scores a network alignment from the input files
///
/// Both species are loaded concurrently, each one from its own
/// mapping and GO annotation file. Afterwards, the alignment is read
/// and all pairs are scored.
///
/// ```mermaid
/// graph LR
///     MA[mapping A] --> TA[IdentifierTable A]
///     GA[GO file A] --> AA
///     TA --> AA[AnnotationMap A]
///     MB[mapping B] --> TB[IdentifierTable B]
///     GB[GO file B] --> AB
///     TB --> AB[AnnotationMap B]
///     AA --> S[Scorer]
///     AB --> S
///     AL[alignment] --> S
///     S --> R[ScoringResult]
/// ```
///
/// Any error aborts the whole run, there are no partial results.
///
/// # Examples
///
/// ```no_run
/// use goscore::{Inputs, Options, Pipeline};
///
/// let inputs = Inputs::new(
///     "human_mouse.sif",
///     "human.gaf",
///     "mouse.gaf",
///     "human_mapping.txt",
///     "mouse_mapping.txt",
/// );
/// let output = Pipeline::new(Options::default()).run(&inputs).unwrap();
/// println!("Mean similarity: {}", output.result().mean_score());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Pipeline {
    options: Options,
}

impl Pipeline {
    /// Constructs a new `Pipeline`
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Runs the pipeline
    ///
    /// # Errors
    ///
    /// - [`crate::GoScoreError::NotFound`]: One of the input files is missing
    /// - [`crate::GoScoreError::MalformedRecord`]: The alignment contains a line with a single column
    /// - [`crate::GoScoreError::InvalidInput`]: An input file is not valid text
    pub fn run(&self, inputs: &Inputs) -> GoScoreResult<PipelineOutput> {
        let extraction = self.options.extraction;
        info!("Loading annotations of both species");
        let (first, second) = rayon::join(
            || Species::load(inputs.mapping_first(), inputs.go_first(), extraction),
            || Species::load(inputs.mapping_second(), inputs.go_second(), extraction),
        );
        let (first, second) = (first?, second?);

        let pairs: Vec<AlignedPair> =
            alignment::from_file(inputs.alignment(), self.options.malformed)?;

        let result = Scorer::new(self.options.similarity).score(
            &pairs,
            &first.annotations,
            &second.annotations,
        );

        Ok(PipelineOutput {
            comparison: SpeciesComparison::new(&first.annotations, &second.annotations),
            annotation_stats: (first.annotations.stats(), second.annotations.stats()),
            mapping_stats: (first.mapping_stats, second.mapping_stats),
            result,
        })
    }
}

/// Scores a network alignment with the default [`Options`]
///
/// # Errors
///
/// See [`Pipeline::run`]
pub fn score_alignment<P: AsRef<Path>>(
    alignment: P,
    go_first: P,
    go_second: P,
    mapping_first: P,
    mapping_second: P,
) -> GoScoreResult<ScoringResult> {
    let inputs = Inputs::new(alignment, go_first, go_second, mapping_first, mapping_second);
    Ok(Pipeline::default().run(&inputs)?.into_result())
}
