//! Result structures and summary statistics
//!
//! [`ScoringResult`] is the main output of a scoring run. It holds the
//! per-pair scores in alignment order and the aggregated [`Summary`].
//!
//! [`SpeciesComparison`] and [`AnnotationStats`] describe the
//! annotation data that went into the scoring.

use std::collections::HashMap;

use statrs::statistics::{Data, Median, Statistics};

use crate::annotations::AnnotationMap;
use crate::f64_from_usize;
use crate::term::GoTermId;

/// Number of terms listed in [`AnnotationStats::most_common_terms`]
const MOST_COMMON_TERMS: usize = 10;

/// The similarity of one aligned protein pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    first: String,
    second: String,
    first_terms: usize,
    second_terms: usize,
    common_terms: usize,
    union_terms: usize,
    score: f64,
}

impl PairScore {
    pub(crate) fn new(
        first: &str,
        second: &str,
        first_terms: usize,
        second_terms: usize,
        common_terms: usize,
        score: f64,
    ) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            first_terms,
            second_terms,
            common_terms,
            union_terms: first_terms + second_terms - common_terms,
            score,
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

    /// Number of GO terms of the first protein
    pub fn first_terms(&self) -> usize {
        self.first_terms
    }

    /// Number of GO terms of the second protein
    pub fn second_terms(&self) -> usize {
        self.second_terms
    }

    /// Number of GO terms shared by both proteins
    pub fn common_terms(&self) -> usize {
        self.common_terms
    }

    /// Number of distinct GO terms of both proteins together
    pub fn union_terms(&self) -> usize {
        self.union_terms
    }

    /// The similarity score
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Descriptive statistics of the scores of all scored pairs
///
/// All values are `0.0` if no pair could be scored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    mean: f64,
    median: f64,
    std_dev: f64,
    min: f64,
    max: f64,
    coverage: f64,
}

impl Summary {
    /// Calculates the statistics of `scores`
    ///
    /// `total_pairs` is the number of pairs in the alignment, including
    /// the unscored ones, and is only needed for the coverage.
    pub fn new(scores: &[f64], total_pairs: usize) -> Self {
        if scores.is_empty() {
            return Summary::default();
        }
        Self {
            mean: scores.iter().sum::<f64>() / f64_from_usize(scores.len()),
            median: Data::new(scores.to_vec()).median(),
            std_dev: scores.iter().population_std_dev(),
            min: Statistics::min(scores.iter()),
            max: Statistics::max(scores.iter()),
            coverage: f64_from_usize(scores.len()) / f64_from_usize(total_pairs),
        }
    }

    /// The arithmetic mean
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The median
    pub fn median(&self) -> f64 {
        self.median
    }

    /// The population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// The lowest score
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The highest score
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Fraction of alignment pairs that could be scored
    pub fn coverage(&self) -> f64 {
        self.coverage
    }
}

/// Quality grade of an alignment, based on the mean score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
    /// mean score below `0.3`
    Poor,
    /// mean score of at least `0.3`
    Fair,
    /// mean score of at least `0.5`
    Good,
    /// mean score of at least `0.7`
    Excellent,
}

impl From<f64> for Quality {
    fn from(mean: f64) -> Self {
        if mean >= 0.7 {
            Quality::Excellent
        } else if mean >= 0.5 {
            Quality::Good
        } else if mean >= 0.3 {
            Quality::Fair
        } else {
            Quality::Poor
        }
    }
}

/// Grade of the fraction of scored alignment pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CoverageGrade {
    /// coverage below `0.6`
    NeedsImprovement,
    /// coverage of at least `0.6`
    Good,
    /// coverage of at least `0.8`
    Excellent,
}

impl From<f64> for CoverageGrade {
    fn from(coverage: f64) -> Self {
        if coverage >= 0.8 {
            CoverageGrade::Excellent
        } else if coverage >= 0.6 {
            CoverageGrade::Good
        } else {
            CoverageGrade::NeedsImprovement
        }
    }
}

/// The outcome of scoring an alignment
///
/// `scored_pairs + unmappable_first + unmappable_second == total_pairs`
/// always holds, because a pair is counted as unmappable only once:
/// if the first protein cannot be mapped, the second one is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    metric: String,
    total_pairs: usize,
    unmappable_first: usize,
    unmappable_second: usize,
    total_score: f64,
    summary: Summary,
    pairs: Vec<PairScore>,
}

impl ScoringResult {
    pub(crate) fn new(
        metric: String,
        total_pairs: usize,
        unmappable_first: usize,
        unmappable_second: usize,
        pairs: Vec<PairScore>,
    ) -> Self {
        let scores: Vec<f64> = pairs.iter().map(PairScore::score).collect();
        Self {
            metric,
            total_pairs,
            unmappable_first,
            unmappable_second,
            total_score: scores.iter().sum(),
            summary: Summary::new(&scores, total_pairs),
            pairs,
        }
    }

    /// The name of the similarity metric
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Number of pairs in the alignment
    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    /// Number of pairs whose first protein has no GO annotations
    pub fn unmappable_first(&self) -> usize {
        self.unmappable_first
    }

    /// Number of pairs whose second protein has no GO annotations
    pub fn unmappable_second(&self) -> usize {
        self.unmappable_second
    }

    /// Number of pairs with a similarity score
    pub fn scored_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Sum of all scores
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Mean score of the scored pairs, `0.0` if no pair was scored
    pub fn mean_score(&self) -> f64 {
        self.summary.mean()
    }

    /// Descriptive statistics of all scores
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Fraction of pairs that were scored
    pub fn coverage(&self) -> f64 {
        self.summary.coverage()
    }

    /// The scores of all scored pairs, in alignment order
    pub fn pairs(&self) -> &[PairScore] {
        &self.pairs
    }

    /// All pairs with a score of at least `threshold`
    pub fn high_quality_pairs(&self, threshold: f64) -> Vec<&PairScore> {
        self.pairs
            .iter()
            .filter(|pair| pair.score() >= threshold)
            .collect()
    }

    /// Quality grade of the alignment
    pub fn quality(&self) -> Quality {
        Quality::from(self.mean_score())
    }

    /// Grade of the coverage
    pub fn coverage_grade(&self) -> CoverageGrade {
        CoverageGrade::from(self.coverage())
    }
}

/// Overview of the annotations of one species
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnnotationStats {
    total_proteins: usize,
    total_annotations: usize,
    unique_terms: usize,
    mean_terms: f64,
    min_terms: usize,
    max_terms: usize,
    most_common_terms: Vec<(GoTermId, usize)>,
}

impl AnnotationStats {
    pub(crate) fn new<I: Iterator<Item = usize>>(
        terms_per_protein: I,
        term_counts: &HashMap<GoTermId, usize>,
    ) -> Self {
        let mut stats = AnnotationStats {
            min_terms: usize::MAX,
            ..Default::default()
        };
        for count in terms_per_protein {
            stats.total_proteins += 1;
            stats.total_annotations += count;
            stats.min_terms = stats.min_terms.min(count);
            stats.max_terms = stats.max_terms.max(count);
        }
        if stats.total_proteins == 0 {
            return AnnotationStats::default();
        }
        stats.mean_terms =
            f64_from_usize(stats.total_annotations) / f64_from_usize(stats.total_proteins);
        stats.unique_terms = term_counts.len();

        let mut common: Vec<(GoTermId, usize)> =
            term_counts.iter().map(|(id, n)| (*id, *n)).collect();
        common.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        common.truncate(MOST_COMMON_TERMS);
        stats.most_common_terms = common;
        stats
    }

    /// Number of annotated proteins
    pub fn total_proteins(&self) -> usize {
        self.total_proteins
    }

    /// Sum of the number of GO terms of all proteins
    pub fn total_annotations(&self) -> usize {
        self.total_annotations
    }

    /// Number of distinct GO terms
    pub fn unique_terms(&self) -> usize {
        self.unique_terms
    }

    /// Average number of GO terms per protein
    pub fn mean_terms(&self) -> f64 {
        self.mean_terms
    }

    /// Lowest number of GO terms of a protein
    pub fn min_terms(&self) -> usize {
        self.min_terms
    }

    /// Highest number of GO terms of a protein
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    /// The most frequently recorded GO terms with their count
    ///
    /// Sorted by descending count, ties by ascending term id
    pub fn most_common_terms(&self) -> &[(GoTermId, usize)] {
        &self.most_common_terms
    }
}

/// Comparison of the GO annotations of both species
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SpeciesComparison {
    first_proteins: usize,
    second_proteins: usize,
    first_terms: usize,
    second_terms: usize,
    common_terms: usize,
    term_overlap: f64,
}

impl SpeciesComparison {
    /// Compares the annotations of two species
    pub fn new(first: &AnnotationMap, second: &AnnotationMap) -> Self {
        let first_terms = first.all_terms();
        let second_terms = second.all_terms();
        let common_terms = first_terms.intersection_len(&second_terms);
        let union_terms = first_terms.union_len(&second_terms);
        Self {
            first_proteins: first.len(),
            second_proteins: second.len(),
            first_terms: first_terms.len(),
            second_terms: second_terms.len(),
            common_terms,
            term_overlap: if union_terms == 0 {
                0.0
            } else {
                f64_from_usize(common_terms) / f64_from_usize(union_terms)
            },
        }
    }

    /// Number of annotated proteins of the first species
    pub fn first_proteins(&self) -> usize {
        self.first_proteins
    }

    /// Number of annotated proteins of the second species
    pub fn second_proteins(&self) -> usize {
        self.second_proteins
    }

    /// Number of distinct GO terms of the first species
    pub fn first_terms(&self) -> usize {
        self.first_terms
    }

    /// Number of distinct GO terms of the second species
    pub fn second_terms(&self) -> usize {
        self.second_terms
    }

    /// Number of GO terms used in both species
    pub fn common_terms(&self) -> usize {
        self.common_terms
    }

    /// Jaccard index of the GO terms used in both species
    pub fn term_overlap(&self) -> f64 {
        self.term_overlap
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::GoGroup;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn group(ids: &[u32]) -> GoGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    #[test]
    fn summary_values() {
        let summary = Summary::new(&[0.5, 1.0, 0.0, 0.25], 8);
        assert_close(summary.mean(), 0.4375);
        assert_close(summary.median(), 0.375);
        assert_close(summary.min(), 0.0);
        assert_close(summary.max(), 1.0);
        assert_close(summary.coverage(), 0.5);
        // population variance: (0.0625^2 + 0.5625^2 + 0.4375^2 + 0.1875^2) / 4
        assert_close(summary.std_dev(), (0.136_718_75f64).sqrt());
    }

    #[test]
    fn summary_odd_median() {
        let summary = Summary::new(&[0.9, 0.1, 0.3], 3);
        assert_close(summary.median(), 0.3);
        assert_close(summary.coverage(), 1.0);
    }

    #[test]
    fn summary_empty() {
        assert_eq!(Summary::new(&[], 10), Summary::default());
        assert_eq!(Summary::new(&[], 0), Summary::default());
    }

    #[test]
    fn result_accounting() {
        let pairs = vec![
            PairScore::new("A", "a", 2, 2, 1, 1.0 / 3.0),
            PairScore::new("B", "b", 1, 1, 1, 1.0),
        ];
        let result = ScoringResult::new("jaccard".to_string(), 5, 2, 1, pairs);
        assert_eq!(result.scored_pairs(), 2);
        assert_eq!(
            result.scored_pairs() + result.unmappable_first() + result.unmappable_second(),
            result.total_pairs()
        );
        assert_close(result.total_score(), 4.0 / 3.0);
        assert_close(result.mean_score(), 2.0 / 3.0);
        assert_close(result.coverage(), 0.4);
        assert_eq!(result.pairs()[0].union_terms(), 3);
        assert_eq!(result.metric(), "jaccard");
    }

    #[test]
    fn high_quality_pairs() {
        let pairs = vec![
            PairScore::new("A", "a", 2, 2, 1, 0.3),
            PairScore::new("B", "b", 1, 1, 1, 1.0),
            PairScore::new("C", "c", 2, 2, 2, 0.5),
        ];
        let result = ScoringResult::new("jaccard".to_string(), 3, 0, 0, pairs);
        let firsts: Vec<&str> = result
            .high_quality_pairs(0.5)
            .iter()
            .map(|pair| pair.first())
            .collect();
        assert_eq!(firsts, vec!["B", "C"]);
    }

    #[test]
    fn grades() {
        assert_eq!(Quality::from(0.7), Quality::Excellent);
        assert_eq!(Quality::from(0.69), Quality::Good);
        assert_eq!(Quality::from(0.3), Quality::Fair);
        assert_eq!(Quality::from(0.0), Quality::Poor);
        assert_eq!(CoverageGrade::from(0.8), CoverageGrade::Excellent);
        assert_eq!(CoverageGrade::from(0.6), CoverageGrade::Good);
        assert_eq!(CoverageGrade::from(0.59), CoverageGrade::NeedsImprovement);
    }

    #[test]
    fn annotation_statistics() {
        let map: AnnotationMap = vec![
            ("P1", group(&[1, 2, 3])),
            ("P2", group(&[2])),
            ("P3", group(&[2, 3])),
        ]
        .into_iter()
        .collect();
        let stats = map.stats();
        assert_eq!(stats.total_proteins(), 3);
        assert_eq!(stats.total_annotations(), 6);
        assert_eq!(stats.unique_terms(), 3);
        assert_close(stats.mean_terms(), 2.0);
        assert_eq!(stats.min_terms(), 1);
        assert_eq!(stats.max_terms(), 3);
        assert_eq!(
            stats.most_common_terms(),
            &[
                (GoTermId::from(2u32), 3),
                (GoTermId::from(3u32), 2),
                (GoTermId::from(1u32), 1)
            ]
        );
    }

    #[test]
    fn annotation_statistics_empty() {
        assert_eq!(AnnotationMap::default().stats(), AnnotationStats::default());
    }

    #[test]
    fn species_comparison() {
        let first: AnnotationMap = vec![("P1", group(&[1, 2])), ("P2", group(&[3]))]
            .into_iter()
            .collect();
        let second: AnnotationMap = vec![("Q1", group(&[2, 3, 4, 5]))].into_iter().collect();
        let comparison = SpeciesComparison::new(&first, &second);
        assert_eq!(comparison.first_proteins(), 2);
        assert_eq!(comparison.second_proteins(), 1);
        assert_eq!(comparison.first_terms(), 3);
        assert_eq!(comparison.second_terms(), 4);
        assert_eq!(comparison.common_terms(), 2);
        assert_close(comparison.term_overlap(), 2.0 / 5.0);
    }

    #[test]
    fn species_comparison_empty() {
        let comparison = SpeciesComparison::new(&AnnotationMap::default(), &AnnotationMap::default());
        assert_close(comparison.term_overlap(), 0.0);
    }
}
