//! Scoring of aligned protein pairs
//!
//! Every pair of the alignment is scored by the similarity of the GO terms
//! of both proteins. The GO terms of a protein are looked up in the
//! annotations of the first species, then in those of the second
//! species. A pair is skipped as soon as one of its proteins has no
//! annotation in either species.

use rayon::prelude::*;
use tracing::info;

use crate::alignment::AlignedPair;
use crate::annotations::AnnotationMap;
use crate::similarity::Similarity;
use crate::stats::{PairScore, ScoringResult};
use crate::term::GoGroup;

/// The outcome of scoring a single aligned pair
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    /// The first protein has no GO annotations
    UnmappableFirst,
    /// The first protein is annotated, but the second one isn't
    UnmappableSecond,
    /// Both proteins are annotated
    Scored(PairScore),
}

/// Returns the GO terms of `protein`, from the first species if present
fn resolve<'a>(
    protein: &str,
    first: &'a AnnotationMap,
    second: &'a AnnotationMap,
) -> Option<&'a GoGroup> {
    first.get(protein).or_else(|| second.get(protein))
}

/// Scores aligned protein pairs with a [`Similarity`] metric
///
/// # Examples
///
/// ```
/// use goscore::{AlignedPair, AnnotationMap, GoGroup, GoTermId, Scorer};
/// use goscore::similarity::Jaccard;
///
/// fn group(ids: &[u32]) -> GoGroup {
///     ids.iter().map(|id| GoTermId::from(*id)).collect()
/// }
///
/// let first: AnnotationMap = vec![("ENSP1", group(&[1, 2]))].into_iter().collect();
/// let second: AnnotationMap = vec![("ENSP2", group(&[2, 3]))].into_iter().collect();
/// let pairs = vec![
///     AlignedPair::new("ENSP1", "ENSP2"),
///     AlignedPair::new("ENSP3", "ENSP2"),
/// ];
///
/// let result = Scorer::new(Jaccard).score(&pairs, &first, &second);
///
/// assert_eq!(result.total_pairs(), 2);
/// assert_eq!(result.scored_pairs(), 1);
/// assert_eq!(result.unmappable_first(), 1);
/// assert!((result.total_score() - 1.0 / 3.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Scorer<S> {
    similarity: S,
}

impl<S: Similarity + Sync> Scorer<S> {
    /// Constructs a new `Scorer` using the `similarity` metric
    pub fn new(similarity: S) -> Self {
        Self { similarity }
    }

    /// Scores a single pair
    pub fn score_pair(
        &self,
        pair: &AlignedPair,
        first: &AnnotationMap,
        second: &AnnotationMap,
    ) -> PairOutcome {
        let Some(first_terms) = resolve(pair.first(), first, second) else {
            return PairOutcome::UnmappableFirst;
        };
        let Some(second_terms) = resolve(pair.second(), first, second) else {
            return PairOutcome::UnmappableSecond;
        };
        PairOutcome::Scored(PairScore::new(
            pair.first(),
            pair.second(),
            first_terms.len(),
            second_terms.len(),
            first_terms.intersection_len(second_terms),
            self.similarity.calculate(first_terms, second_terms),
        ))
    }

    /// Scores all `pairs` and aggregates the results
    ///
    /// The pairs are scored in parallel, the results are collected
    /// in alignment order.
    pub fn score(
        &self,
        pairs: &[AlignedPair],
        first: &AnnotationMap,
        second: &AnnotationMap,
    ) -> ScoringResult {
        let outcomes: Vec<PairOutcome> = pairs
            .par_iter()
            .map(|pair| self.score_pair(pair, first, second))
            .collect();

        let mut unmappable_first = 0usize;
        let mut unmappable_second = 0usize;
        let mut scores = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                PairOutcome::UnmappableFirst => unmappable_first += 1,
                PairOutcome::UnmappableSecond => unmappable_second += 1,
                PairOutcome::Scored(score) => scores.push(score),
            }
        }

        let result = ScoringResult::new(
            self.similarity.name(),
            pairs.len(),
            unmappable_first,
            unmappable_second,
            scores,
        );
        info!(
            "Scored {} of {} pairs, mean {} similarity: {:.4}",
            result.scored_pairs(),
            result.total_pairs(),
            result.metric(),
            result.mean_score()
        );
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::similarity::{Builtins, Cosine, Jaccard};
    use crate::GoTermId;

    fn group(ids: &[u32]) -> GoGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    fn species_a() -> AnnotationMap {
        vec![("ENSP1", group(&[1, 2])), ("SHARED", group(&[7]))]
            .into_iter()
            .collect()
    }

    fn species_b() -> AnnotationMap {
        vec![("ENSP2", group(&[2, 3])), ("SHARED", group(&[8, 9]))]
            .into_iter()
            .collect()
    }

    #[test]
    fn single_pair() {
        let pairs = vec![AlignedPair::new("ENSP1", "ENSP2")];
        let result = Scorer::new(Jaccard).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.total_pairs(), 1);
        assert_eq!(result.scored_pairs(), 1);
        assert_eq!(result.unmappable_first(), 0);
        assert_eq!(result.unmappable_second(), 0);
        assert!((result.total_score() - 1.0 / 3.0).abs() < f64::EPSILON);

        let detail = &result.pairs()[0];
        assert_eq!(detail.first_terms(), 2);
        assert_eq!(detail.second_terms(), 2);
        assert_eq!(detail.common_terms(), 1);
        assert_eq!(detail.union_terms(), 3);
    }

    #[test]
    fn unmappable_first_skips_pair() {
        let pairs = vec![AlignedPair::new("FOO", "BAR")];
        let result = Scorer::new(Jaccard).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.unmappable_first(), 1);
        // the second protein is not checked anymore
        assert_eq!(result.unmappable_second(), 0);
        assert_eq!(result.scored_pairs(), 0);
        assert!(result.total_score().abs() < f64::EPSILON);
        assert!(result.mean_score().abs() < f64::EPSILON);
    }

    #[test]
    fn unmappable_second() {
        let pairs = vec![
            AlignedPair::new("ENSP1", "BAR"),
            AlignedPair::new("ENSP1", "ENSP1"),
        ];
        let result = Scorer::new(Jaccard).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.unmappable_first(), 0);
        assert_eq!(result.unmappable_second(), 1);
        assert_eq!(result.scored_pairs(), 1);
        assert!((result.total_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_prefers_first_species() {
        let a = species_a();
        let b = species_b();
        let scorer = Scorer::new(Jaccard);

        // SHARED is {7} in species A and {8, 9} in species B
        match scorer.score_pair(&AlignedPair::new("SHARED", "ENSP2"), &a, &b) {
            PairOutcome::Scored(score) => assert_eq!(score.first_terms(), 1),
            other => panic!("pair must be scored, got {other:?}"),
        }
        match scorer.score_pair(&AlignedPair::new("ENSP1", "SHARED"), &a, &b) {
            PairOutcome::Scored(score) => assert_eq!(score.second_terms(), 1),
            other => panic!("pair must be scored, got {other:?}"),
        }

        // proteins are found in the other species as well
        match scorer.score_pair(&AlignedPair::new("ENSP2", "ENSP1"), &a, &b) {
            PairOutcome::Scored(score) => assert!((score.score() - 1.0 / 3.0).abs() < f64::EPSILON),
            other => panic!("pair must be scored, got {other:?}"),
        }
    }

    #[test]
    fn accounting_invariant() {
        let pairs = vec![
            AlignedPair::new("ENSP1", "ENSP2"),
            AlignedPair::new("FOO", "ENSP2"),
            AlignedPair::new("FOO", "BAR"),
            AlignedPair::new("ENSP2", "BAR"),
            AlignedPair::new("SHARED", "ENSP1"),
            AlignedPair::new("", ""),
        ];
        let result = Scorer::new(Jaccard).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.total_pairs(), 6);
        assert_eq!(result.unmappable_first(), 3);
        assert_eq!(result.unmappable_second(), 1);
        assert_eq!(result.scored_pairs(), 2);
        assert_eq!(
            result.scored_pairs() + result.unmappable_first() + result.unmappable_second(),
            result.total_pairs()
        );
    }

    #[test]
    fn keeps_alignment_order() {
        let pairs: Vec<AlignedPair> = (0..200)
            .map(|i| {
                if i % 2 == 0 {
                    AlignedPair::new("ENSP1", "ENSP2")
                } else {
                    AlignedPair::new("SHARED", "ENSP1")
                }
            })
            .collect();
        let result = Scorer::new(Jaccard).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.scored_pairs(), 200);
        for (idx, pair) in result.pairs().iter().enumerate() {
            let expected = if idx % 2 == 0 { "ENSP1" } else { "SHARED" };
            assert_eq!(pair.first(), expected);
        }
    }

    #[test]
    fn empty_alignment() {
        let result = Scorer::new(Jaccard).score(&[], &species_a(), &species_b());
        assert_eq!(result.total_pairs(), 0);
        assert!(result.mean_score().abs() < f64::EPSILON);
        assert!(result.coverage().abs() < f64::EPSILON);
    }

    #[test]
    fn metric_name() {
        let pairs = vec![AlignedPair::new("ENSP1", "ENSP2")];
        let result = Scorer::new(Cosine).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.metric(), "cosine");
        assert!((result.total_score() - 0.5).abs() < f64::EPSILON);

        let result = Scorer::new(Builtins::default()).score(&pairs, &species_a(), &species_b());
        assert_eq!(result.metric(), "jaccard");
    }
}
