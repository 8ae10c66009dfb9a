//! Contains implementation for the set based similarity algorithms
//!
//! All of the algorithms can also be accessed via [`crate::similarity::Builtins`]

use crate::f64_from_usize;
use crate::similarity::Similarity;
use crate::term::GoGroup;

/// Jaccard index of two sets of GO terms
///
/// `|a ∩ b| / |a ∪ b|`
///
/// Two empty sets are considered identical (`1.0`), if only
/// one of the sets is empty, the similarity is `0.0`.
///
/// # Examples
///
/// ```
/// use goscore::similarity::{Jaccard, Similarity};
/// use goscore::{GoGroup, GoTermId};
///
/// let a: GoGroup = [1u32, 2].into_iter().map(GoTermId::from).collect();
/// let b: GoGroup = [2u32, 3].into_iter().map(GoTermId::from).collect();
///
/// assert!((Jaccard.calculate(&a, &b) - 1.0 / 3.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Jaccard;

impl Similarity for Jaccard {
    fn calculate(&self, a: &GoGroup, b: &GoGroup) -> f64 {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => {
                let common = a.intersection_len(b);
                f64_from_usize(common) / f64_from_usize(a.len() + b.len() - common)
            }
        }
    }

    fn name(&self) -> String {
        "jaccard".to_string()
    }
}

/// Cosine similarity of the binary term vectors of two sets
///
/// `|a ∩ b| / sqrt(|a| * |b|)`
///
/// Two empty sets are considered identical (`1.0`), if only
/// one of the sets is empty, the similarity is `0.0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cosine;

impl Similarity for Cosine {
    fn calculate(&self, a: &GoGroup, b: &GoGroup) -> f64 {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => {
                let norm = (f64_from_usize(a.len()) * f64_from_usize(b.len())).sqrt();
                f64_from_usize(a.intersection_len(b)) / norm
            }
        }
    }

    fn name(&self) -> String {
        "cosine".to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GoTermId;

    fn group(ids: &[u32]) -> GoGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    #[test]
    fn jaccard_identical() {
        let a = group(&[1, 2, 3]);
        assert!((Jaccard.calculate(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_empty() {
        let a = group(&[1, 2, 3]);
        let empty = GoGroup::new();
        assert!(Jaccard.calculate(&a, &empty).abs() < f64::EPSILON);
        assert!(Jaccard.calculate(&empty, &a).abs() < f64::EPSILON);
        assert!((Jaccard.calculate(&empty, &empty) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_partial() {
        let a = group(&[1, 2]);
        let b = group(&[2, 3]);
        assert!((Jaccard.calculate(&a, &b) - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_disjoint() {
        assert!(Jaccard.calculate(&group(&[1, 2]), &group(&[3])).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_symmetric() {
        let sets = [
            group(&[1]),
            group(&[1, 2, 3, 4]),
            group(&[2, 4, 6, 8, 10, 12, 14, 16, 18]),
            group(&[3, 5, 7]),
        ];
        for a in &sets {
            for b in &sets {
                assert!((Jaccard.calculate(a, b) - Jaccard.calculate(b, a)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn cosine_values() {
        let a = group(&[1, 2]);
        let b = group(&[2, 3, 4, 5, 6, 7, 8, 9]);
        // 1 / sqrt(2 * 8)
        assert!((Cosine.calculate(&a, &b) - 0.25).abs() < f64::EPSILON);
        assert!((Cosine.calculate(&a, &a) - 1.0).abs() < f64::EPSILON);
        assert!(Cosine.calculate(&a, &GoGroup::new()).abs() < f64::EPSILON);
        assert!((Cosine.calculate(&GoGroup::new(), &GoGroup::new()) - 1.0).abs() < f64::EPSILON);
    }
}
