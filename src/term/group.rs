use std::collections::HashSet;
use std::ops::{BitAnd, BitOr};

use smallvec::SmallVec;

use crate::GoTermId;

/// Number of terms stored inline before [`GoGroup`] spills to the heap
const DEFAULT_NUM_TERMS: usize = 8;

/// A set of [`GoTermId`] representing all GO terms of one protein
///
/// Each term can occur only once in the group. The terms are kept
/// sorted, which allows linear-time intersection and union.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoGroup {
    ids: SmallVec<[GoTermId; DEFAULT_NUM_TERMS]>,
}

impl GoGroup {
    /// Constructs a new, empty [`GoGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`GoGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `GoTermId`, true is returned.
    /// - If the group already contained this `GoTermId`, false is returned.
    ///
    pub fn insert<I: Into<GoTermId>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> GoTermIds<'_> {
        GoTermIds::new(self.ids.iter())
    }

    /// Returns the number of terms present in both groups
    ///
    /// Same as `(a & b).len()`, but without building the intersection
    pub fn intersection_len(&self, other: &GoGroup) -> usize {
        let mut a = self.ids.iter().peekable();
        let mut b = other.ids.iter().peekable();
        let mut count = 0;
        while let (Some(x), Some(y)) = (a.peek(), b.peek()) {
            match x.cmp(y) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    count += 1;
                    a.next();
                    b.next();
                }
            }
        }
        count
    }

    /// Returns the number of terms present in either group
    pub fn union_len(&self, other: &GoGroup) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl From<HashSet<GoTermId>> for GoGroup {
    fn from(s: HashSet<GoTermId>) -> Self {
        s.into_iter().collect()
    }
}

impl FromIterator<GoTermId> for GoGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut group = GoGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a GoGroup {
    type Item = GoTermId;

    type IntoIter = GoTermIds<'a>;

    fn into_iter(self) -> GoTermIds<'a> {
        GoTermIds::new(self.ids.iter())
    }
}

/// An iterator over [`GoTermId`]s
pub struct GoTermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> GoTermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl Iterator for GoTermIds<'_> {
    type Item = GoTermId;
    fn next(&mut self) -> Option<GoTermId> {
        self.inner.next().copied()
    }
}

impl BitOr for &GoGroup {
    type Output = GoGroup;

    fn bitor(self, rhs: &GoGroup) -> GoGroup {
        let mut group = GoGroup::with_capacity(self.len() + rhs.len());
        let mut a = self.ids.iter().peekable();
        let mut b = rhs.ids.iter().peekable();
        loop {
            let next = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => match x.cmp(y) {
                    std::cmp::Ordering::Less => a.next(),
                    std::cmp::Ordering::Greater => b.next(),
                    std::cmp::Ordering::Equal => {
                        b.next();
                        a.next()
                    }
                },
                (Some(_), None) => a.next(),
                (None, Some(_)) => b.next(),
                (None, None) => break,
            };
            if let Some(id) = next {
                group.ids.push(*id);
            }
        }
        group
    }
}

impl BitAnd for &GoGroup {
    type Output = GoGroup;

    fn bitand(self, rhs: &GoGroup) -> GoGroup {
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut group = GoGroup::with_capacity(small.len());
        for id in &small.ids {
            if large.contains(id) {
                group.ids.push(*id);
            }
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[u32]) -> GoGroup {
        ids.iter().map(|id| GoTermId::from(*id)).collect()
    }

    #[test]
    fn insert_keeps_order_and_uniqueness() {
        let mut group = GoGroup::new();
        assert!(group.insert(3u32));
        assert!(group.insert(1u32));
        assert!(group.insert(2u32));
        assert!(!group.insert(1u32));

        let ids: Vec<u32> = group.iter().map(|id| id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(group.contains(&GoTermId::from(2u32)));
        assert!(!group.contains(&GoTermId::from(4u32)));
    }

    #[test]
    fn spills_beyond_inline_capacity() {
        let group: GoGroup = (0..20u32).rev().map(GoTermId::from).collect();
        assert_eq!(group.len(), 20);
        assert_eq!(group.iter().next(), Some(GoTermId::from(0u32)));
    }

    #[test]
    fn test_bitor() {
        let result = &group(&[1, 2, 3]) | &group(&[2, 4, 5]);
        assert_eq!(result, group(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_bitor_empty() {
        let result = &GoGroup::new() | &group(&[2, 4]);
        assert_eq!(result, group(&[2, 4]));
    }

    #[test]
    fn test_bitand() {
        let result = &group(&[1, 2, 3]) & &group(&[2, 4, 5, 1]);
        assert_eq!(result, group(&[1, 2]));
    }

    #[test]
    fn test_bitand_disjoint() {
        let result = &group(&[1, 2, 3]) & &group(&[7, 8]);
        assert!(result.is_empty());
    }

    #[test]
    fn counts_match_set_operations() {
        let a = group(&[1, 2, 3, 9]);
        let b = group(&[2, 3, 4]);
        assert_eq!(a.intersection_len(&b), (&a & &b).len());
        assert_eq!(a.union_len(&b), (&a | &b).len());
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(a.union_len(&b), 5);
    }

    #[test]
    fn from_hashset() {
        let set: HashSet<GoTermId> = [5u32, 1, 5, 3].into_iter().map(GoTermId::from).collect();
        assert_eq!(GoGroup::from(set), group(&[1, 3, 5]));
    }
}
