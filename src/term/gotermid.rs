use core::fmt::Debug;
use std::fmt::Display;

use crate::{GoScoreError, GoScoreResult, GO_PREFIX};

/// A Gene Ontology term identifier
///
/// Only the numeric code of the term is stored, the `GO:` prefix
/// is stripped on parsing and added back when displaying.
///
/// # Examples
///
/// ```
/// use goscore::GoTermId;
///
/// let id = GoTermId::try_from("GO:0008150").unwrap();
/// assert_eq!(id.as_u32(), 8150);
/// assert_eq!(id.to_string(), "GO:0008150");
/// ```
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl GoTermId {
    /// Returns the numeric code of the term
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GoTermId {
    type Error = GoScoreError;
    /// Parses a prefixed GO term, e.g. `GO:0008150`
    ///
    /// # Errors
    ///
    /// - [`GoScoreError::InvalidInput`]: the value does not start with `GO:`
    /// - [`GoScoreError::ParseIntError`]: the code is not numeric
    fn try_from(s: &str) -> GoScoreResult<Self> {
        let Some(code) = s.strip_prefix(GO_PREFIX) else {
            return Err(GoScoreError::InvalidInput(s.to_string()));
        };
        Ok(GoTermId {
            inner: code.parse::<u32>()?,
        })
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{GO_PREFIX}{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |other| *self == other)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_valid() {
        let id = GoTermId::try_from("GO:0005515").unwrap();
        assert_eq!(id.as_u32(), 5515);
        assert_eq!(id, GoTermId::from(5515u32));
    }

    #[test]
    fn parse_missing_prefix() {
        assert!(matches!(
            GoTermId::try_from("0005515"),
            Err(GoScoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn parse_invalid_code() {
        assert!(matches!(
            GoTermId::try_from("GO:00055A5"),
            Err(GoScoreError::ParseIntError)
        ));
        assert!(GoTermId::try_from("GO:").is_err());
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(GoTermId::from(1u32).to_string(), "GO:0000001");
        assert_eq!(format!("{:?}", GoTermId::from(42u32)), "GoTermId(GO:0000042)");
    }

    #[test]
    fn compare_with_str() {
        let id = GoTermId::from(8150u32);
        assert!(id == *"GO:0008150");
        assert!(id != *"GO:0008151");
        assert!(id != *"foobar");
    }
}
