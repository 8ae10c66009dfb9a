//! Methods to calculate the Similarity between two sets of GO terms
//!
//! Only set based metrics are provided. They compare the GO terms
//! of two proteins directly and do not use the hierarchy of the
//! Gene Ontology.

use std::fmt::Display;
use std::str::FromStr;

use crate::term::GoGroup;
use crate::GoScoreError;

mod defaults;
pub use defaults::{Cosine, Jaccard};

/// Trait for similarity score calculation between 2 [`GoGroup`]s
///
/// `goscore` comes with the [`Jaccard`] and [`Cosine`] metrics,
/// custom metrics can be added by implementing this trait.
pub trait Similarity {
    /// calculates the actual similarity between group a and group b
    fn calculate(&self, a: &GoGroup, b: &GoGroup) -> f64;

    /// The name of the metric, used in the scoring results
    fn name(&self) -> String {
        "custom".to_string()
    }
}

/// The built-in similarity metrics
///
/// # Examples
///
/// ```
/// use goscore::similarity::Builtins;
///
/// let metric: Builtins = "Cosine".parse().unwrap();
/// assert_eq!(metric, Builtins::Cosine);
///
/// assert!("resnik".parse::<Builtins>().is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Builtins {
    /// [`Jaccard`] index
    #[default]
    Jaccard,
    /// [`Cosine`] similarity
    Cosine,
}

impl Similarity for Builtins {
    fn calculate(&self, a: &GoGroup, b: &GoGroup) -> f64 {
        match self {
            Builtins::Jaccard => Jaccard.calculate(a, b),
            Builtins::Cosine => Cosine.calculate(a, b),
        }
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Builtins {
    type Err = GoScoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jaccard" => Ok(Builtins::Jaccard),
            "cosine" => Ok(Builtins::Cosine),
            _ => Err(GoScoreError::UnknownMetric(s.to_string())),
        }
    }
}

impl Display for Builtins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Builtins::Jaccard => write!(f, "jaccard"),
            Builtins::Cosine => write!(f, "cosine"),
        }
    }
}
