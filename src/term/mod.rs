//! GO terms and sets of GO terms
//!
//! A [`GoTermId`] identifies a single Gene Ontology term, a [`GoGroup`]
//! holds all terms annotated to one protein.

mod gotermid;
mod group;

pub use gotermid::GoTermId;
pub use group::{GoGroup, GoTermIds};
