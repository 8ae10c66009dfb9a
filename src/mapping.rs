//! Parsing of per-species identifier mapping files
//!
//! A mapping file connects the canonical identifier of every protein
//! (e.g. the Ensembl ID) to any number of alternate identifiers
//! (gene symbol, UniProt accession, ...). Each alternate identifier type
//! is one column of the file:
//!
//! ```text
//! Ensembl_ID          Symbol  UniProt
//! ENSP00000000233     ARF5    P84085
//! ENSP00000000412     M6PR    P20645
//! ```
//!
//! The file is turned into an [`IdentifierTable`], holding one
//! [`LookupMap`] per alternate column.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::{FileKind, GoScoreError, GoScoreResult};

/// Lookup of one alternate identifier type to the canonical identifier
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupMap {
    name: String,
    entries: HashMap<String, String>,
}

impl LookupMap {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: HashMap::new(),
        }
    }

    /// The column name of the identifier type, as given in the header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical identifier for `alternate_id`
    pub fn get(&self, alternate_id: &str) -> Option<&str> {
        self.entries.get(alternate_id).map(String::as_str)
    }

    /// Returns `true` if `alternate_id` is present in the map
    pub fn contains(&self, alternate_id: &str) -> bool {
        self.entries.contains_key(alternate_id)
    }

    /// Returns the number of alternate identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map does not contain any identifier
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates all `(alternate, canonical)` identifier pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Adds an identifier, replacing a previous value of the same key
    fn insert(&mut self, alternate_id: &str, canonical_id: &str) {
        match self.entries.entry(alternate_id.to_string()) {
            Entry::Occupied(mut entry) => {
                debug!(
                    "{} {} maps to {} and {}, keeping the latter",
                    self.name,
                    alternate_id,
                    entry.get(),
                    canonical_id
                );
                canonical_id.clone_into(entry.get_mut());
            }
            Entry::Vacant(entry) => {
                entry.insert(canonical_id.to_string());
            }
        }
    }
}

/// All identifier lookups of one species
///
/// The table holds one [`LookupMap`] per alternate identifier column of
/// the mapping file, in column order. It is built once and not
/// modified afterwards.
///
/// # Examples
///
/// ```
/// use goscore::IdentifierTable;
///
/// let data = "Ensembl_ID\tSymbol\tUniProt\n\
///     ENSP1\tABC\tP12345\n\
///     ENSP2\tXYZ\tQ67890\n";
///
/// let table = IdentifierTable::parse(data.as_bytes()).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.canonical_id("XYZ"), Some("ENSP2"));
/// assert_eq!(table.lookup("UniProt", "P12345"), Some("ENSP1"));
/// assert_eq!(table.canonical_id("ENSP1"), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdentifierTable {
    maps: Vec<LookupMap>,
    skipped_lines: usize,
}

impl IdentifierTable {
    /// Parses a mapping file
    ///
    /// # Errors
    ///
    /// - [`GoScoreError::NotFound`]: The file does not exist or cannot be opened
    /// - [`GoScoreError::InvalidInput`]: The file contains non-UTF8 data
    pub fn from_file<P: AsRef<Path>>(file: P) -> GoScoreResult<Self> {
        let filename = file.as_ref().display().to_string();
        let file = File::open(file).map_err(|_| GoScoreError::NotFound {
            kind: FileKind::Mapping,
            path: filename.clone(),
        })?;
        let table = Self::parse(BufReader::new(file))?;
        info!(
            "Parsed {}: {} identifier types with {} total mappings",
            filename,
            table.len(),
            table.maps.iter().map(LookupMap::len).sum::<usize>()
        );
        Ok(table)
    }

    /// Parses mapping data from any buffered reader
    ///
    /// The first line is the header. Every following line is only
    /// used if it contains exactly as many columns as the header,
    /// other lines are skipped.
    ///
    /// # Errors
    ///
    /// [`GoScoreError::InvalidInput`]: The data is not valid UTF8
    pub fn parse<R: BufRead>(mut reader: R) -> GoScoreResult<Self> {
        let mut header = String::with_capacity(80);
        reader
            .read_line(&mut header)
            .map_err(|_| GoScoreError::InvalidInput("Invalid mapping header".to_string()))?;

        let columns: Vec<&str> = header.split_whitespace().collect();
        let mut table = IdentifierTable {
            maps: columns.iter().skip(1).map(|name| LookupMap::new(name)).collect(),
            skipped_lines: 0,
        };

        if table.maps.is_empty() {
            debug!("Mapping header has no alternate identifier columns");
        }

        // line numbers start at 2, because the header is already consumed
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|_| {
                GoScoreError::InvalidInput(format!("Invalid data in mapping line {}", idx + 2))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            table.add_line(&line, columns.len(), idx + 2);
        }
        Ok(table)
    }

    fn add_line(&mut self, line: &str, expected_columns: usize, line_number: usize) {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() != expected_columns {
            debug!(
                "Skipping mapping line {}: expected {} columns, found {}",
                line_number,
                expected_columns,
                cols.len()
            );
            self.skipped_lines += 1;
            return;
        }
        let canonical = cols[0];
        for (map, alternate) in self.maps.iter_mut().zip(&cols[1..]) {
            map.insert(alternate, canonical);
        }
    }

    /// Returns the canonical identifier for `alternate_id`
    ///
    /// The lookup maps are scanned in column order, the first map
    /// that contains `alternate_id` determines the result.
    pub fn canonical_id(&self, alternate_id: &str) -> Option<&str> {
        self.maps.iter().find_map(|map| map.get(alternate_id))
    }

    /// Returns the canonical identifier for `alternate_id`, using
    /// only the lookup map of `column`
    pub fn lookup(&self, column: &str, alternate_id: &str) -> Option<&str> {
        self.map(column)?.get(alternate_id)
    }

    /// Returns all identifiers of the `column` type that map to `canonical_id`
    ///
    /// The result is sorted alphabetically.
    pub fn alternate_ids(&self, canonical_id: &str, column: &str) -> Vec<&str> {
        let Some(map) = self.map(column) else {
            return Vec::new();
        };
        let mut ids: Vec<&str> = map
            .iter()
            .filter(|(_, canonical)| *canonical == canonical_id)
            .map(|(alternate, _)| alternate)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the [`LookupMap`] of `column`
    pub fn map(&self, column: &str) -> Option<&LookupMap> {
        self.maps.iter().find(|map| map.name() == column)
    }

    /// Returns all lookup maps in column order
    pub fn maps(&self) -> &[LookupMap] {
        &self.maps
    }

    /// Iterates the names of the alternate identifier columns
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(LookupMap::name)
    }

    /// Returns the number of lookup maps
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Returns `true` if the table does not contain any lookup map
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The number of data lines that were skipped due to a wrong column count
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// All distinct canonical identifiers present in the table
    pub fn canonical_ids(&self) -> HashSet<&str> {
        self.maps
            .iter()
            .flat_map(|map| map.entries.values().map(String::as_str))
            .collect()
    }

    /// Returns the number of identifiers per column, in column order
    pub fn stats(&self) -> Vec<(String, usize)> {
        self.maps
            .iter()
            .map(|map| (map.name().to_string(), map.len()))
            .collect()
    }
}
