//! Static correction table for slugs that diverge from the metadata source.
//!
//! Release groups and index sites name titles differently from the metadata
//! source. The table maps an observed slug to the canonical one, partitioned
//! by category since the same observed slug can diverge differently for
//! movies and shows.

mod builtin;

use std::collections::HashMap;
use std::path::Path;

use crate::errors::ScrapeError;
use crate::types::{CanonicalId, Category};

/// Read-only mapping from observed slug to canonical slug, per category.
///
/// Built once at startup and shared across resolution tasks without locking.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    partitions: HashMap<Category, HashMap<String, String>>,
}

impl CorrectionTable {
    /// Creates an empty table; every lookup falls back to identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the built-in correction dataset.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (observed, canonical) in builtin::MOVIE_CORRECTIONS {
            table.insert(Category::Movie, *observed, *canonical);
        }
        for (observed, canonical) in builtin::SHOW_CORRECTIONS {
            table.insert(Category::Show, *observed, *canonical);
        }
        table
    }

    /// Adds an entry, replacing any previous mapping for the same key.
    pub fn insert(
        &mut self,
        category: Category,
        observed: impl Into<String>,
        canonical: impl Into<String>,
    ) {
        self.partitions
            .entry(category)
            .or_default()
            .insert(observed.into(), canonical.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_entry(
        mut self,
        category: Category,
        observed: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.insert(category, observed, canonical);
        self
    }

    /// Maps a slug guess to its canonical identifier.
    ///
    /// Returns the mapped value when `slug` is a key under `category`,
    /// otherwise the slug unchanged.
    pub fn correct(&self, category: Category, slug: &str) -> CanonicalId {
        let corrected = self
            .partitions
            .get(&category)
            .and_then(|partition| partition.get(slug))
            .map_or(slug, String::as_str);

        CanonicalId::new(corrected)
    }

    /// Number of entries in one category's partition.
    pub fn len(&self, category: Category) -> usize {
        self.partitions.get(&category).map_or(0, HashMap::len)
    }

    /// Returns true when no partition holds any entry.
    pub fn is_empty(&self) -> bool {
        self.partitions.values().all(HashMap::is_empty)
    }

    /// Layers entries from a JSON document over the table.
    ///
    /// The document has the shape `{ "movie": { observed: canonical }, "show": { .. } }`;
    /// either partition may be omitted. Returns the number of entries applied.
    ///
    /// # Errors
    /// - `ScrapeError::ParseError` - Document is not a category-keyed map of strings
    pub fn merge_json(&mut self, json: &str) -> Result<usize, ScrapeError> {
        let overrides: HashMap<Category, HashMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| ScrapeError::ParseError {
                reason: format!("Invalid correction overrides: {e}"),
            })?;

        let mut applied = 0;
        for (category, entries) in overrides {
            for (observed, canonical) in entries {
                self.insert(category, observed, canonical);
                applied += 1;
            }
        }

        Ok(applied)
    }

    /// Reads a JSON override file and layers it over the table.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - File could not be read
    /// - `ScrapeError::ParseError` - File contents are not valid overrides
    pub fn load_overrides(&mut self, path: &Path) -> Result<usize, ScrapeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScrapeError::Configuration {
            reason: format!("Cannot read corrections file {}: {e}", path.display()),
        })?;

        let applied = self.merge_json(&contents)?;
        tracing::debug!(
            "Loaded {} slug corrections from {}",
            applied,
            path.display()
        );
        Ok(applied)
    }
}
