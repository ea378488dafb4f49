use super::domain::RawAreaEntry;
use super::resolver::normalize_key;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// A named row of the area dataset, kept in file order.
#[derive(Debug, Clone)]
pub struct AreaEntry {
    pub authority: String,
    pub(crate) key: String,
    pub raw: RawAreaEntry,
}

/// Local-authority coverage dataset, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AreaDataset {
    entries: Vec<AreaEntry>,
    index: HashMap<String, usize>,
}

impl AreaDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the dataset, degrading to an empty one when the file is missing or
    /// unreadable. Coverage is optional enrichment, never a startup blocker.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "area dataset unavailable; continuing without coverage data"
                );
                return Self::empty();
            }
        };

        match Self::from_reader(file) {
            Ok(dataset) => {
                debug!(path = %path.display(), authorities = dataset.len(), "area dataset loaded");
                dataset
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "area dataset is not valid JSON; continuing without coverage data"
                );
                Self::empty()
            }
        }
    }

    /// Parses a JSON object mapping authority names to rows. Rows that do not
    /// decode are skipped individually.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let document: Map<String, Value> = serde_json::from_reader(reader)?;
        let rows = document.into_iter().filter_map(|(authority, value)| {
            if value.is_null() {
                return Some((authority, RawAreaEntry::Empty));
            }
            match serde_json::from_value::<RawAreaEntry>(value) {
                Ok(raw) => Some((authority, raw)),
                Err(err) => {
                    warn!(%authority, %err, "skipping malformed area row");
                    None
                }
            }
        });

        Ok(Self::from_entries(rows))
    }

    pub fn from_entries<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, RawAreaEntry)>,
        S: Into<String>,
    {
        let mut dataset = Self::default();
        for (authority, raw) in rows {
            let authority = authority.into();
            let key = normalize_key(&authority);
            if key.is_empty() {
                continue;
            }
            dataset
                .index
                .entry(key.clone())
                .or_insert(dataset.entries.len());
            dataset.entries.push(AreaEntry {
                authority,
                key,
                raw,
            });
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AreaEntry] {
        &self.entries
    }

    pub(crate) fn exact(&self, key: &str) -> Option<&AreaEntry> {
        self.index.get(key).map(|position| &self.entries[*position])
    }
}
