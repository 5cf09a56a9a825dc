use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;

use serde::Deserialize;

/// Display metadata for one guide, maintained next to the configuration
/// rather than inside the guide's markdown file. The file supplies the
/// long-form body; this entry supplies what list views show.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GuideSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The curated table of guides. A guide file with no entry here is not
/// served, and entries keep the order they were authored in.
#[derive(Default)]
pub struct GuideRegistry {
    entries: Vec<GuideSummary>,
    index: HashMap<String, usize>,
}

impl GuideRegistry {
    pub fn new() -> GuideRegistry {
        GuideRegistry::default()
    }

    pub fn from_entries(entries: Vec<GuideSummary>) -> io::Result<GuideRegistry> {
        let mut index = HashMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.slug.clone(), pos).is_some() {
                return Err(io::Error::new(
                    ErrorKind::InvalidData, format!("Duplicated guide slug: {}", entry.slug)));
            }
        }

        Ok(GuideRegistry { entries, index })
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    pub fn get(&self, slug: &str) -> Option<&GuideSummary> {
        self.index.get(slug).map(|pos| &self.entries[*pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GuideSummary> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
