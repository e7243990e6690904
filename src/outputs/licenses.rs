use crate::error::AttributionError;
use crate::model::AttributionDocument;
use crate::outputs::Artifact;
use std::collections::{BTreeMap, HashMap};

/// Images sharing one exact (license name, license URL) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    pub name: String,
    pub url: String,
    pub count: usize,
}

/// Distinct license pairs across every image.
///
/// Grouping is always by the full pair: one name with two URLs yields two
/// entries.
#[derive(Debug, Clone, Default)]
pub struct LicenseSummary {
    /// Sorted by name; equal names keep first-encounter order
    pub entries: Vec<LicenseEntry>,
    /// Last non-empty URL seen for each non-empty license name
    urls_by_name: BTreeMap<String, String>,
}

impl LicenseSummary {
    pub fn from_document(document: &AttributionDocument) -> Self {
        let mut entries: Vec<LicenseEntry> = Vec::new();
        let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
        let mut urls_by_name = BTreeMap::new();

        for (_, image) in document.images() {
            let key = (image.license(), image.license_url());
            match positions.get(&key) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    positions.insert(key, entries.len());
                    entries.push(LicenseEntry {
                        name: key.0.to_string(),
                        url: key.1.to_string(),
                        count: 1,
                    });
                }
            }

            if !key.0.is_empty() && !key.1.is_empty() {
                urls_by_name.insert(key.0.to_string(), key.1.to_string());
            }
        }

        // Stable, so pairs sharing a name stay in the order they were found
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        LicenseSummary {
            entries,
            urls_by_name,
        }
    }

    /// The most recently seen URL for a license name. Lookup only.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.urls_by_name.get(name).map(String::as_str)
    }
}

/// Renders the license summary markdown.
pub struct LicenseSummaryWriter {
    pub source_name: String,
}

impl LicenseSummaryWriter {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

impl Artifact for LicenseSummaryWriter {
    fn name(&self) -> &'static str {
        "license summary"
    }

    fn render(&self, document: &AttributionDocument) -> Result<String, AttributionError> {
        let summary = LicenseSummary::from_document(document);

        let mut lines = vec![
            "# License summary".to_string(),
            String::new(),
            format!("Unique licenses referenced in {}:", self.source_name),
            String::new(),
        ];
        lines.extend(
            summary
                .entries
                .iter()
                .map(|entry| {
                    format!("- {} — {} (images: {})", entry.name, entry.url, entry.count)
                }),
        );

        Ok(lines.join("\n") + "\n")
    }
}
