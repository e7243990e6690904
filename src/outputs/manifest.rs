use crate::error::AttributionError;
use crate::model::{AttributionDocument, Image, Recipe};
use crate::outputs::Artifact;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const HEADER: [&str; 7] = [
    "recipe_number",
    "recipe_index",
    "image_number",
    "title",
    "source",
    "download_url",
    "filename",
];

static DISALLOWED_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid sanitize regex"));

/// One manifest line: where to fetch an image and what to call it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub recipe_number: u32,
    pub recipe_index: u32,
    pub image_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub filename: String,
}

impl ManifestRow {
    pub fn new(recipe: &Recipe, image: &Image, endpoint: &str) -> Self {
        let title = image.title();
        ManifestRow {
            recipe_number: recipe.recipe_number,
            recipe_index: recipe.index,
            image_number: image.image_number,
            title: title.to_string(),
            source: image.source().to_string(),
            download_url: download_url(endpoint, title),
            filename: manifest_filename(recipe.recipe_number, image.image_number, title),
        }
    }
}

/// Collapses every run of characters outside `[A-Za-z0-9._-]` into one `_`
/// and trims underscores from both ends.
pub fn sanitize_title(title: &str) -> String {
    DISALLOWED_RUN
        .replace_all(title, "_")
        .trim_matches('_')
        .to_string()
}

/// `recipe-003-img-01-Title.jpg`, or `recipe-003-img-01` when nothing of the
/// title survives sanitizing.
pub fn manifest_filename(recipe_number: u32, image_number: u32, title: &str) -> String {
    let safe_title = sanitize_title(title);
    if safe_title.is_empty() {
        format!("recipe-{:03}-img-{:02}", recipe_number, image_number)
    } else {
        format!(
            "recipe-{:03}-img-{:02}-{}",
            recipe_number, image_number, safe_title
        )
    }
}

/// Appends the percent-encoded title to the file-path endpoint. Slashes in the
/// title are kept literal. An empty title has no URL.
pub fn download_url(endpoint: &str, title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let encoded: Vec<_> = title.split('/').map(urlencoding::encode).collect();
    format!("{}/{}", endpoint.trim_end_matches('/'), encoded.join("/"))
}

pub fn build_manifest_rows(document: &AttributionDocument, endpoint: &str) -> Vec<ManifestRow> {
    document
        .images()
        .map(|(recipe, image)| ManifestRow::new(recipe, image, endpoint))
        .collect()
}

/// Reads a manifest written by [`DownloadManifest`]. Columns are matched by
/// header name.
pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRow>, AttributionError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<ManifestRow>, _>>()?;
    Ok(rows)
}

/// CSV manifest consumed by the image fetcher. Every field is quoted.
pub struct DownloadManifest {
    pub endpoint: String,
}

impl DownloadManifest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Artifact for DownloadManifest {
    fn name(&self) -> &'static str {
        "download manifest"
    }

    fn render(&self, document: &AttributionDocument) -> Result<String, AttributionError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        // Written explicitly so an empty document still gets a header row
        writer.write_record(HEADER)?;
        for row in build_manifest_rows(document, &self.endpoint) {
            writer.serialize(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)).into()
        })
    }
}
