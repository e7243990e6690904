use crate::config::{AppConfig, OutputsConfig};
use crate::error::AttributionError;
use crate::model::AttributionDocument;
use crate::outputs::{Artifact, CompactListing, DownloadManifest, JsonDump, LicenseSummaryWriter};
use crate::parser::parse_document;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the extractor needs to know about where to read and write.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub outputs: OutputsConfig,
    /// File-path endpoint used to build manifest download URLs
    pub endpoint: String,
}

impl ExtractOptions {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            outputs: OutputsConfig::default(),
            endpoint: crate::config::default_endpoint(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            source: config.paths.source.clone(),
            output_dir: config.paths.output_dir.clone(),
            outputs: config.outputs.clone(),
            endpoint: config.download.endpoint.clone(),
        }
    }

    /// File name of the source document, as quoted inside the markdown outputs.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// What a single extraction run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub written: Vec<PathBuf>,
    pub recipes: usize,
    pub images: usize,
}

/// Renders all four artifacts as `(file name, contents)` pairs.
///
/// Nothing touches the filesystem here, so a failure leaves no partial output.
pub fn render_artifacts(
    document: &AttributionDocument,
    options: &ExtractOptions,
) -> Result<Vec<(String, String)>, AttributionError> {
    let source_name = options.source_name();
    let artifacts: [(&str, Box<dyn Artifact>); 4] = [
        (options.outputs.json.as_str(), Box::new(JsonDump)),
        (
            options.outputs.compact.as_str(),
            Box::new(CompactListing::new(source_name.as_str())),
        ),
        (
            options.outputs.licenses.as_str(),
            Box::new(LicenseSummaryWriter::new(source_name.as_str())),
        ),
        (
            options.outputs.manifest.as_str(),
            Box::new(DownloadManifest::new(options.endpoint.as_str())),
        ),
    ];

    let mut rendered = Vec::with_capacity(artifacts.len());
    for (file_name, artifact) in artifacts {
        debug!("Rendering {} into {}", artifact.name(), file_name);
        rendered.push((file_name.to_string(), artifact.render(document)?));
    }
    Ok(rendered)
}

/// Reads the attribution document, parses it and writes the four artifacts.
pub fn extract_attributions(
    options: &ExtractOptions,
) -> Result<ExtractionReport, AttributionError> {
    let text = fs::read_to_string(&options.source)
        .map_err(|e| AttributionError::io(&options.source, e))?;
    write_outputs(&parse_document(&text), options)
}

/// Renders an already parsed document and writes the artifacts into
/// `options.output_dir`, creating it when missing.
pub fn write_outputs(
    document: &AttributionDocument,
    options: &ExtractOptions,
) -> Result<ExtractionReport, AttributionError> {
    let rendered = render_artifacts(document, options)?;

    write_artifacts(&options.output_dir, rendered).map(|written| ExtractionReport {
        written,
        recipes: document.recipes.len(),
        images: document.image_count(),
    })
}

fn write_artifacts(
    output_dir: &Path,
    rendered: Vec<(String, String)>,
) -> Result<Vec<PathBuf>, AttributionError> {
    fs::create_dir_all(output_dir).map_err(|e| AttributionError::io(output_dir, e))?;

    let mut written = Vec::with_capacity(rendered.len());
    for (file_name, contents) in rendered {
        let path = output_dir.join(file_name);
        fs::write(&path, contents).map_err(|e| AttributionError::io(&path, e))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
