use std::path::PathBuf;

use crate::extract::{
    extract_attributions, render_artifacts, write_outputs, ExtractOptions, ExtractionReport,
};
use crate::model::AttributionDocument;
use crate::parser::parse_document;
use crate::AttributionError;

/// Represents where the attribution document comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Read the document from a file
    File(PathBuf),
    /// Use document text already in memory
    Text(String),
}

/// Represents what to do with the rendered artifacts
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputMode {
    /// Write the four artifacts into the output directory (default)
    #[default]
    Write,
    /// Keep everything in memory
    InMemory,
}

/// Result of an extraction run
#[derive(Debug, Clone)]
pub enum ExtractResult {
    /// Artifacts were written to disk
    Written(ExtractionReport),
    /// Parsed document plus `(file name, contents)` for each artifact
    Rendered {
        document: AttributionDocument,
        artifacts: Vec<(String, String)>,
    },
}

/// Builder for configuring and running an attribution extraction
#[derive(Debug, Default)]
pub struct AttributionExtractorBuilder {
    source: Option<InputSource>,
    mode: OutputMode,
    output_dir: Option<PathBuf>,
    source_name: Option<String>,
    endpoint: Option<String>,
}

impl AttributionExtractorBuilder {
    /// Read the attribution document from a file
    ///
    /// # Example
    /// ```
    /// use herb_attributions::AttributionExtractor;
    ///
    /// let builder = AttributionExtractor::builder()
    ///     .file("assets/herbs/image-attributions.md");
    /// ```
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::File(path.into()));
        self
    }

    /// Use document text that is already in memory
    ///
    /// # Example
    /// ```
    /// use herb_attributions::AttributionExtractor;
    ///
    /// let builder = AttributionExtractor::builder()
    ///     .text("## Recipe 1 (index 1) — Mint Tea\n### Image 1\n- Title: Mint.jpg\n");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Directory the artifacts are written to
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Keep the rendered artifacts in memory instead of writing them
    pub fn in_memory(mut self) -> Self {
        self.mode = OutputMode::InMemory;
        self
    }

    /// Name quoted in the provenance lines of the markdown outputs
    ///
    /// Defaults to the file name of the source, or `image-attributions.md`
    /// for text input.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// File-path endpoint used for manifest download URLs
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build and execute the extraction
    ///
    /// # Errors
    /// Returns `AttributionError` if:
    /// - No input source was specified
    /// - Write mode was requested without an output directory
    /// - The source file cannot be read or an artifact cannot be written
    ///
    /// # Example
    /// ```
    /// use herb_attributions::{AttributionExtractor, ExtractResult};
    ///
    /// let result = AttributionExtractor::builder()
    ///     .text("## Recipe 1 (index 1) — Mint Tea\n### Image 1\n- Title: Mint.jpg\n")
    ///     .in_memory()
    ///     .build()
    ///     .unwrap();
    ///
    /// if let ExtractResult::Rendered { document, artifacts } = result {
    ///     assert_eq!(document.recipes.len(), 1);
    ///     assert_eq!(artifacts.len(), 4);
    /// }
    /// ```
    pub fn build(self) -> Result<ExtractResult, AttributionError> {
        let source = self.source.ok_or_else(|| {
            AttributionError::BuilderError(
                "No input source specified. Use .file() or .text()".to_string(),
            )
        })?;

        let output_dir = match (self.mode, self.output_dir) {
            (OutputMode::Write, None) => {
                return Err(AttributionError::BuilderError(
                    "No output directory specified. Use .output_dir() or .in_memory()".to_string(),
                ))
            }
            (_, dir) => dir.unwrap_or_default(),
        };

        let source_path = match (&source, self.source_name) {
            (_, Some(name)) => PathBuf::from(name),
            (InputSource::File(path), None) => path.clone(),
            (InputSource::Text(_), None) => PathBuf::from("image-attributions.md"),
        };

        let mut options = ExtractOptions::new(source_path, output_dir);
        if let Some(endpoint) = self.endpoint {
            options.endpoint = endpoint;
        }

        match (source, self.mode) {
            // The options carry the real path unless a display name overrides it
            (InputSource::File(path), OutputMode::Write) if path == options.source => {
                Ok(ExtractResult::Written(extract_attributions(&options)?))
            }
            (InputSource::File(path), mode) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| AttributionError::io(&path, e))?;
                finish(parse_document(&text), &options, mode)
            }
            (InputSource::Text(text), mode) => finish(parse_document(&text), &options, mode),
        }
    }
}

fn finish(
    document: AttributionDocument,
    options: &ExtractOptions,
    mode: OutputMode,
) -> Result<ExtractResult, AttributionError> {
    match mode {
        OutputMode::Write => Ok(ExtractResult::Written(write_outputs(&document, options)?)),
        OutputMode::InMemory => {
            let artifacts = render_artifacts(&document, options)?;
            Ok(ExtractResult::Rendered {
                document,
                artifacts,
            })
        }
    }
}

/// Main entry point for the builder API
pub struct AttributionExtractor;

impl AttributionExtractor {
    /// Creates a new builder for extracting attributions
    ///
    /// # Example
    /// ```
    /// use herb_attributions::AttributionExtractor;
    ///
    /// let builder = AttributionExtractor::builder();
    /// ```
    pub fn builder() -> AttributionExtractorBuilder {
        AttributionExtractorBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_source() {
        let err = AttributionExtractor::builder()
            .in_memory()
            .build()
            .unwrap_err();
        assert!(matches!(err, AttributionError::BuilderError(_)));
    }

    #[test]
    fn test_write_requires_output_dir() {
        let err = AttributionExtractor::builder()
            .text("## Recipe 1 (index 1) — Mint")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("No output directory"));
    }

    #[test]
    fn test_text_in_memory_uses_default_source_name() {
        let result = AttributionExtractor::builder()
            .text("")
            .in_memory()
            .build()
            .unwrap();

        match result {
            ExtractResult::Rendered { artifacts, .. } => {
                let (_, compact) = &artifacts[1];
                assert!(compact.contains("Source: image-attributions.md"));
            }
            other => panic!("expected in-memory result, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_endpoint_and_source_name() {
        let result = AttributionExtractor::builder()
            .text("## Recipe 2 (index 3) — Mint\n### Image 1\n- Title: Mint leaf.jpg")
            .source_name("herbs.md")
            .endpoint("http://localhost:8080/files")
            .in_memory()
            .build()
            .unwrap();

        let ExtractResult::Rendered { artifacts, .. } = result else {
            panic!("expected in-memory result");
        };
        assert!(artifacts[2].1.contains("Unique licenses referenced in herbs.md:"));
        assert!(artifacts[3].1.contains("http://localhost:8080/files/Mint%20leaf.jpg"));
    }
}
