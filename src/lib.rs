pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod model;
pub mod outputs;
pub mod parser;
pub mod renamer;
pub mod retry;

// Re-export commonly used types
pub use builder::{AttributionExtractor, AttributionExtractorBuilder, ExtractResult};
pub use config::{AppConfig, DownloadConfig};
pub use error::AttributionError;
pub use extract::{extract_attributions, ExtractOptions, ExtractionReport};
pub use fetcher::{fetch_images, FetchReport};
pub use model::{AttributionDocument, Image, Recipe};
pub use parser::parse_document;
pub use renamer::{rename_images, RenameReport};
