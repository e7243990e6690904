use crate::error::AttributionError;
use crate::model::AttributionDocument;

mod compact;
mod json;
mod licenses;
mod manifest;

pub use self::compact::CompactListing;
pub use self::json::JsonDump;
pub use self::licenses::{LicenseEntry, LicenseSummary, LicenseSummaryWriter};
pub use self::manifest::{
    build_manifest_rows, download_url, manifest_filename, read_manifest, sanitize_title,
    DownloadManifest, ManifestRow,
};

/// A derived artifact rendered fully in memory from the parsed document.
pub trait Artifact {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;
    fn render(&self, document: &AttributionDocument) -> Result<String, AttributionError>;
}
