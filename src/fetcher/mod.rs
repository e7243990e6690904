//! Downloads every image listed in the manifest, one at a time.

mod request;

pub use self::request::{Download, RequestFetcher};

use crate::config::DownloadConfig;
use crate::error::AttributionError;
use crate::outputs::{read_manifest, ManifestRow};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::sleep;

/// Counts for one pass over the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// `.jpg` for `Mint.jpg`; the fallback when the title has no extension.
pub fn file_extension(title: &str, fallback: &str) -> String {
    match Path::new(title).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => fallback.to_string(),
    }
}

/// Where a row ends up on disk, or `None` when it has nothing to fetch.
pub fn destination(row: &ManifestRow, dest_dir: &Path, fallback_ext: &str) -> Option<PathBuf> {
    if row.download_url.is_empty() || row.filename.is_empty() {
        return None;
    }
    let ext = file_extension(&row.title, fallback_ext);
    Some(dest_dir.join(format!("{}{}", row.filename, ext)))
}

/// Reads the manifest at `manifest` and downloads each image into `dest_dir`.
///
/// Existing files are left alone. Per-image failures are logged and counted;
/// only an unreadable manifest or an unusable destination is fatal.
pub fn fetch_images(
    manifest: &Path,
    dest_dir: &Path,
    config: &DownloadConfig,
) -> Result<FetchReport, AttributionError> {
    let rows = read_manifest(manifest)?;
    fs::create_dir_all(dest_dir).map_err(|e| AttributionError::io(dest_dir, e))?;

    let fetcher = RequestFetcher::new(config)?;
    let mut report = FetchReport::default();

    for row in &rows {
        let Some(out_path) = destination(row, dest_dir, &config.default_extension) else {
            info!("Skipping (missing url/filename): {}", row.title);
            report.skipped += 1;
            continue;
        };

        if out_path.exists() {
            info!("Exists, skipping: {}", out_path.display());
            report.skipped += 1;
            continue;
        }

        info!("Downloading: {} -> {}", row.download_url, out_path.display());
        match fetcher.fetch(&row.download_url) {
            Download::Body(body) => {
                if let Err(e) = fs::write(&out_path, body) {
                    error!("Failed: {} ({})", out_path.display(), e);
                    report.failed += 1;
                    continue;
                }
                report.downloaded += 1;
                sleep(config.base_delay());
            }
            Download::GaveUp { attempts } => {
                warn!(
                    "Failed: {} (still throttled after {} attempts)",
                    row.download_url, attempts
                );
                report.failed += 1;
            }
            Download::Failed(reason) => {
                error!("Failed: {} ({})", row.download_url, reason);
                report.failed += 1;
            }
        }
    }

    info!(
        "Fetched {} images ({} skipped, {} failed)",
        report.downloaded, report.skipped, report.failed
    );
    Ok(report)
}
