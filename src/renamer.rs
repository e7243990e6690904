//! Renames downloaded images from the manifest convention
//! (`recipe-003-img-02-Title.jpg`) to their short form (`3-2.jpg`).

use crate::error::AttributionError;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static DOWNLOADED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^recipe-(\d+)-img-(\d+)-.+\.(\w+)$").expect("valid download name regex")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: usize,
    pub skipped: usize,
}

/// Short name for a downloaded file, or `None` when the name does not follow
/// the manifest convention.
///
/// The first image of a recipe becomes `{recipe}.{ext}`, the others
/// `{recipe}-{image}.{ext}`.
pub fn canonical_name(file_name: &str) -> Option<String> {
    let caps = DOWNLOADED_NAME.captures(file_name)?;
    let recipe_number: u64 = caps.get(1)?.as_str().parse().ok()?;
    let image_number: u64 = caps.get(2)?.as_str().parse().ok()?;
    let ext = caps.get(3)?.as_str();

    if image_number == 1 {
        Some(format!("{}.{}", recipe_number, ext))
    } else {
        Some(format!("{}-{}.{}", recipe_number, image_number, ext))
    }
}

/// Renames every matching regular file in `dir`. A rename whose target already
/// exists is skipped, never overwritten.
pub fn rename_images(dir: &Path) -> Result<RenameReport, AttributionError> {
    let entries = fs::read_dir(dir).map_err(|e| AttributionError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AttributionError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut report = RenameReport::default();
    for path in files {
        let Some(new_name) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(canonical_name)
        else {
            continue;
        };

        let new_path = path.with_file_name(&new_name);
        if new_path.exists() {
            info!("Skipping (exists): {}", new_name);
            report.skipped += 1;
            continue;
        }

        info!("Renaming: {} -> {}", path.display(), new_name);
        fs::rename(&path, &new_path).map_err(|e| AttributionError::io(&path, e))?;
        report.renamed += 1;
    }

    Ok(report)
}
