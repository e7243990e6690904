use herb_attributions::outputs::{Artifact, DownloadManifest};
use herb_attributions::{fetch_images, parse_document, DownloadConfig, FetchReport};
use std::fs;
use std::path::{Path, PathBuf};

fn test_config() -> DownloadConfig {
    DownloadConfig {
        max_attempts: 3,
        base_delay_ms: 1,
        timeout_secs: 5,
        ..DownloadConfig::default()
    }
}

/// Writes a manifest whose download URLs point at the mock server.
fn write_manifest(dir: &Path, endpoint: &str, document: &str) -> PathBuf {
    let csv = DownloadManifest::new(endpoint)
        .render(&parse_document(document))
        .unwrap();
    let path = dir.join("image-download-manifest.csv");
    fs::write(&path, csv).unwrap();
    path
}

const TWO_IMAGES: &str = "## Recipe 3 (index 7) — Dried Mugwort
### Image 1
- Title: Artemisia.jpg
### Image 2
- Title: Mugwort leaves
";

#[test]
fn test_downloads_every_row() {
    let mut server = mockito::Server::new();
    let first = server
        .mock("GET", "/files/Artemisia.jpg")
        .match_header("user-agent", "ApothecaryRecipesAttributionBot/1.0")
        .with_status(200)
        .with_body("jpeg bytes")
        .expect(1)
        .create();
    let second = server
        .mock("GET", "/files/Mugwort%20leaves")
        .with_status(200)
        .with_body("more bytes")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), &format!("{}/files", server.url()), TWO_IMAGES);
    let dest = dir.path().join("images");

    let report = fetch_images(&manifest, &dest, &test_config()).unwrap();

    first.assert();
    second.assert();
    assert_eq!(
        report,
        FetchReport {
            downloaded: 2,
            skipped: 0,
            failed: 0
        }
    );
    assert_eq!(
        fs::read_to_string(dest.join("recipe-003-img-01-Artemisia.jpg.jpg")).unwrap(),
        "jpeg bytes"
    );
    // No extension in the title falls back to the default
    assert_eq!(
        fs::read_to_string(dest.join("recipe-003-img-02-Mugwort_leaves.jpg")).unwrap(),
        "more bytes"
    );
}

#[test]
fn test_retries_when_throttled() {
    let mut server = mockito::Server::new();
    let throttled = server
        .mock("GET", "/files/Artemisia.jpg")
        .with_status(429)
        .expect(1)
        .create();
    let ok = server
        .mock("GET", "/files/Artemisia.jpg")
        .with_status(200)
        .with_body("finally")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!("{}/files", server.url()),
        "## Recipe 3 (index 7) — Dried Mugwort\n### Image 1\n- Title: Artemisia.jpg\n",
    );

    let report = fetch_images(&manifest, dir.path(), &test_config()).unwrap();

    throttled.assert();
    ok.assert();
    assert_eq!(report.downloaded, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("recipe-003-img-01-Artemisia.jpg.jpg")).unwrap(),
        "finally"
    );
}

#[test]
fn test_gives_up_after_max_attempts() {
    let mut server = mockito::Server::new();
    let forbidden = server
        .mock("GET", "/files/Artemisia.jpg")
        .with_status(403)
        .expect(3)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!("{}/files", server.url()),
        "## Recipe 3 (index 7) — Dried Mugwort\n### Image 1\n- Title: Artemisia.jpg\n",
    );

    let report = fetch_images(&manifest, dir.path(), &test_config()).unwrap();

    forbidden.assert();
    assert_eq!(report.failed, 1);
    assert!(!dir.path().join("recipe-003-img-01-Artemisia.jpg.jpg").exists());
}

#[test]
fn test_other_errors_are_not_retried() {
    let mut server = mockito::Server::new();
    let missing = server
        .mock("GET", "/files/Artemisia.jpg")
        .with_status(404)
        .expect(1)
        .create();
    let next = server
        .mock("GET", "/files/Mugwort%20leaves")
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), &format!("{}/files", server.url()), TWO_IMAGES);

    let report = fetch_images(&manifest, dir.path(), &test_config()).unwrap();

    missing.assert();
    next.assert();
    assert_eq!(report.failed, 1);
    assert_eq!(report.downloaded, 1);
}

#[test]
fn test_skips_existing_and_untitled() {
    let mut server = mockito::Server::new();
    let never = server
        .mock("GET", "/files/Artemisia.jpg")
        .with_status(200)
        .expect(0)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        &format!("{}/files", server.url()),
        "## Recipe 3 (index 7) — Dried Mugwort\n### Image 1\n- Title: Artemisia.jpg\n### Image 2\n- Creator: Nobody\n",
    );
    let existing = dir.path().join("recipe-003-img-01-Artemisia.jpg.jpg");
    fs::write(&existing, "already here").unwrap();

    let report = fetch_images(&manifest, dir.path(), &test_config()).unwrap();

    never.assert();
    assert_eq!(report.skipped, 2);
    assert_eq!(report.downloaded, 0);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "already here");
}

#[test]
fn test_missing_manifest_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = fetch_images(&dir.path().join("nope.csv"), dir.path(), &test_config());
    assert!(result.is_err());
}

#[test]
fn test_write_failure_does_not_stop_the_batch() {
    let long_title = format!("{}.jpg", "a".repeat(300));
    let document = format!(
        "## Recipe 3 (index 7) — Dried Mugwort\n### Image 1\n- Title: {}\n### Image 2\n- Title: Mint.jpg\n",
        long_title
    );

    let mut server = mockito::Server::new();
    let too_long = server
        .mock("GET", format!("/files/{}", long_title).as_str())
        .with_status(200)
        .with_body("unwritable")
        .expect(1)
        .create();
    let mint = server
        .mock("GET", "/files/Mint.jpg")
        .with_status(200)
        .with_body("mint bytes")
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), &format!("{}/files", server.url()), &document);

    let report = fetch_images(&manifest, dir.path(), &test_config()).unwrap();

    too_long.assert();
    mint.assert();
    assert_eq!(report.failed, 1);
    assert_eq!(report.downloaded, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("recipe-003-img-02-Mint.jpg.jpg")).unwrap(),
        "mint bytes"
    );
}
