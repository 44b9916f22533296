//! Builds the downloadable ZIP for an artifact.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::artifact::GeneratedArtifact;

pub const ARCHIVE_NAME: &str = "portfolio.zip";

/// Packs `index.html`, plus `styles.css` / `script.js` when they were
/// extracted from the document. A site with everything inline ships as a
/// single HTML file.
pub fn package_artifact(artifact: &GeneratedArtifact) -> Result<Vec<u8>> {
    let mut files = vec![("index.html", artifact.html())];
    if artifact.has_separate_css() {
        files.push(("styles.css", artifact.css()));
    }
    if artifact.has_separate_js() {
        files.push(("script.js", artifact.js()));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, contents) in files {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {name} to archive"))?;
        zip.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {name}"))?;
    }

    let cursor = zip.finish().context("Failed to finalize archive")?;
    Ok(cursor.into_inner())
}
