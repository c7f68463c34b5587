//! Image resolution: copy step screenshots next to the generated pages.
//!
//! Exported pages reference their screenshots with percent-encoded relative
//! paths (`images%2Fshot1.png`), while the files themselves sit beside the
//! page. A local reference is decoded, reduced to its basename, looked up in
//! the page's folder, and copied into the shared images folder. External
//! references are left alone.

use crate::error::ConvertError;
use percent_encoding::percent_decode_str;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefixes of references that point outside the export.
const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "//"];

/// What happened to one step's image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// External URL, passed through unchanged.
    External(String),
    /// Local file copied into the images folder.
    Copied {
        /// New reference relative to the output page, e.g. `images/shot1.png`.
        reference: String,
        /// Where the file was copied from.
        source: PathBuf,
        /// Where the file now lives.
        destination: PathBuf,
    },
    /// Local file that does not exist; the step loses its image.
    Missing { source: PathBuf },
}

impl ResolvedImage {
    /// The reference to emit in the rendered page, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            ResolvedImage::External(url) => Some(url),
            ResolvedImage::Copied { reference, .. } => Some(reference),
            ResolvedImage::Missing { .. } => None,
        }
    }
}

/// Check if the reference points to a network location.
pub fn is_external(reference: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|p| reference.starts_with(p))
}

/// Percent-decode `reference` and keep only its final path segment.
///
/// Both `/` and `\` count as separators since exports produced on Windows
/// use either.
pub fn local_basename(reference: &str) -> String {
    let decoded = percent_decode_str(reference).decode_utf8_lossy();
    decoded
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Resolve one step image.
///
/// * `source_dir` — folder of the page that references the image
/// * `images_dir` — output images folder (must already exist)
/// * `images_dir_name` — prefix for the rewritten reference
///
/// A missing source file is reported as [`ResolvedImage::Missing`] after a
/// warning; only a failing copy of an existing file is an error.
pub fn resolve_image(
    reference: &str,
    source_dir: &Path,
    images_dir: &Path,
    images_dir_name: &str,
) -> Result<ResolvedImage, ConvertError> {
    if is_external(reference) {
        debug!("Keeping external image {}", reference);
        return Ok(ResolvedImage::External(reference.to_string()));
    }

    let basename = local_basename(reference);
    let source = source_dir.join(&basename);

    if basename.is_empty() || !source.is_file() {
        warn!("Image not found: {}", source.display());
        return Ok(ResolvedImage::Missing { source });
    }

    let destination = images_dir.join(&basename);
    copy_with_mtime(&source, &destination)?;
    debug!("Copied {} -> {}", source.display(), destination.display());

    Ok(ResolvedImage::Copied {
        reference: format!("{images_dir_name}/{basename}"),
        source,
        destination,
    })
}

/// Copy `from` over `to`, then carry the modification time across.
///
/// `fs::copy` already keeps permission bits; the timestamp is best effort.
fn copy_with_mtime(from: &Path, to: &Path) -> Result<(), ConvertError> {
    fs::copy(from, to).map_err(|source| ConvertError::ImageCopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    let modified = fs::metadata(from).and_then(|m| m.modified());
    let applied = modified.and_then(|time| {
        File::options()
            .write(true)
            .open(to)
            .and_then(|f| f.set_modified(time))
    });
    if let Err(e) = applied {
        debug!("Could not preserve mtime of {}: {}", to.display(), e);
    }
    Ok(())
}
