//! Input resolution: the template text and the `.html` pages under the
//! input root.
//!
//! The walk is lazy and follows the filesystem's own order; nothing is
//! sorted. Existence of the root is checked up front so a typo in the path
//! fails before any output is produced.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension (with dot) of the pages picked up by the walk.
const HTML_SUFFIX: &str = ".html";

/// Read the template's source text once for the whole run.
pub fn load_template(path: &Path) -> Result<String, ConvertError> {
    if !path.is_file() {
        return Err(ConvertError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConvertError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded template {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

/// Read one input page.
pub fn read_page(path: &Path) -> Result<String, ConvertError> {
    std::fs::read_to_string(path).map_err(|source| ConvertError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Enumerate every `.html` file below `root`, recursively.
///
/// Returns `InputNotFound` immediately when `root` is not a directory.
/// Errors met during the walk are yielded as `WalkFailed` items; the walk
/// continues past them.
pub fn walk_html_files(
    root: &Path,
) -> Result<impl Iterator<Item = Result<PathBuf, ConvertError>>, ConvertError> {
    if !root.is_dir() {
        return Err(ConvertError::InputNotFound {
            path: root.to_path_buf(),
        });
    }

    let root_buf = root.to_path_buf();
    let iter = WalkDir::new(root)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() && is_html(entry.path()) => {
                debug!("Found page {}", entry.path().display());
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_buf.clone());
                Some(Err(ConvertError::WalkFailed { path, source }))
            }
        });

    Ok(iter)
}

fn is_html(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(HTML_SUFFIX))
}

/// Filename without its final extension, used as the fallback title and
/// for the flat variant's output name.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
