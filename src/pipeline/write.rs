//! Output naming and writing.
//!
//! Files are written to a temp file in the destination folder and then
//! renamed over the target, so an interrupted run never leaves a truncated
//! page. An existing file with the same name is replaced.

use crate::config::TemplateVariant;
use crate::error::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename prefix of the flat variant.
pub const FLAT_PREFIX: &str = "Submodule_";

/// Replace every character other than letters, digits, space, `-` and `_`
/// with `_`, then trim surrounding whitespace.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Output filename for a page.
///
/// * Accordion: `<sanitized title>.html`
/// * Flat: `Submodule_<input stem>.html`
pub fn output_filename(variant: TemplateVariant, title: &str, source_stem: &str) -> String {
    match variant {
        TemplateVariant::Accordion => format!("{}.html", sanitize_title(title)),
        TemplateVariant::Flat => format!("{FLAT_PREFIX}{source_stem}.html"),
    }
}

/// Create `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), ConvertError> {
    fs::create_dir_all(dir).map_err(|source| ConvertError::CreateDirFailed {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `contents` to `dir/filename`, replacing any existing file.
///
/// The page is first written to `<filename>.tmp` beside the target, so it
/// gets the same permissions as any other file created in `dir`.
pub fn write_output(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf, ConvertError> {
    let path = dir.join(filename);
    let tmp_path = dir.join(format!("{filename}.tmp"));
    let write_failed = |source: std::io::Error| ConvertError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    fs::write(&tmp_path, contents).map_err(write_failed)?;
    if let Err(source) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_failed(source));
    }

    Ok(path)
}
