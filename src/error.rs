//! Error types for the html2submodule library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — **Fatal**: the run cannot proceed (missing template,
//!   missing input folder, an output file that cannot be written). Returned
//!   as `Err(ConvertError)` from [`crate::convert::convert_folder`].
//!
//! * [`PageWarning`] — **Non-fatal**: something on a single page was
//!   skipped (a screenshot that does not exist next to the page). Stored
//!   inside [`crate::output::PageResult`]; the page is still written.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the html2submodule library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input root folder does not exist.
    #[error("Input folder not found: '{path}'\nCheck the path exists and is a directory.")]
    InputNotFound { path: PathBuf },

    /// The template file does not exist.
    #[error("Template not found: '{path}'")]
    TemplateNotFound { path: PathBuf },

    /// A file could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk hit an I/O error below the input root.
    #[error("Failed to walk '{path}': {source}")]
    WalkFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create an output directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output page.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The screenshot exists but copying it into the images folder failed.
    #[error("Failed to copy image '{from}' to '{to}': {source}")]
    ImageCopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal issue found while converting a single page.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PageWarning {
    /// A step referenced a local screenshot that is not on disk; the step is
    /// rendered without an image.
    #[error("Step {step}: image not found: {path:?}")]
    ImageNotFound { step: usize, path: PathBuf },
}
