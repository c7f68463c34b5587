//! Result types returned by [`crate::convert::convert_folder`].

use crate::error::PageWarning;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One line of the table of contents: a page title and its output filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    /// Filename relative to the output folder, used verbatim as the link target.
    pub filename: String,
}

/// Outcome of converting one input page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed position in processing order.
    pub page_num: usize,
    pub source: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub step_count: usize,
    /// Screenshots copied into the images folder for this page, in step order.
    pub images_copied: Vec<PathBuf>,
    pub warnings: Vec<PageWarning>,
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub pages: usize,
    pub steps: usize,
    pub images_copied: usize,
    pub images_missing: usize,
    /// Pages whose output filename had already been written earlier in the run.
    pub overwritten: usize,
    /// Entries below the input root that could not be read.
    pub skipped: usize,
    pub total_duration_ms: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub pages: Vec<PageResult>,
    /// Table-of-contents entries in processing order (empty for the flat variant).
    pub index: Vec<IndexEntry>,
    pub index_path: Option<PathBuf>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// All warnings of all pages, in processing order.
    pub fn warnings(&self) -> impl Iterator<Item = &PageWarning> {
        self.pages.iter().flat_map(|p| p.warnings.iter())
    }
}
