//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the driver walks the input folder.
//!
//! # Example
//!
//! ```rust
//! use html2submodule::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, title: &str, output: &std::path::Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("#{page_num} {title} -> {}", output.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { written: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the driver as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are processed one at a time, in walk order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, after the template is loaded and before the first page.
    fn on_conversion_start(&self, input_dir: &Path) {
        let _ = input_dir;
    }

    /// Called after a page has been written.
    ///
    /// # Arguments
    /// * `page_num` — 1-indexed position in processing order
    /// * `title`    — extracted page title
    /// * `output`   — path of the written page
    fn on_page_complete(&self, page_num: usize, title: &str, output: &Path) {
        let _ = (page_num, title, output);
    }

    /// Called when a step's screenshot is missing from disk.
    fn on_image_missing(&self, page_num: usize, step: usize, path: &Path) {
        let _ = (page_num, step, path);
    }

    /// Called once after every page has been written (and the index, if any).
    fn on_conversion_complete(&self, total_pages: usize, index_path: Option<&Path>) {
        let _ = (total_pages, index_path);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
