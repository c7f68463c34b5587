//! # html2submodule
//!
//! Convert a folder of exported HTML training pages into standardized
//! submodule pages built from a fixed HTML template.
//!
//! Each exported page contributes a title (`h1.page-title`), a goal
//! (`div.callout`), and one numbered step per `<details>` element, with the
//! step's paragraphs and list items as text and its first image as
//! screenshot. Screenshots are copied into an `images/` folder beside the
//! generated pages.
//!
//! ## Pipeline Overview
//!
//! ```text
//! export folder
//!  │
//!  ├─ 1. Walk     every *.html below the input root
//!  ├─ 2. Extract  title, goal, steps
//!  ├─ 3. Images   copy screenshots to <output>/images, rewrite src
//!  ├─ 4. Render   fresh template copy per page (accordion or flat)
//!  ├─ 5. Write    <sanitized title>.html  |  Submodule_<stem>.html
//!  └─ 6. Index    index.html table of contents (accordion only)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use html2submodule::{convert_folder, ConversionConfig, TemplateVariant};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .template_path("SubModuleSample.html")
//!         .output_dir("generated_submodules")
//!         .variant(TemplateVariant::Accordion)
//!         .build()?;
//!     let output = convert_folder("Export-90b6bcb0", &config)?;
//!     eprintln!(
//!         "{} pages, {} images copied, {} missing",
//!         output.stats.pages, output.stats.images_copied, output.stats.images_missing
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `html2submodule` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, TemplateSelectors, TemplateVariant};
pub use convert::{convert_folder, convert_page};
pub use error::{ConvertError, PageWarning};
pub use output::{ConversionOutput, ConversionStats, IndexEntry, PageResult};
pub use pipeline::extract::{extract_page, Page, Step};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
