//! Folder conversion entry points.
//!
//! [`convert_folder`] drives the whole run: it loads the template once,
//! walks the input root, converts each page with [`convert_page`], and
//! finally writes the table of contents. Pages are handled strictly one
//! after another; the list of index entries is the only state carried from
//! page to page, and it is built from the values `convert_page` returns.

use crate::config::ConversionConfig;
use crate::error::{ConvertError, PageWarning};
use crate::output::{ConversionOutput, ConversionStats, IndexEntry, PageResult};
use crate::pipeline::images::{self, ResolvedImage};
use crate::pipeline::{extract, index, input, render, write};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every `.html` page under `input_dir`.
///
/// # Errors
/// Returns `Err(ConvertError)` only for fatal errors:
/// - template or input folder missing
/// - a page, image or output file that cannot be read, copied or written
///
/// Missing screenshots are not errors; they show up as
/// [`PageWarning`]s on the affected [`PageResult`]. Folders below the input
/// root that cannot be read are skipped and counted in `stats.skipped`.
pub fn convert_folder(
    input_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    let input_dir = input_dir.as_ref();
    info!("Starting conversion: {}", input_dir.display());

    // ── Step 1: Template and input root ──────────────────────────────────
    let template = input::load_template(&config.template_path)?;
    let sources = input::walk_html_files(input_dir)?;

    // ── Step 2: Output folders ───────────────────────────────────────────
    write::ensure_dir(&config.output_dir)?;
    write::ensure_dir(&config.images_dir())?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(input_dir);
    }

    // ── Step 3: Pages, one at a time ─────────────────────────────────────
    let mut pages: Vec<PageResult> = Vec::new();
    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut written: HashSet<PathBuf> = HashSet::new();
    let mut stats = ConversionStats::default();

    for source in sources {
        let source = match source {
            Ok(path) => path,
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                stats.skipped += 1;
                continue;
            }
        };
        let page_num = pages.len() + 1;
        let (result, entry) = convert_page(&source, page_num, &template, config)?;

        if !written.insert(result.output.clone()) {
            warn!(
                "{} overwrites a page generated earlier in this run",
                result.output.display()
            );
            stats.overwritten += 1;
        }

        stats.pages += 1;
        stats.steps += result.step_count;
        stats.images_copied += result.images_copied.len();
        stats.images_missing += result.warnings.len();

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, &result.title, &result.output);
        }

        entries.push(entry);
        pages.push(result);
    }

    // ── Step 4: Table of contents ────────────────────────────────────────
    let index_path = if config.writes_index() {
        let html = index::render_index(&config.index_title, &entries);
        let path = write::write_output(&config.output_dir, index::INDEX_FILENAME, &html)?;
        info!("Table of contents generated: {}", path.display());
        Some(path)
    } else {
        entries.clear();
        None
    };

    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Conversion complete: {} pages, {} steps, {} images copied, {} missing, {} skipped, {}ms",
        stats.pages,
        stats.steps,
        stats.images_copied,
        stats.images_missing,
        stats.skipped,
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(stats.pages, index_path.as_deref());
    }

    Ok(ConversionOutput {
        pages,
        index: entries,
        index_path,
        stats,
    })
}

/// Convert a single page: extract, resolve images, render, write.
///
/// The output folder and its images folder must already exist. Returns the
/// page's result together with its table-of-contents entry.
pub fn convert_page(
    source: &Path,
    page_num: usize,
    template: &str,
    config: &ConversionConfig,
) -> Result<(PageResult, IndexEntry), ConvertError> {
    let html = input::read_page(source)?;
    let stem = input::file_stem(source);
    let mut page = extract::extract_page(&html, &stem);
    debug!(
        "Extracted '{}' with {} steps from {}",
        page.title,
        page.steps.len(),
        source.display()
    );

    // ── Images ───────────────────────────────────────────────────────────
    let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let images_dir = config.images_dir();
    let mut images_copied = Vec::new();
    let mut warnings = Vec::new();

    for (idx, step) in page.steps.iter_mut().enumerate() {
        let Some(reference) = step.image.take() else {
            continue;
        };
        let resolved = images::resolve_image(
            &reference,
            source_dir,
            &images_dir,
            &config.images_dir_name,
        )?;
        step.image = resolved.reference().map(str::to_string);

        match resolved {
            ResolvedImage::Copied { destination, .. } => images_copied.push(destination),
            ResolvedImage::Missing { source: missing } => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_image_missing(page_num, idx + 1, &missing);
                }
                warnings.push(PageWarning::ImageNotFound {
                    step: idx + 1,
                    path: missing,
                });
            }
            ResolvedImage::External(_) => {}
        }
    }

    // ── Render and write ─────────────────────────────────────────────────
    let rendered = render::render_page(
        template,
        &page,
        config.variant,
        &config.effective_selectors(),
    );
    let filename = write::output_filename(config.variant, &page.title, &stem);
    let output = write::write_output(&config.output_dir, &filename, &rendered)?;
    info!("Generated: {}", output.display());

    let entry = IndexEntry {
        title: page.title.clone(),
        filename,
    };
    let result = PageResult {
        page_num,
        source: source.to_path_buf(),
        output,
        title: page.title,
        step_count: page.steps.len(),
        images_copied,
        warnings,
    };

    Ok((result, entry))
}
