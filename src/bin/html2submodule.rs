//! CLI binary for html2submodule.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use html2submodule::{
    convert_folder, ConversionConfig, ConversionProgressCallback, ProgressCallback,
    TemplateSelectors, TemplateVariant,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner with a running page count and one
/// log line per generated page or missing screenshot.
struct CliProgressCallback {
    bar: ProgressBar,
    missing: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        // The walk is lazy, so the total is unknown; count upwards instead.
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  {pos} pages  ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            missing: AtomicUsize::new(0),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, input_dir: &Path) {
        self.bar.set_prefix("Converting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting pages under {}…", input_dir.display()))
        ));
    }

    fn on_page_complete(&self, page_num: usize, title: &str, output: &Path) {
        self.bar.println(format!(
            "  {} {:>4}  {}  {}",
            green("✔"),
            page_num,
            title,
            dim(&output.display().to_string()),
        ));
        self.bar.set_message(title.to_string());
        self.bar.inc(1);
    }

    fn on_image_missing(&self, page_num: usize, step: usize, path: &Path) {
        self.missing.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} {:>4}  step {}: image not found: {}",
            yellow("⚠"),
            page_num,
            step,
            path.display(),
        ));
    }

    fn on_conversion_complete(&self, total_pages: usize, index_path: Option<&Path>) {
        self.bar.finish_and_clear();
        let missing = self.missing.load(Ordering::SeqCst);
        if missing == 0 {
            eprintln!(
                "{} {} pages generated",
                green("✔"),
                bold(&total_pages.to_string())
            );
        } else {
            eprintln!(
                "{} {} pages generated  ({} images missing)",
                yellow("⚠"),
                bold(&total_pages.to_string()),
                yellow(&missing.to_string()),
            );
        }
        if let Some(path) = index_path {
            eprintln!("{} Table of contents: {}", cyan("📘"), bold(&path.display().to_string()));
        }
    }
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Accordion pages + index.html into ./generated_submodules
  html2submodule Export-90b6bcb0 --template SubModuleSample.html

  # Flat pages named Submodule_<file>.html
  html2submodule Export-90b6bcb0 --variant flat --template templates/flat.html -o site

  # Custom mutation points for a home-grown template
  html2submodule export --title-selector "header h2" --goal-selector "#goal b" \
      --steps-selector "main.steps"

  # Machine-readable run report
  html2submodule export --json > report.json

TEMPLATE MUTATION POINTS (defaults):
  Variant     Title            Goal                     Steps
  ─────────   ───────────────  ───────────────────────  ──────────────────
  accordion   div.head span    div.alert-info strong    div#accordionSteps
  flat        h1               p.goal                   div#steps

  Accordion replaces the text right after the goal label; flat replaces the
  whole goal paragraph with "Objetivo: <goal>".

ENVIRONMENT VARIABLES:
  H2S_OUTPUT      Output folder
  H2S_TEMPLATE    Template file
  H2S_VARIANT     accordion | flat
  RUST_LOG        Override log filter (e.g. html2submodule=debug)
"##;

/// Convert exported HTML training pages into templated submodule pages.
#[derive(Parser, Debug)]
#[command(
    name = "html2submodule",
    version,
    about = "Convert exported HTML training pages into templated submodule pages",
    long_about = "Walks an export folder for .html pages, extracts each page's title, goal \
and <details> steps, copies the step screenshots, and renders every page into a fixed HTML \
template. The accordion variant also writes an index.html table of contents.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Export folder to walk for .html pages.
    input: PathBuf,

    /// Output folder for generated pages, images/ and index.html.
    #[arg(short, long, env = "H2S_OUTPUT", default_value = "generated_submodules")]
    output: PathBuf,

    /// Template HTML file.
    #[arg(short, long, env = "H2S_TEMPLATE", default_value = "SubModuleSample.html")]
    template: PathBuf,

    /// Template layout: accordion or flat.
    #[arg(long, env = "H2S_VARIANT", value_enum, default_value = "accordion")]
    variant: VariantArg,

    /// Selector of the title element (overrides the variant default).
    #[arg(long, requires_all = ["goal_selector", "steps_selector"])]
    title_selector: Option<String>,

    /// Selector of the goal label / paragraph (overrides the variant default).
    #[arg(long, requires_all = ["title_selector", "steps_selector"])]
    goal_selector: Option<String>,

    /// Selector of the steps container (overrides the variant default).
    #[arg(long, requires_all = ["title_selector", "goal_selector"])]
    steps_selector: Option<String>,

    /// Name of the screenshot folder inside the output folder.
    #[arg(long, env = "H2S_IMAGES_DIR", default_value = "images")]
    images_dir: String,

    /// Heading of the table of contents.
    #[arg(long, env = "H2S_INDEX_TITLE", default_value = "SAP TRM Training Modules")]
    index_title: String,

    /// Do not write index.html.
    #[arg(long)]
    no_index: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress output.
    #[arg(long, env = "H2S_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "H2S_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "H2S_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum VariantArg {
    Accordion,
    Flat,
}

impl From<VariantArg> for TemplateVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Accordion => TemplateVariant::Accordion,
            VariantArg::Flat => TemplateVariant::Flat,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // With the progress bar active only errors are logged; the bar prints
    // its own per-page lines.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_folder(&cli.input, &config).context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        eprintln!(
            "Generated {} pages ({} steps, {} images copied) in {}ms",
            output.stats.pages,
            output.stats.steps,
            output.stats.images_copied,
            output.stats.total_duration_ms
        );
        for warning in output.warnings() {
            eprintln!("  {} {warning}", yellow("⚠"));
        }
        if output.stats.skipped > 0 {
            eprintln!("  {} unreadable entries skipped", output.stats.skipped);
        }
    } else if show_progress && output.stats.skipped > 0 {
        eprintln!(
            "{} {} unreadable entries skipped",
            yellow("⚠"),
            output.stats.skipped
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .output_dir(&cli.output)
        .template_path(&cli.template)
        .variant(cli.variant.clone().into())
        .images_dir_name(&cli.images_dir)
        .index_title(&cli.index_title)
        .write_index(!cli.no_index);

    if let (Some(title), Some(goal), Some(steps)) =
        (&cli.title_selector, &cli.goal_selector, &cli.steps_selector)
    {
        builder = builder.selectors(TemplateSelectors {
            title: title.clone(),
            goal: goal.clone(),
            steps: steps.clone(),
        });
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
