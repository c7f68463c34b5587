//! Configuration types for the submodule conversion.
//!
//! Every knob lives in [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. The input folder is not part of the config;
//! it is passed to [`crate::convert::convert_folder`] alongside it.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Default output folder, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_submodules";

/// Default template file, relative to the working directory.
pub const DEFAULT_TEMPLATE: &str = "SubModuleSample.html";

/// Default name of the screenshot folder inside the output folder.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default heading of the generated table of contents.
pub const DEFAULT_INDEX_TITLE: &str = "SAP TRM Training Modules";

/// Configuration for a folder conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use html2submodule::{ConversionConfig, TemplateVariant};
///
/// let config = ConversionConfig::builder()
///     .output_dir("site/modules")
///     .template_path("templates/flat.html")
///     .variant(TemplateVariant::Flat)
///     .build()
///     .unwrap();
/// assert!(!config.writes_index());
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Folder that receives generated pages, `images/` and `index.html`.
    /// Default: `generated_submodules`.
    pub output_dir: PathBuf,

    /// Template HTML file, read once per run. Default: `SubModuleSample.html`.
    pub template_path: PathBuf,

    /// Which renderer strategy the template expects. Default: [`TemplateVariant::Accordion`].
    pub variant: TemplateVariant,

    /// Mutation points inside the template. `None` uses the variant's defaults.
    pub selectors: Option<TemplateSelectors>,

    /// Name of the screenshot folder inside `output_dir`. Default: `images`.
    ///
    /// Also the prefix of every rewritten `<img src>`.
    pub images_dir_name: String,

    /// Heading and `<title>` of the table of contents. Default: "SAP TRM Training Modules".
    pub index_title: String,

    /// Emit `index.html` after all pages. Default: true.
    ///
    /// Only honoured for [`TemplateVariant::Accordion`]; the flat variant
    /// never writes an index.
    pub write_index: bool,

    /// Receives per-page events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            variant: TemplateVariant::default(),
            selectors: None,
            images_dir_name: DEFAULT_IMAGES_DIR.to_string(),
            index_title: DEFAULT_INDEX_TITLE.to_string(),
            write_index: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("output_dir", &self.output_dir)
            .field("template_path", &self.template_path)
            .field("variant", &self.variant)
            .field("selectors", &self.selectors)
            .field("images_dir_name", &self.images_dir_name)
            .field("index_title", &self.index_title)
            .field("write_index", &self.write_index)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Selectors in effect: the explicit override or the variant's defaults.
    pub fn effective_selectors(&self) -> TemplateSelectors {
        self.selectors
            .clone()
            .unwrap_or_else(|| TemplateSelectors::for_variant(self.variant))
    }

    /// Absolute-or-relative path of the screenshot folder.
    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(&self.images_dir_name)
    }

    /// Whether this run ends with an `index.html`.
    pub fn writes_index(&self) -> bool {
        self.write_index && self.variant == TemplateVariant::Accordion
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = path.into();
        self
    }

    pub fn variant(mut self, variant: TemplateVariant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn selectors(mut self, selectors: TemplateSelectors) -> Self {
        self.config.selectors = Some(selectors);
        self
    }

    pub fn images_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.images_dir_name = name.into();
        self
    }

    pub fn index_title(mut self, title: impl Into<String>) -> Self {
        self.config.index_title = title.into();
        self
    }

    pub fn write_index(mut self, v: bool) -> Self {
        self.config.write_index = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.output_dir.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Output folder must not be empty".into(),
            ));
        }
        if c.template_path.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "Template path must not be empty".into(),
            ));
        }
        if !is_single_component(&c.images_dir_name) {
            return Err(ConvertError::InvalidConfig(format!(
                "Images folder must be a single folder name, got '{}'",
                c.images_dir_name
            )));
        }
        if let Some(ref s) = c.selectors {
            for (name, value) in [("title", &s.title), ("goal", &s.goal), ("steps", &s.steps)] {
                if value.trim().is_empty() {
                    return Err(ConvertError::InvalidConfig(format!(
                        "The {name} selector must not be empty"
                    )));
                }
            }
        }
        Ok(self.config)
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Renderer strategy matching the loaded template.
///
/// | Variant | Steps markup | Output filename | Index |
/// |---------|--------------|-----------------|-------|
/// | `Accordion` | Bootstrap accordion item per step | `<sanitized title>.html` | yes |
/// | `Flat` | `div.step` + sibling screenshot container | `Submodule_<stem>.html` | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemplateVariant {
    /// Collapsible accordion items. (default)
    #[default]
    Accordion,
    /// Plain numbered paragraphs and bullet lists.
    Flat,
}

/// CSS selectors locating the three mutation points of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSelectors {
    /// Element whose text becomes the page title.
    pub title: String,
    /// Accordion: the goal label (the text node after it is replaced).
    /// Flat: the goal paragraph (its whole text is replaced).
    pub goal: String,
    /// Container whose children are replaced by the step blocks.
    pub steps: String,
}

impl TemplateSelectors {
    /// Defaults matching the sample templates in `templates/`.
    pub fn for_variant(variant: TemplateVariant) -> Self {
        match variant {
            TemplateVariant::Accordion => Self {
                title: "div.head span".into(),
                goal: "div.alert-info strong".into(),
                steps: "div#accordionSteps".into(),
            },
            TemplateVariant::Flat => Self {
                title: "h1".into(),
                goal: "p.goal".into(),
                steps: "div#steps".into(),
            },
        }
    }
}
