//! Extraction: turn one exported page into a [`Page`] record.
//!
//! The export tool marks the parts we need with fixed markup:
//!
//! | Field | Source |
//! |-------|--------|
//! | title | first `h1.page-title` |
//! | goal  | first `div.callout` |
//! | steps | every `details`, in document order |
//! | step title | first `summary` inside the `details` |
//! | step text  | every `p` / `li` inside the `details` |
//! | step image | `src` of the first `img` inside the `details` |
//!
//! Nothing here fails: absent markup degrades to the documented defaults.

use dom_query::{Document, Selection};
use once_cell::sync::Lazy;
use regex::Regex;

/// Goal text used when a page has no callout.
pub const NO_GOAL: &str = "No goal found.";

const TITLE_SELECTOR: &str = "h1.page-title";
const GOAL_SELECTOR: &str = "div.callout";
const STEP_SELECTOR: &str = "details";
const STEP_TITLE_SELECTOR: &str = "summary";
const STEP_TEXT_SELECTOR: &str = "p, li";
const STEP_IMAGE_SELECTOR: &str = "img";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Structured content of one training page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub goal: String,
    pub steps: Vec<Step>,
}

/// One numbered step of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    /// Non-empty lines in document order.
    pub text: Vec<String>,
    /// Raw `src` after extraction; the rewritten path after image resolution.
    pub image: Option<String>,
}

/// Parse `html` and extract its page record.
///
/// `fallback_title` (normally the file stem) is used when the page has no
/// title heading or the heading is blank.
pub fn extract_page(html: &str, fallback_title: &str) -> Page {
    let document = Document::from(html);

    let title = first_text(&document.select(TITLE_SELECTOR))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title.to_string());

    let goal = first_text(&document.select(GOAL_SELECTOR)).unwrap_or_else(|| NO_GOAL.to_string());

    let steps = document
        .select(STEP_SELECTOR)
        .iter()
        .enumerate()
        .map(|(idx, details)| extract_step(&details, idx + 1))
        .collect();

    Page { title, goal, steps }
}

fn extract_step(details: &Selection<'_>, step_num: usize) -> Step {
    let title = first_text(&details.select(STEP_TITLE_SELECTOR))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Step {step_num}"));

    let text = details
        .select(STEP_TEXT_SELECTOR)
        .iter()
        .map(|block| normalise_text(&block.text()))
        .filter(|line| !line.is_empty())
        .collect();

    let image = details
        .select(STEP_IMAGE_SELECTOR)
        .first()
        .attr("src")
        .map(|src| src.to_string());

    Step { title, text, image }
}

/// Normalised text of the first element in `selection`, if there is one.
fn first_text(selection: &Selection<'_>) -> Option<String> {
    if selection.is_empty() {
        return None;
    }
    Some(normalise_text(&selection.first().text()))
}

/// Trim and collapse whitespace runs (source indentation, line breaks) to
/// single spaces.
pub fn normalise_text(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}
