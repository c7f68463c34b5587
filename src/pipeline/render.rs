//! Template rendering: splice a [`Page`] into a fresh copy of the template.
//!
//! Every page starts from the pristine template text, parsed anew, so no
//! mutation leaks from one page into the next. Rendering runs in three
//! steps:
//!
//! 1. build the step blocks as [`Node`] descriptions ([`step_nodes`])
//! 2. attach title, goal and blocks at the template's mutation points
//! 3. serialise the document
//!
//! A mutation point that the template lacks is skipped; the rest of the
//! page is still rendered.

use crate::config::{TemplateSelectors, TemplateVariant};
use crate::pipeline::extract::{Page, Step};
use crate::pipeline::markup::{self, escape_text, Node};
use dom_query::Document;
use tracing::debug;

/// Prefix of the flat variant's goal paragraph.
pub const FLAT_GOAL_PREFIX: &str = "Objetivo: ";

/// Alt text of every rendered screenshot.
pub const SCREENSHOT_ALT: &str = "Screenshot";

/// Render `page` into a copy of `template_source`.
pub fn render_page(
    template_source: &str,
    page: &Page,
    variant: TemplateVariant,
    selectors: &TemplateSelectors,
) -> String {
    let document = Document::from(template_source);

    set_text(&document, &selectors.title, &page.title);

    match variant {
        TemplateVariant::Accordion => replace_text_after(&document, &selectors.goal, &page.goal),
        TemplateVariant::Flat => set_text(
            &document,
            &selectors.goal,
            &format!("{FLAT_GOAL_PREFIX}{}", page.goal),
        ),
    }

    let blocks = step_nodes(variant, &page.steps);
    replace_children(&document, &selectors.steps, &markup::to_html(&blocks));

    document.html().to_string()
}

/// Build the children of the steps container for `steps`, numbered from 1.
pub fn step_nodes(variant: TemplateVariant, steps: &[Step]) -> Vec<Node> {
    let numbered = steps.iter().enumerate().map(|(idx, step)| (idx + 1, step));
    match variant {
        TemplateVariant::Accordion => numbered.map(|(i, step)| accordion_step(i, step)).collect(),
        TemplateVariant::Flat => numbered.flat_map(|(i, step)| flat_step(i, step)).collect(),
    }
}

// ── Variant A: accordion ─────────────────────────────────────────────────

/// One accordion item: a toggle button and its collapsible body.
pub fn accordion_step(i: usize, step: &Step) -> Node {
    let button = Node::element("button")
        .attr("class", "accordion-button collapsed")
        .attr("type", "button")
        .attr("data-bs-toggle", "collapse")
        .attr("data-bs-target", format!("#collapse{i}"))
        .text(format!("Step {i}: {}", step.title));

    let header = Node::element("h2")
        .attr("class", "accordion-header")
        .attr("id", format!("heading{i}"))
        .child(button);

    let mut body = Node::element("div")
        .attr("class", "accordion-body")
        .child(bullet_list(&step.text));
    if let Some(ref src) = step.image {
        body = body.child(
            Node::element("img")
                .attr("src", src.as_str())
                .attr("class", "img-fluid rounded mb-3")
                .attr("alt", SCREENSHOT_ALT),
        );
    }
    body = body.child(Node::element("div"));

    let collapse = Node::element("div")
        .attr("id", format!("collapse{i}"))
        .attr("class", "accordion-collapse collapse")
        .child(body);

    Node::element("div")
        .attr("class", "accordion-item")
        .child(header)
        .child(collapse)
}

// ── Variant B: flat list ─────────────────────────────────────────────────

/// The step block, plus a sibling screenshot container when the step has
/// an image.
pub fn flat_step(i: usize, step: &Step) -> Vec<Node> {
    let block = Node::element("div")
        .attr("class", "step")
        .child(Node::element("p").text(format!("{i}. {}", step.title)))
        .child(bullet_list(&step.text));

    let mut nodes = vec![block];
    if let Some(ref src) = step.image {
        nodes.push(
            Node::element("div").attr("class", "screenshot").child(
                Node::element("img")
                    .attr("src", src.as_str())
                    .attr("alt", SCREENSHOT_ALT),
            ),
        );
    }
    nodes
}

fn bullet_list(lines: &[String]) -> Node {
    Node::element("ul").children(
        lines
            .iter()
            .map(|line| Node::element("li").text(line.trim())),
    )
}

// ── Attachment ───────────────────────────────────────────────────────────

/// Replace the content of the first match of `selector` with `text`.
fn set_text(document: &Document, selector: &str, text: &str) {
    let target = document.select(selector).first();
    if !target.exists() {
        debug!("Template has no '{}'; title/goal not set", selector);
        return;
    }
    target.set_html(escape_text(text));
}

/// Replace the text node right after the first match of `selector` (the
/// goal label) with `" " + text`.
///
/// When the label is followed by an element, or by nothing, the text is
/// inserted instead.
fn replace_text_after(document: &Document, selector: &str, text: &str) {
    let label = document.select(selector).first();
    let Some(label) = label.nodes().first().cloned() else {
        debug!("Template has no '{}'; goal not set", selector);
        return;
    };

    let goal = document.tree.new_text(format!(" {text}"));
    match label.next_sibling() {
        Some(next) if next.is_text() => {
            next.replace_with(&goal);
        }
        Some(next) => {
            next.insert_before(&goal);
        }
        None => match label.parent() {
            Some(parent) => {
                parent.append_child(&goal);
            }
            None => debug!("Goal label '{}' has no parent", selector),
        },
    }
}

/// Drop every child of the first match of `selector` and insert `html`.
fn replace_children(document: &Document, selector: &str, html: &str) {
    let container = document.select(selector).first();
    if !container.exists() {
        debug!("Template has no '{}'; steps not rendered", selector);
        return;
    }
    container.set_html(html);
}
