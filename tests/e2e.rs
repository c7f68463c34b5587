//! End-to-end tests for html2submodule.
//!
//! Each test builds a small export tree in a `TempDir`, runs
//! [`convert_folder`] against one of the sample templates in `./templates/`,
//! and inspects the generated files.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use dom_query::Document;
use html2submodule::{
    convert_folder, ConversionConfig, ConversionProgressCallback, ConvertError, PageWarning,
    TemplateVariant,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Bytes standing in for a PNG screenshot.
const SHOT_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n fake screenshot payload";

const CREATE_VENDOR: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Create Vendor</title></head>
<body>
<article class="page sans">
  <header><h1 class="page-title">Create Vendor</h1></header>
  <div class="page-body">
    <figure class="block-color-gray_background callout" style="white-space:pre-wrap;display:flex">
      <div style="font-size:1.5em"><span class="icon">🎯</span></div>
      <div style="width:100%">Create a vendor master record in S/4HANA.</div>
    </figure>
    <div class="callout">Create a vendor master record in S/4HANA.</div>
    <details open="">
      <summary style="font-weight:600">Open Fiori Launchpad</summary>
      <p>Log in with your user.</p>
      <p>Open the <strong>Manage Business Partner</strong> tile.</p>
      <figure class="image"><a href="images%2Fshot1.png"><img style="width:1200px" src="images%2Fshot1.png"></a></figure>
    </details>
  </div>
</article>
</body>
</html>"#;

/// A page with `n` steps, the second one without summary and none with images.
fn numbered_page(title: &str, n: usize) -> String {
    let steps: String = (1..=n)
        .map(|i| {
            if i == 2 {
                format!("<details><p>text {i}</p></details>")
            } else {
                format!("<details><summary>Action {i}</summary><p>text {i}</p></details>")
            }
        })
        .collect();
    format!(
        r#"<html><body><h1 class="page-title">{title}</h1><div class="callout">Goal of {title}</div>{steps}</body></html>"#
    )
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn input(&self) -> PathBuf {
        self.dir.path().join("export")
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join("generated_submodules")
    }

    /// Write `contents` to `export/<relative>`, creating parent folders.
    fn add(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.input().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(&self, variant: TemplateVariant) -> ConversionConfig {
        let template = match variant {
            TemplateVariant::Accordion => "accordion.html",
            TemplateVariant::Flat => "flat.html",
        };
        ConversionConfig::builder()
            .output_dir(self.output())
            .template_path(templates_dir().join(template))
            .variant(variant)
            .build()
            .expect("valid config")
    }

    fn read_output(&self, name: &str) -> Document {
        let html = fs::read_to_string(self.output().join(name))
            .unwrap_or_else(|e| panic!("missing output {name}: {e}"));
        Document::from(html.as_str())
    }
}

fn texts(doc: &Document, selector: &str) -> Vec<String> {
    doc.select(selector)
        .iter()
        .map(|s| s.text().trim().to_string())
        .collect()
}

// ── Accordion variant ─────────────────────────────────────────────────────────

#[test]
fn test_create_vendor_scenario() {
    let fx = Fixture::new();
    fx.add("Training/Create Vendor 3f2a.html", CREATE_VENDOR.as_bytes());
    fx.add("Training/shot1.png", SHOT_BYTES);

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion))
        .expect("conversion should succeed");

    assert_eq!(output.stats.pages, 1);
    assert_eq!(output.stats.images_copied, 1);
    assert_eq!(output.stats.images_missing, 0);

    let doc = fx.read_output("Create Vendor.html");
    assert_eq!(texts(&doc, "div.head span"), vec!["Create Vendor"]);
    assert_eq!(
        texts(&doc, "#accordionSteps button.accordion-button"),
        vec!["Step 1: Open Fiori Launchpad"]
    );
    assert_eq!(
        texts(&doc, "#collapse1 .accordion-body li"),
        vec![
            "Log in with your user.",
            "Open the Manage Business Partner tile."
        ]
    );
    let img = doc.select("#collapse1 img");
    assert_eq!(img.attr("src").as_deref(), Some("images/shot1.png"));
    assert_eq!(img.attr("alt").as_deref(), Some("Screenshot"));

    let copied = fs::read(fx.output().join("images").join("shot1.png")).unwrap();
    assert_eq!(copied, SHOT_BYTES);
}

#[test]
fn test_goal_replaces_text_after_label() {
    let fx = Fixture::new();
    fx.add("a.html", CREATE_VENDOR.as_bytes());

    convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    let doc = fx.read_output("Create Vendor.html");
    let alert = doc.select("div.alert-info").text().to_string();
    // Only a `div` counts as callout; the decorated figure is ignored.
    assert_eq!(
        alert.split_whitespace().collect::<Vec<_>>().join(" "),
        "Goal: Create a vendor master record in S/4HANA."
    );
}

#[test]
fn test_step_count_and_numbering() {
    let fx = Fixture::new();
    fx.add("five.html", numbered_page("Five Steps", 5).as_bytes());

    convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    let doc = fx.read_output("Five Steps.html");
    assert_eq!(
        texts(&doc, "#accordionSteps > .accordion-item button"),
        vec![
            "Step 1: Action 1",
            "Step 2: Step 2",
            "Step 3: Action 3",
            "Step 4: Action 4",
            "Step 5: Action 5",
        ]
    );
    assert_eq!(doc.select("#accordionSteps img").length(), 0);
    // The template's sample step is gone.
    assert!(!doc.html().contains("Sample instruction"));
}

#[test]
fn test_no_callout_goal_fallback_accordion() {
    let fx = Fixture::new();
    fx.add(
        "p.html",
        br#"<h1 class="page-title">Bare</h1><details><summary>S</summary></details>"#,
    );

    convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    let doc = fx.read_output("Bare.html");
    let alert = doc.select("div.alert-info").text().to_string();
    assert_eq!(
        alert.split_whitespace().collect::<Vec<_>>().join(" "),
        "Goal: No goal found."
    );
}

#[test]
fn test_title_falls_back_to_stem_and_is_sanitized() {
    let fx = Fixture::new();
    fx.add("Post A_P.html", b"<p>no title</p>");
    fx.add(
        "sub/x.html",
        br#"<h1 class="page-title">FX Deal: Settle (v2)?</h1>"#,
    );

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    let mut names: Vec<String> = output.index.iter().map(|e| e.filename.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["FX Deal_ Settle _v2__.html", "Post A_P.html"]);
    assert!(fx.output().join("FX Deal_ Settle _v2__.html").is_file());
}

#[test]
fn test_external_image_passes_through() {
    let fx = Fixture::new();
    fx.add(
        "ext.html",
        br#"<h1 class="page-title">External</h1>
<details><summary>S</summary><img src="https://example.com/shot.png"></details>"#,
    );

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    assert_eq!(output.stats.images_copied, 0);
    let doc = fx.read_output("External.html");
    assert_eq!(
        doc.select("#collapse1 img").attr("src").as_deref(),
        Some("https://example.com/shot.png")
    );
    assert_eq!(fs::read_dir(fx.output().join("images")).unwrap().count(), 0);
}

#[test]
fn test_missing_image_is_warned_and_omitted() {
    let fx = Fixture::new();
    let page = fx.add(
        "m/missing.html",
        br#"<h1 class="page-title">Missing</h1>
<details><summary>S</summary><p>see picture</p><img src="images%2Fgone.png"></details>"#,
    );

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    assert_eq!(output.stats.images_missing, 1);
    assert_eq!(
        output.pages[0].warnings,
        vec![PageWarning::ImageNotFound {
            step: 1,
            path: page.parent().unwrap().join("gone.png"),
        }]
    );
    let doc = fx.read_output("Missing.html");
    assert_eq!(doc.select("#accordionSteps img").length(), 0);
    assert_eq!(texts(&doc, "#collapse1 li"), vec!["see picture"]);
}

#[test]
fn test_index_lists_pages_in_processing_order() {
    let fx = Fixture::new();
    fx.add("one/a.html", numbered_page("Alpha", 1).as_bytes());
    fx.add("two/b.html", numbered_page("Beta", 2).as_bytes());
    fx.add("c.html", numbered_page("R&D", 1).as_bytes());

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    let index_path = output.index_path.clone().expect("index written");
    assert_eq!(index_path, fx.output().join("index.html"));

    let expected: Vec<String> = output.pages.iter().map(|p| p.title.clone()).collect();
    let doc = fx.read_output("index.html");
    assert_eq!(texts(&doc, "ul > li > a"), expected);
    let hrefs: Vec<String> = doc
        .select("ul > li > a")
        .iter()
        .filter_map(|a| a.attr("href").map(|h| h.to_string()))
        .collect();
    let filenames: Vec<String> = output.index.iter().map(|e| e.filename.clone()).collect();
    assert_eq!(hrefs, filenames);
    assert!(filenames.contains(&"R_D.html".to_string()));
}

#[test]
fn test_empty_folder_writes_empty_index() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.input()).unwrap();

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();

    assert_eq!(output.stats.pages, 0);
    let doc = fx.read_output("index.html");
    assert_eq!(doc.select("li").length(), 0);
    assert_eq!(texts(&doc, "h1"), vec!["SAP TRM Training Modules"]);
}

// ── Flat variant ──────────────────────────────────────────────────────────────

#[test]
fn test_flat_variant_scenario() {
    let fx = Fixture::new();
    fx.add("Training/Create Vendor 3f2a.html", CREATE_VENDOR.as_bytes());
    fx.add("Training/shot1.png", SHOT_BYTES);

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Flat)).unwrap();

    assert!(output.index_path.is_none());
    assert!(!fx.output().join("index.html").exists());

    let doc = fx.read_output("Submodule_Create Vendor 3f2a.html");
    assert_eq!(texts(&doc, "h1"), vec!["Create Vendor"]);
    assert_eq!(
        texts(&doc, "p.goal"),
        vec!["Objetivo: Create a vendor master record in S/4HANA."]
    );
    assert_eq!(texts(&doc, "#steps > .step > p"), vec!["1. Open Fiori Launchpad"]);
    assert_eq!(doc.select("#steps > .step li").length(), 2);
    assert_eq!(doc.select("#steps > .step img").length(), 0);
    assert_eq!(
        doc.select("#steps > .screenshot > img").attr("src").as_deref(),
        Some("images/shot1.png")
    );
    assert_eq!(
        fs::read(fx.output().join("images/shot1.png")).unwrap(),
        SHOT_BYTES
    );
}

#[test]
fn test_no_callout_goal_fallback_flat() {
    let fx = Fixture::new();
    fx.add("bare.html", br#"<h1 class="page-title">Bare</h1>"#);

    convert_folder(fx.input(), &fx.config(TemplateVariant::Flat)).unwrap();

    let doc = fx.read_output("Submodule_bare.html");
    assert_eq!(texts(&doc, "p.goal"), vec!["Objetivo: No goal found."]);
    assert_eq!(doc.select("#steps > *").length(), 0);
}

// ── Errors and reporting ──────────────────────────────────────────────────────

#[test]
fn test_missing_input_folder_is_fatal() {
    let fx = Fixture::new();
    let err = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap_err();
    assert!(matches!(err, ConvertError::InputNotFound { .. }), "got: {err}");
    assert!(!fx.output().exists(), "nothing is written on fatal input errors");
}

#[test]
fn test_progress_callback_sees_every_page() {
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ConversionProgressCallback for Recorder {
        fn on_conversion_start(&self, _input_dir: &Path) {
            self.events.lock().unwrap().push("start".into());
        }
        fn on_page_complete(&self, page_num: usize, title: &str, _output: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("page {page_num} {title}"));
        }
        fn on_image_missing(&self, page_num: usize, step: usize, _path: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("missing {page_num}/{step}"));
        }
        fn on_conversion_complete(&self, total_pages: usize, index_path: Option<&Path>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {total_pages} {}", index_path.is_some()));
        }
    }

    let fx = Fixture::new();
    fx.add(
        "only.html",
        br#"<h1 class="page-title">Only</h1><details><img src="nope.png"></details>"#,
    );

    let recorder = Arc::new(Recorder::default());
    let config = ConversionConfig::builder()
        .output_dir(fx.output())
        .template_path(templates_dir().join("accordion.html"))
        .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();

    convert_folder(fx.input(), &config).unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["start", "missing 1/1", "page 1 Only", "done 1 true"]
    );
}

#[test]
fn test_report_is_json_serialisable() {
    let fx = Fixture::new();
    fx.add("a.html", numbered_page("Alpha", 3).as_bytes());

    let output = convert_folder(fx.input(), &fx.config(TemplateVariant::Accordion)).unwrap();
    let json = serde_json::to_value(&output).expect("serialise report");

    assert_eq!(json["stats"]["pages"], 1);
    assert_eq!(json["stats"]["steps"], 3);
    assert_eq!(json["index"][0]["filename"], "Alpha.html");
}
