//! Pipeline stages for page conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ images ──▶ render ──▶ write      (per page)
//! (walk)    (Page)      (copy)     (template)  (file)
//!                                                 └──▶ index  (once, accordion only)
//! ```
//!
//! 1. [`input`]   — load the template, walk the input root for `.html` pages
//! 2. [`extract`] — parse a page into title, goal and steps
//! 3. [`images`]  — copy local screenshots into the images folder and rewrite
//!    their references; the only stage besides [`write`] that touches disk
//! 4. [`render`]  — splice the page into a fresh copy of the template, using
//!    the node descriptions from [`markup`]
//! 5. [`write`]   — name and write the output page
//! 6. [`index`]   — table of contents over every written page

pub mod extract;
pub mod images;
pub mod index;
pub mod input;
pub mod markup;
pub mod render;
pub mod write;
