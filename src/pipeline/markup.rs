//! Node descriptions for generated markup.
//!
//! Renderers build a small tree of [`Node`]s for each step and hand the
//! serialised HTML to the template document in one `append_html` call.
//! Building the tree is pure, so blocks can be inspected in tests without a
//! template.

use std::fmt::Write;

/// Void elements are serialised without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A piece of generated markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    /// An element without attributes or children.
    pub fn element(tag: &'static str) -> Self {
        Node::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. No-op on text nodes.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element { ref mut attrs, .. } = self {
            attrs.push((name, value.into()));
        }
        self
    }

    /// Append a child. No-op on text nodes.
    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element {
            ref mut children, ..
        } = self
        {
            children.push(node);
        }
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Append several children.
    pub fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, Node::child)
    }

    /// Number of descendant elements (this one included) with the given tag.
    #[cfg(test)]
    pub fn count(&self, wanted: &str) -> usize {
        match self {
            Node::Text(_) => 0,
            Node::Element { tag, children, .. } => {
                let own = usize::from(*tag == wanted);
                own + children.iter().map(|c| c.count(wanted)).sum::<usize>()
            }
        }
    }

    /// Serialise to HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(tag) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// Serialise a sequence of sibling nodes.
pub fn to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

/// Escape `&`, `<` and `>` for text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text content plus double quotes for attribute values.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_nested_elements() {
        let node = Node::element("div")
            .attr("class", "step")
            .child(Node::element("p").text("1. Open"))
            .child(Node::element("img").attr("src", "images/a.png"));
        assert_eq!(
            node.to_html(),
            r#"<div class="step"><p>1. Open</p><img src="images/a.png"></div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node = Node::element("a")
            .attr("href", "R&D \"draft\".html")
            .text("<b>R&D</b>");
        assert_eq!(
            node.to_html(),
            r#"<a href="R&amp;D &quot;draft&quot;.html">&lt;b&gt;R&amp;D&lt;/b&gt;</a>"#
        );
    }

    #[test]
    fn counts_descendant_tags() {
        let node = Node::element("ul").children(vec![
            Node::element("li").text("a"),
            Node::element("li").child(Node::element("ul").child(Node::element("li"))),
        ]);
        assert_eq!(node.count("li"), 3);
        assert_eq!(node.count("ul"), 2);
        assert_eq!(node.count("img"), 0);
    }

    #[test]
    fn sibling_sequence_concatenates() {
        let html = to_html(&[Node::element("div"), Node::Text("x".into())]);
        assert_eq!(html, "<div></div>x");
    }
}
