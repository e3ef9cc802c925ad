use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    pub text: String,
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedText;
}

/// Visible-text extractor:
/// - pulls `<title>` text if present and non-blank
/// - joins every text node in document order with single spaces
/// - skips script, style and template contents
/// - collapses whitespace runs and trims the ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperTextExtractor;

impl TextExtractor for ScraperTextExtractor {
    fn extract(&self, html: &str) -> ExtractedText {
        let doc = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| doc.select(&sel).next().map(|t| t.text().collect::<String>()))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let mut fragments = Vec::new();
        collect_text(doc.tree.root(), &mut fragments);

        ExtractedText {
            title,
            text: normalize_whitespace(&fragments.join(" ")),
        }
    }
}

fn collect_text<'a>(node: NodeRef<'a, Node>, out: &mut Vec<&'a str>) {
    match node.value() {
        Node::Text(text) => out.push(text),
        Node::Element(element) => {
            if matches!(element.name(), "script" | "style" | "template") {
                return;
            }
            for child in node.children() {
                collect_text(child, out);
            }
        }
        Node::Document | Node::Fragment => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
