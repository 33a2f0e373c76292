//! Narrow view of a parsed HTML document.
//!
//! Table extraction only needs to find an element by its text, climb to an
//! enclosing element, and enumerate rows and cells. [`HtmlTree`] exposes exactly
//! that, so extraction can run against [`Document`] (backed by `scraper`) or
//! against a synthetic tree in tests.

use crate::error::ParseError;
use scraper::{ElementRef, Html, Selector};

pub trait HtmlTree {
    /// Handle to one element of the tree.
    type Node<'a>: Copy
    where
        Self: 'a;

    /// First element named `tag`, in document order, with a direct text
    /// child containing `needle`.
    fn find_by_text<'a>(
        &'a self,
        tag: &str,
        needle: &str,
    ) -> Result<Option<Self::Node<'a>>, ParseError>;

    /// Nearest ancestor of `node` named `tag`.
    fn enclosing<'a>(&'a self, node: Self::Node<'a>, tag: &str) -> Option<Self::Node<'a>>;

    /// Every `tr` below `node`, in document order.
    fn rows<'a>(&'a self, node: Self::Node<'a>) -> Result<Vec<Self::Node<'a>>, ParseError>;

    /// Direct element children of `node`.
    fn children<'a>(&'a self, node: Self::Node<'a>) -> Vec<Self::Node<'a>>;

    /// Concatenated, trimmed text of `node` and its descendants.
    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;
}

/// Creates a CSS selector from a string.
pub fn html_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}

/// An HTML page parsed with `scraper`.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }
}

impl HtmlTree for Document {
    type Node<'a> = ElementRef<'a>;

    fn find_by_text<'a>(
        &'a self,
        tag: &str,
        needle: &str,
    ) -> Result<Option<ElementRef<'a>>, ParseError> {
        let selector = html_selector(tag)?;
        let found = self.html.select(&selector).find(|element| {
            element
                .children()
                .filter_map(|child| child.value().as_text())
                .any(|text| text.contains(needle))
        });
        Ok(found)
    }

    fn enclosing<'a>(&'a self, node: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
        node.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == tag)
    }

    fn rows<'a>(&'a self, node: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ParseError> {
        let selector = html_selector("tr")?;
        Ok(node.select(&selector).collect())
    }

    fn children<'a>(&'a self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        node.children().filter_map(ElementRef::wrap).collect()
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        node.text().collect::<String>().trim().to_string()
    }
}
