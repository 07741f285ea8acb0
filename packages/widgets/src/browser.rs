//! Element addressing and the browser driver seam.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an element is addressed in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "using", content = "value", rename_all = "snake_case")]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::XPath(expr) | Locator::Css(expr) => expr,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath:{expr}"),
            Locator::Css(selector) => write!(f, "css:{selector}"),
        }
    }
}

/// Quote `text` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so text holding both quote kinds is
/// spliced together with `concat()`.
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{text}'")
    } else if !text.contains('"') {
        format!("\"{text}\"")
    } else {
        let parts = text
            .split('\'')
            .map(|part| format!("'{part}'"))
            .collect::<Vec<_>>()
            .join(", \"'\", ");
        format!("concat({parts})")
    }
}

/// Opaque reference to an element of the currently loaded document.
///
/// References are only valid for the document they were found in; drivers
/// report [`crate::BrowserError::StaleElement`] for older ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element(String);

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Element(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Primitive operations of a browser session.
///
/// One session is driven by one caller at a time; implementations only need
/// interior mutability, not ordering guarantees between concurrent calls.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn refresh(&self) -> Result<()>;

    /// Find elements matching `locator`, inside `parent` when given.
    async fn find_elements(&self, locator: &Locator, parent: Option<&Element>)
        -> Result<Vec<Element>>;

    async fn text(&self, element: &Element) -> Result<String>;

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>>;

    async fn click(&self, element: &Element) -> Result<()>;

    async fn send_keys(&self, element: &Element, text: &str) -> Result<()>;

    async fn clear(&self, element: &Element) -> Result<()>;

    /// Accept or dismiss an open alert; `false` when no alert was open.
    async fn handle_alert(&self, accept: bool) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xpath_literal_quoting() {
        assert_eq!(xpath_literal("Properties"), "'Properties'");
        assert_eq!(xpath_literal("pool's"), "\"pool's\"");
        assert_eq!(xpath_literal(r#"a'b"c"#), r#"concat('a', "'", 'b"c')"#);
    }

    #[test]
    fn test_locator_display() {
        assert_eq!(Locator::xpath("//h1").to_string(), "xpath://h1");
        assert_eq!(Locator::css("#main").to_string(), "css:#main");
        assert_eq!(Locator::css("#main").as_str(), "#main");
    }
}
