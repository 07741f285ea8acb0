use derive_more::{Display, Error};

use crate::browser::Locator;

/// Failures detected by widgets while reading or operating a page.
#[derive(Debug, Display, Error)]
pub enum WidgetError {
    #[display("No element matches {locator}")]
    NoSuchElement { locator: Locator },
    #[display("Item '{name}' not found")]
    ItemNotFound { name: String },
    #[display("No row '{key}' in table '{table}'")]
    RowNotFound { table: String, key: String },
    #[display("Item '{item}' not found in menu '{menu}'")]
    MenuItemNotFound { menu: String, item: String },
    #[display("Expected flash message '{expected}', found {found:?}")]
    FlashMessageMissing { expected: String, found: Vec<String> },
}

/// Failures a browser driver reports for an operation it could not perform.
#[derive(Debug, Display, Error)]
pub enum BrowserError {
    #[display("Element {id} is no longer attached to the document")]
    StaleElement { id: String },
    #[display("Element {id} is not interactable")]
    NotInteractable { id: String },
    #[display("Unexpected alert open: {text}")]
    UnexpectedAlert { text: String },
}
