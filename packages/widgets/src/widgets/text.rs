use anyhow::Result;

use crate::{browser::Locator, page::Page};

/// Read-only text of a single element.
#[derive(Debug, Clone)]
pub struct Text {
    page: Page,
    locator: Locator,
}

impl Text {
    pub fn new(page: &Page, locator: Locator) -> Self {
        Self {
            page: page.clone(),
            locator,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub async fn text(&self) -> Result<String> {
        let element = self.page.element(&self.locator).await?;
        self.page.text(&element).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&self.locator).await
    }
}
