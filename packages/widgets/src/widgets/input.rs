use anyhow::Result;

use crate::{browser::Locator, page::Page};

#[derive(Debug, Clone)]
pub struct TextInput {
    page: Page,
    locator: Locator,
}

impl TextInput {
    /// Input addressed by its `id` attribute.
    pub fn with_id(page: &Page, id: &str) -> Self {
        Self::new(page, Self::locator_for(id))
    }

    pub fn new(page: &Page, locator: Locator) -> Self {
        Self {
            page: page.clone(),
            locator,
        }
    }

    pub fn locator_for(id: &str) -> Locator {
        Locator::xpath(format!("//input[@id={}]", crate::xpath_literal(id)))
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub async fn fill(&self, text: &str) -> Result<()> {
        let element = self.page.element(&self.locator).await?;
        self.page.fill(&element, text).await
    }

    pub async fn value(&self) -> Result<String> {
        let element = self.page.element(&self.locator).await?;
        Ok(self
            .page
            .attribute(&element, "value")
            .await?
            .unwrap_or_default())
    }
}
