use anyhow::Result;

use crate::{
    browser::{xpath_literal, Locator},
    page::Page,
};

#[derive(Debug, Clone)]
pub struct Button {
    page: Page,
    locator: Locator,
}

impl Button {
    /// Button identified by its `title` attribute (icon-only toolbar buttons).
    pub fn titled(page: &Page, title: &str) -> Self {
        Self::new(page, Self::title_locator(title))
    }

    /// Button identified by its visible label.
    pub fn labelled(page: &Page, label: &str) -> Self {
        Self::new(page, Self::label_locator(label))
    }

    pub fn new(page: &Page, locator: Locator) -> Self {
        Self {
            page: page.clone(),
            locator,
        }
    }

    pub fn title_locator(title: &str) -> Locator {
        Locator::xpath(format!("//button[@title={}]", xpath_literal(title)))
    }

    pub fn label_locator(label: &str) -> Locator {
        Locator::xpath(format!(
            "//button[normalize-space(.)={}]",
            xpath_literal(label)
        ))
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub async fn click(&self) -> Result<()> {
        let element = self.page.element(&self.locator).await?;
        self.page.click(&element).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&self.locator).await
    }

    pub async fn is_disabled(&self) -> Result<bool> {
        let element = self.page.element(&self.locator).await?;
        self.page.has_class(&element, "disabled").await
    }
}
