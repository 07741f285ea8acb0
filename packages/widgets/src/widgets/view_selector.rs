use anyhow::Result;

use crate::{
    browser::{Element, Locator},
    error::WidgetError,
    page::Page,
};

/// Grid/tile/list switch of a collection toolbar.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    page: Page,
}

impl ViewSelector {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn locator() -> Locator {
        Locator::xpath("//div[contains(@class, 'toolbar-pf-view-selector')]")
    }

    pub fn button_locator() -> Locator {
        Locator::xpath(".//button")
    }

    async fn buttons(&self) -> Result<Vec<(Element, String)>> {
        let root = self.page.element(&Self::locator()).await?;
        let mut buttons = Vec::new();
        for element in self.page.children(&root, &Self::button_locator()).await? {
            let title = self
                .page
                .attribute(&element, "title")
                .await?
                .unwrap_or_default();
            buttons.push((element, title));
        }
        Ok(buttons)
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator()).await
    }

    /// Titles of the available modes.
    pub async fn modes(&self) -> Result<Vec<String>> {
        Ok(self.buttons().await?.into_iter().map(|(_, t)| t).collect())
    }

    pub async fn selected(&self) -> Result<Option<String>> {
        for (element, title) in self.buttons().await? {
            if self.page.has_class(&element, "active").await? {
                return Ok(Some(title));
            }
        }
        Ok(None)
    }

    pub async fn select(&self, mode: &str) -> Result<()> {
        let (element, _) = self
            .buttons()
            .await?
            .into_iter()
            .find(|(_, title)| title == mode)
            .ok_or_else(|| WidgetError::ItemNotFound {
                name: mode.to_string(),
            })?;
        self.page.click(&element).await?;
        self.page.flush_widget_cache();
        Ok(())
    }
}
