use anyhow::Result;

use crate::{
    browser::{xpath_literal, Locator},
    error::WidgetError,
    page::Page,
};

/// Vertical main menu of the console.
#[derive(Debug, Clone)]
pub struct NavigationMenu {
    page: Page,
}

impl NavigationMenu {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn locator() -> Locator {
        Locator::xpath("//div[@id='main-menu']")
    }

    pub fn active_locator() -> Locator {
        Locator::xpath(".//li[contains(@class, 'active')]/a")
    }

    pub fn item_locator(text: &str) -> Locator {
        Locator::xpath(format!(".//li/a[normalize-space(.)={}]", xpath_literal(text)))
    }

    /// Labels of the selected entries, outermost first.
    pub async fn currently_selected(&self) -> Result<Vec<String>> {
        let root = self.page.element(&Self::locator()).await?;
        let mut selected = Vec::new();
        for element in self.page.children(&root, &Self::active_locator()).await? {
            selected.push(self.page.text(&element).await?);
        }
        Ok(selected)
    }

    pub async fn select(&self, path: &[&str]) -> Result<()> {
        let root = self.page.element(&Self::locator()).await?;
        for item in path {
            let element = self
                .page
                .children(&root, &Self::item_locator(item))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| WidgetError::MenuItemNotFound {
                    menu: "main menu".to_string(),
                    item: item.to_string(),
                })?;
            self.page.click(&element).await?;
        }
        log::debug!("Selected main menu path {}", path.join(" > "));
        Ok(())
    }
}
