use anyhow::Result;

use crate::{
    browser::{xpath_literal, Locator},
    error::WidgetError,
    page::Page,
};

/// Toolbar dropdown identified by the label of its toggle button.
#[derive(Debug, Clone)]
pub struct Dropdown {
    page: Page,
    text: String,
}

impl Dropdown {
    pub fn new(page: &Page, text: &str) -> Self {
        Self {
            page: page.clone(),
            text: text.to_string(),
        }
    }

    pub fn locator_for(text: &str) -> Locator {
        Locator::xpath(format!(
            "//div[contains(@class, 'dropdown') and ./button[normalize-space(.)={}]]",
            xpath_literal(text)
        ))
    }

    pub fn button_locator() -> Locator {
        Locator::xpath("./button")
    }

    pub fn item_locator() -> Locator {
        Locator::xpath("./ul/li/a")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator_for(&self.text)).await
    }

    pub async fn items(&self) -> Result<Vec<String>> {
        let root = self.page.element(&Self::locator_for(&self.text)).await?;
        let mut items = Vec::new();
        for element in self.page.children(&root, &Self::item_locator()).await? {
            items.push(self.page.text(&element).await?);
        }
        Ok(items)
    }

    /// Open the dropdown and click `item`.
    ///
    /// `handle_alert` settles the confirmation the item raises: `Some(true)`
    /// accepts it, `Some(false)` dismisses it, `None` leaves it open.
    pub async fn item_select(&self, item: &str, handle_alert: Option<bool>) -> Result<()> {
        let root = self.page.element(&Self::locator_for(&self.text)).await?;
        let toggle = self.page.child(&root, &Self::button_locator()).await?;
        self.page.click(&toggle).await?;

        let mut target = None;
        for element in self.page.children(&root, &Self::item_locator()).await? {
            if self.page.text(&element).await? == item {
                target = Some(element);
                break;
            }
        }
        let target = target.ok_or_else(|| WidgetError::MenuItemNotFound {
            menu: self.text.clone(),
            item: item.to_string(),
        })?;

        log::debug!("Selecting '{}' from dropdown '{}'", item, self.text);
        self.page.click(&target).await?;

        if let Some(accept) = handle_alert {
            if !self.page.browser().handle_alert(accept).await? {
                log::debug!("No alert appeared after selecting '{item}'");
            }
        }
        Ok(())
    }
}
