use anyhow::Result;

use crate::{browser::Locator, page::Page};

#[derive(Debug, Clone)]
pub struct BreadCrumb {
    page: Page,
}

impl BreadCrumb {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn locator() -> Locator {
        Locator::xpath("//ol[contains(@class, 'breadcrumb')]")
    }

    pub fn location_locator() -> Locator {
        Locator::xpath("./li")
    }

    pub fn active_locator() -> Locator {
        Locator::xpath("./li[contains(@class, 'active')]")
    }

    pub async fn locations(&self) -> Result<Vec<String>> {
        let root = self.page.element(&Self::locator()).await?;
        let mut locations = Vec::new();
        for element in self.page.children(&root, &Self::location_locator()).await? {
            locations.push(self.page.text(&element).await?);
        }
        Ok(locations)
    }

    pub async fn active_location(&self) -> Result<String> {
        let root = self.page.element(&Self::locator()).await?;
        let active = self.page.child(&root, &Self::active_locator()).await?;
        self.page.text(&active).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator()).await
    }
}
