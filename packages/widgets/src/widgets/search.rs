use anyhow::Result;

use crate::{browser::Locator, page::Page};

/// Simple search box above collection lists.
#[derive(Debug, Clone)]
pub struct Search {
    page: Page,
}

impl Search {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn input_locator() -> Locator {
        Locator::xpath("//input[@id='search_text']")
    }

    pub fn search_button_locator() -> Locator {
        Locator::xpath("//button[@id='searchbtn']")
    }

    pub fn clear_locator() -> Locator {
        Locator::xpath("//a[@id='clear_search']")
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::input_locator()).await
    }

    pub async fn simple_search(&self, text: &str) -> Result<()> {
        let input = self.page.element(&Self::input_locator()).await?;
        self.page.fill(&input, text).await?;
        let button = self.page.element(&Self::search_button_locator()).await?;
        self.page.click(&button).await?;
        self.page.flush_widget_cache();
        Ok(())
    }

    pub async fn clear_simple_search(&self) -> Result<()> {
        let clear = self.page.elements(&Self::clear_locator()).await?;
        match clear.first() {
            Some(link) => {
                self.page.click(link).await?;
                self.page.flush_widget_cache();
                Ok(())
            }
            None => self.simple_search("").await,
        }
    }
}
