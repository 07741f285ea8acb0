use anyhow::Result;

use crate::{
    browser::{xpath_literal, Element, Locator},
    error::WidgetError,
    page::Page,
};

/// Two-column label/value table on a detail page, found by its header title.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    page: Page,
    title: String,
}

impl SummaryTable {
    pub fn new(page: &Page, title: &str) -> Self {
        Self {
            page: page.clone(),
            title: title.to_string(),
        }
    }

    pub fn locator_for(title: &str) -> Locator {
        Locator::xpath(format!(
            "//table[./thead/tr/th[normalize-space(.)={}]]",
            xpath_literal(title)
        ))
    }

    pub fn row_locator() -> Locator {
        Locator::xpath("./tbody/tr")
    }

    pub fn cell_locator() -> Locator {
        Locator::xpath("./td")
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator_for(&self.title)).await
    }

    async fn row_cells(&self, row: &Element) -> Result<(String, String)> {
        let cells = self.page.children(row, &Self::cell_locator()).await?;
        let label = match cells.first() {
            Some(cell) => self.page.text(cell).await?,
            None => String::new(),
        };
        let value = match cells.get(1) {
            Some(cell) => self.page.text(cell).await?,
            None => String::new(),
        };
        Ok((label, value))
    }

    /// All label/value pairs in display order.
    pub async fn read(&self) -> Result<Vec<(String, String)>> {
        let root = self.page.element(&Self::locator_for(&self.title)).await?;
        let mut pairs = Vec::new();
        for row in self.page.children(&root, &Self::row_locator()).await? {
            pairs.push(self.row_cells(&row).await?);
        }
        Ok(pairs)
    }

    pub async fn fields(&self) -> Result<Vec<String>> {
        Ok(self.read().await?.into_iter().map(|(label, _)| label).collect())
    }

    pub async fn get_text_of(&self, key: &str) -> Result<String> {
        self.read()
            .await?
            .into_iter()
            .find(|(label, _)| label == key)
            .map(|(_, value)| value)
            .ok_or_else(|| {
                WidgetError::RowNotFound {
                    table: self.title.clone(),
                    key: key.to_string(),
                }
                .into()
            })
    }
}
