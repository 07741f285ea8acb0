use anyhow::Result;

use crate::{
    browser::{Element, Locator},
    error::WidgetError,
    page::Page,
};

/// Entity list of a collection page, with its title and paginator.
#[derive(Debug, Clone)]
pub struct EntitiesList {
    page: Page,
    pub paginator: Paginator,
}

impl EntitiesList {
    pub fn new(page: &Page) -> Self {
        Self {
            page: page.clone(),
            paginator: Paginator::new(page),
        }
    }

    pub fn title_locator() -> Locator {
        Locator::xpath("//div[@id='main-content']//h1")
    }

    pub fn row_locator() -> Locator {
        Locator::xpath("//div[@id='main-content']//table[contains(@class, 'table')]/tbody/tr")
    }

    pub fn name_locator() -> Locator {
        Locator::xpath("./td[contains(@class, 'name')]")
    }

    pub async fn title(&self) -> Result<String> {
        let element = self.page.element(&Self::title_locator()).await?;
        self.page.text(&element).await
    }

    async fn rows(&self) -> Result<Vec<(Element, String)>> {
        let mut rows = Vec::new();
        for row in self.page.elements(&Self::row_locator()).await? {
            let cell = self.page.child(&row, &Self::name_locator()).await?;
            let name = self.page.text(&cell).await?;
            rows.push((row, name));
        }
        Ok(rows)
    }

    /// Names of the entities listed on the current page.
    pub async fn entity_names(&self) -> Result<Vec<String>> {
        Ok(self.rows().await?.into_iter().map(|(_, name)| name).collect())
    }

    /// Row of the entity called `name`.
    ///
    /// With `surf_pages` every page is searched starting from the first one;
    /// otherwise only the current page is.
    pub async fn get_entity(&self, name: &str, surf_pages: bool) -> Result<Element> {
        let paged = surf_pages && self.paginator.is_displayed().await?;
        if paged {
            self.paginator.first_page().await?;
        }

        loop {
            if let Some((row, _)) = self.rows().await?.into_iter().find(|(_, n)| n == name) {
                return Ok(row);
            }
            if !paged || !self.paginator.next_page().await? {
                break;
            }
        }

        Err(WidgetError::ItemNotFound {
            name: name.to_string(),
        }
        .into())
    }
}

#[derive(Debug, Clone)]
pub struct Paginator {
    page: Page,
}

impl Paginator {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn locator() -> Locator {
        Locator::xpath("//div[@id='paging_div']")
    }

    pub fn first_locator() -> Locator {
        Locator::xpath(".//li[contains(@class, 'first')]")
    }

    pub fn next_locator() -> Locator {
        Locator::xpath(".//li[contains(@class, 'next')]")
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator()).await
    }

    async fn control(&self, locator: &Locator) -> Result<Element> {
        let root = self.page.element(&Self::locator()).await?;
        self.page.child(&root, locator).await
    }

    pub async fn is_first(&self) -> Result<bool> {
        let first = self.control(&Self::first_locator()).await?;
        self.page.has_class(&first, "disabled").await
    }

    pub async fn is_last(&self) -> Result<bool> {
        let next = self.control(&Self::next_locator()).await?;
        self.page.has_class(&next, "disabled").await
    }

    /// Go to the first page; `false` when already there.
    pub async fn first_page(&self) -> Result<bool> {
        self.move_by(&Self::first_locator()).await
    }

    /// Go to the next page; `false` when already on the last one.
    pub async fn next_page(&self) -> Result<bool> {
        self.move_by(&Self::next_locator()).await
    }

    async fn move_by(&self, locator: &Locator) -> Result<bool> {
        let control = self.control(locator).await?;
        if self.page.has_class(&control, "disabled").await? {
            return Ok(false);
        }
        self.page.click(&control).await?;
        // the list is re-rendered, earlier lookups point at the old rows
        self.page.flush_widget_cache();
        Ok(true)
    }
}
