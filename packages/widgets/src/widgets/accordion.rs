use anyhow::Result;

use crate::{
    browser::{xpath_literal, Element, Locator},
    error::WidgetError,
    page::Page,
};

/// Collapsible sidebar panel.
#[derive(Debug, Clone)]
pub struct Accordion {
    page: Page,
    title: String,
}

impl Accordion {
    pub fn new(page: &Page, title: &str) -> Self {
        Self {
            page: page.clone(),
            title: title.to_string(),
        }
    }

    pub fn locator_for(title: &str) -> Locator {
        Locator::xpath(format!(
            "//div[contains(@class, 'panel') and ./div/h4/a[normalize-space(.)={}]]",
            xpath_literal(title)
        ))
    }

    pub fn header_locator() -> Locator {
        Locator::xpath("./div/h4/a")
    }

    pub fn body_locator() -> Locator {
        Locator::xpath("./div[contains(@class, 'panel-collapse')]")
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tree(&self) -> Tree {
        Tree {
            accordion: self.clone(),
        }
    }

    async fn root(&self) -> Result<Element> {
        self.page.element(&Self::locator_for(&self.title)).await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(&Self::locator_for(&self.title)).await
    }

    pub async fn is_opened(&self) -> Result<bool> {
        let root = self.root().await?;
        let body = self.page.child(&root, &Self::body_locator()).await?;
        self.page.has_class(&body, "in").await
    }

    pub async fn open(&self) -> Result<()> {
        if self.is_opened().await? {
            return Ok(());
        }
        let root = self.root().await?;
        let header = self.page.child(&root, &Self::header_locator()).await?;
        log::debug!("Opening accordion '{}'", self.title);
        self.page.click(&header).await
    }
}

/// Node tree inside an accordion body.
#[derive(Debug, Clone)]
pub struct Tree {
    accordion: Accordion,
}

impl Tree {
    pub fn node_locator() -> Locator {
        Locator::xpath(".//li[contains(@class, 'node')]")
    }

    async fn node_elements(&self) -> Result<Vec<(Element, String)>> {
        self.accordion.open().await?;
        let page = &self.accordion.page;
        let root = self.accordion.root().await?;
        let body = page.child(&root, &Accordion::body_locator()).await?;
        let mut nodes = Vec::new();
        for element in page.children(&body, &Self::node_locator()).await? {
            let text = page.text(&element).await?;
            nodes.push((element, text));
        }
        Ok(nodes)
    }

    pub async fn nodes(&self) -> Result<Vec<String>> {
        Ok(self
            .node_elements()
            .await?
            .into_iter()
            .map(|(_, text)| text)
            .collect())
    }

    pub async fn click_node(&self, text: &str) -> Result<()> {
        let (element, _) = self
            .node_elements()
            .await?
            .into_iter()
            .find(|(_, node)| node == text)
            .ok_or_else(|| WidgetError::ItemNotFound {
                name: text.to_string(),
            })?;
        self.accordion.page.click(&element).await
    }
}
