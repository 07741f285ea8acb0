use anyhow::Result;
use async_trait::async_trait;

use infra_pages_widgets::{
    Accordion, BreadCrumb, Button, Dropdown, EntitiesList, FlashMessages, Page, Search,
    SummaryTable, Text, View, ViewSelector,
};

use super::DetailSection;
use crate::{appliance::Appliance, base::BaseLoggedInPage};

/// Main menu path of the resource pool pages.
pub const NAV_CHAIN: [&str; 3] = ["Compute", "Infrastructure", "Resource Pools"];

pub const ALL_TITLE: &str = "Resource Pools";

/// The toolbar on the main page
#[derive(Debug, Clone)]
pub struct ResourcePoolToolbar {
    pub configuration: Dropdown,
    pub policy: Dropdown,
    pub download: Dropdown,
    pub view_selector: ViewSelector,
}

impl ResourcePoolToolbar {
    pub fn new(page: &Page) -> Self {
        Self {
            configuration: Dropdown::new(page, "Configuration"),
            policy: Dropdown::new(page, "Policy"),
            download: Dropdown::new(page, "Download"),
            view_selector: ViewSelector::new(page),
        }
    }
}

/// The toolbar on the details page
#[derive(Debug, Clone)]
pub struct ResourcePoolDetailsToolbar {
    pub configuration: Dropdown,
    pub policy: Dropdown,
    pub download: Button,
}

impl ResourcePoolDetailsToolbar {
    pub const DOWNLOAD_TITLE: &'static str = "Download summary in PDF format";

    pub fn new(page: &Page) -> Self {
        Self {
            configuration: Dropdown::new(page, "Configuration"),
            policy: Dropdown::new(page, "Policy"),
            download: Button::titled(page, Self::DOWNLOAD_TITLE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourcePoolDetailsAccordion {
    pub properties: Accordion,
    pub relationships: Accordion,
}

impl ResourcePoolDetailsAccordion {
    pub fn new(page: &Page) -> Self {
        Self {
            properties: Accordion::new(page, "Properties"),
            relationships: Accordion::new(page, "Relationships"),
        }
    }
}

/// Entities on the details page
#[derive(Debug, Clone)]
pub struct ResourcePoolDetailsEntities {
    pub breadcrumb: BreadCrumb,
    pub title: Text,
    pub properties: SummaryTable,
    pub relationships: SummaryTable,
    pub smart_management: SummaryTable,
}

impl ResourcePoolDetailsEntities {
    pub fn new(page: &Page) -> Self {
        Self {
            breadcrumb: BreadCrumb::new(page),
            title: Text::new(page, EntitiesList::title_locator()),
            properties: SummaryTable::new(page, &DetailSection::Properties.to_string()),
            relationships: SummaryTable::new(page, &DetailSection::Relationships.to_string()),
            smart_management: SummaryTable::new(
                page,
                &DetailSection::SmartManagement.to_string(),
            ),
        }
    }

    pub fn table(&self, section: DetailSection) -> &SummaryTable {
        match section {
            DetailSection::Properties => &self.properties,
            DetailSection::Relationships => &self.relationships,
            DetailSection::SmartManagement => &self.smart_management,
        }
    }
}

/// Header and main menu checks shared by the resource pool views.
#[derive(Debug, Clone)]
pub struct ResourcePoolView {
    pub base: BaseLoggedInPage,
    pub title: Text,
}

impl ResourcePoolView {
    pub fn new(appliance: &Appliance, page: &Page) -> Self {
        Self {
            base: BaseLoggedInPage::for_appliance(appliance, page),
            title: Text::new(page, EntitiesList::title_locator()),
        }
    }

    pub async fn in_resource_pool(&self) -> Result<bool> {
        Ok(self.base.logged_in_as_current_user().await?
            && self.base.navigation.currently_selected().await? == NAV_CHAIN)
    }
}

/// The list of all resource pools
#[derive(Debug, Clone)]
pub struct ResourcePoolAllView {
    page: Page,
    pub common: ResourcePoolView,
    pub toolbar: ResourcePoolToolbar,
    pub search: Search,
    pub entities: EntitiesList,
}

impl ResourcePoolAllView {
    pub fn new(appliance: &Appliance) -> Self {
        let page = appliance.new_page();
        Self {
            common: ResourcePoolView::new(appliance, &page),
            toolbar: ResourcePoolToolbar::new(&page),
            search: Search::new(&page),
            entities: EntitiesList::new(&page),
            page,
        }
    }

    pub fn flash(&self) -> &FlashMessages {
        &self.common.base.flash
    }
}

#[async_trait]
impl View for ResourcePoolAllView {
    fn page(&self) -> &Page {
        &self.page
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.common.in_resource_pool().await? && self.entities.title().await? == ALL_TITLE)
    }
}

/// The details page of one resource pool
#[derive(Debug, Clone)]
pub struct ResourcePoolDetailsView {
    page: Page,
    pool_name: String,
    pub common: ResourcePoolView,
    pub toolbar: ResourcePoolDetailsToolbar,
    pub sidebar: ResourcePoolDetailsAccordion,
    pub entities: ResourcePoolDetailsEntities,
}

impl ResourcePoolDetailsView {
    pub fn new(appliance: &Appliance, pool_name: &str) -> Self {
        let page = appliance.new_page();
        Self {
            pool_name: pool_name.to_string(),
            common: ResourcePoolView::new(appliance, &page),
            toolbar: ResourcePoolDetailsToolbar::new(&page),
            sidebar: ResourcePoolDetailsAccordion::new(&page),
            entities: ResourcePoolDetailsEntities::new(&page),
            page,
        }
    }

    pub fn expected_title(&self) -> String {
        summary_title(&self.pool_name)
    }

    pub fn flash(&self) -> &FlashMessages {
        &self.common.base.flash
    }
}

pub fn summary_title(pool_name: &str) -> String {
    format!("{pool_name} (Summary)")
}

#[async_trait]
impl View for ResourcePoolDetailsView {
    fn page(&self) -> &Page {
        &self.page
    }

    async fn is_displayed(&self) -> Result<bool> {
        let expected = self.expected_title();
        Ok(self.common.in_resource_pool().await?
            && self.entities.title.text().await? == expected
            && self.entities.breadcrumb.active_location().await? == expected)
    }
}
