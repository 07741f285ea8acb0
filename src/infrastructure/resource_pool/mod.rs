//! Infrastructure resource pools.

mod navigation;
pub mod views;

pub use navigation::register_steps;
pub use views::{ResourcePoolAllView, ResourcePoolDetailsView};

use anyhow::Result;
use once_cell::sync::Lazy;
use std::{
    fmt,
    sync::{Arc, Weak},
};
use strum::{Display, EnumIter, EnumString};

use infra_pages_utils::{
    wait_for, wait_for_with_retry, ApplianceVersion, VersionPicker, WaitOutcome,
};
use infra_pages_widgets::{Page, View};

use crate::{appliance::Appliance, error::PageError, navigation::Navigable, provider::Provider};

pub const POOL_NAV_TAG: &str = "ResourcePool";
pub const COLLECTION_NAV_TAG: &str = "ResourcePoolCollection";

pub const DELETE_SUCCESS_MESSAGE: &str = "The selected Resource Pools was deleted";

static REMOVE_ACTION: Lazy<VersionPicker<&'static str>> = Lazy::new(|| {
    VersionPicker::new(vec![
        (ApplianceVersion::lowest(), "Remove Resource Pool"),
        (
            ApplianceVersion::new(5, 9, 0),
            "Remove Resource Pool from Inventory",
        ),
    ])
});

/// Label of the Configuration item that removes a pool on `version`.
pub fn remove_action_label(version: &ApplianceVersion) -> &'static str {
    REMOVE_ACTION
        .pick(version)
        .copied()
        .unwrap_or("Remove Resource Pool")
}

/// Summary tables of the details page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum DetailSection {
    #[strum(serialize = "Properties")]
    Properties,
    #[strum(serialize = "Relationships")]
    Relationships,
    #[strum(serialize = "Smart Management")]
    SmartManagement,
}

/// Model of an infrastructure resource pool.
#[derive(Clone)]
pub struct ResourcePool {
    name: String,
    provider: Option<Weak<dyn Provider>>,
    collection: ResourcePoolCollection,
}

impl fmt::Display for ResourcePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.provider() {
            Some(provider) => write!(
                f,
                "ResourcePool(name='{}', provider_key='{}')",
                self.name,
                provider.key()
            ),
            None => write!(f, "ResourcePool(name='{}', provider_key=None)", self.name),
        }
    }
}

impl fmt::Debug for ResourcePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("name", &self.name)
            .field("provider_key", &self.provider().map(|p| p.key().to_string()))
            .finish()
    }
}

impl ResourcePool {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning provider, if it is still alive.
    pub fn provider(&self) -> Option<Arc<dyn Provider>> {
        self.provider.as_ref().and_then(Weak::upgrade)
    }

    pub fn parent(&self) -> &ResourcePoolCollection {
        &self.collection
    }

    pub fn appliance(&self) -> &Appliance {
        &self.collection.appliance
    }

    /// Re-sync the provider and reload the page, so lists show current data.
    async fn refresh_inventory(&self, page: &Page) -> Result<()> {
        if let Some(provider) = self.provider() {
            provider.refresh_provider_relationships().await?;
        }
        page.refresh().await
    }

    /// Delete the pool through its details page.
    ///
    /// Cancelling dismisses the confirmation and stays on the details page.
    /// With `wait` the list is polled until the pool is gone; the outcome of
    /// that wait is returned, `None` when not waiting.
    pub async fn delete(&self, cancel: bool, wait: bool) -> Result<Option<WaitOutcome>> {
        let appliance = self.appliance();
        let view: ResourcePoolDetailsView = appliance.navigate_to(self, "Details").await?;
        let item = remove_action_label(appliance.version());
        view.toolbar
            .configuration
            .item_select(item, Some(!cancel))
            .await?;

        // cancel doesn't redirect, confirmation does
        view.flush_widget_cache();
        let waits = &appliance.config().waits;
        let redirect = appliance.wait_options(
            waits.redirect_timeout(),
            format!("{self}: page shown after delete"),
        );

        let page = if cancel {
            let details = ResourcePoolDetailsView::new(appliance, &self.name);
            if wait_for(|| details.is_displayed(), &redirect)
                .await?
                .is_timed_out()
            {
                log::warn!("{self}: details page not displayed after cancelling delete");
            }
            details.page().clone()
        } else {
            let all = ResourcePoolAllView::new(appliance);
            if wait_for(|| all.is_displayed(), &redirect)
                .await?
                .is_timed_out()
            {
                log::warn!("{self}: list page not displayed after delete");
            }
            all.flash().assert_success_message(DELETE_SUCCESS_MESSAGE).await?;
            all.page().clone()
        };

        if !wait {
            return Ok(None);
        }

        let pool = self;
        let page = &page;
        let outcome = wait_for_with_retry(
            move || async move { Ok::<_, anyhow::Error>(!pool.exists().await?) },
            move || pool.refresh_inventory(page),
            &appliance.wait_options(
                waits.delete_timeout(),
                "Wait for resource pool to be deleted",
            ),
        )
        .await?;
        Ok(Some(outcome))
    }

    /// Wait for the pool to show up in the list.
    pub async fn wait_for_exists(&self) -> Result<WaitOutcome> {
        let appliance = self.appliance();
        let view: ResourcePoolAllView = appliance.navigate_to(&self.collection, "All").await?;

        let pool = self;
        let page = view.page();
        wait_for_with_retry(
            move || pool.exists(),
            move || pool.refresh_inventory(page),
            &appliance.wait_options(
                appliance.config().waits.exists_timeout(),
                "Wait resource pool to appear",
            ),
        )
        .await
    }

    /// Value of `key` in the summary table `section` of the details page.
    ///
    /// An unknown section gives `Ok(None)`; a key missing from a known
    /// section is an error.
    pub async fn get_detail(&self, section: &str, key: &str) -> Result<Option<String>> {
        let view: ResourcePoolDetailsView = self.appliance().navigate_to(self, "Details").await?;
        let Ok(section) = section.parse::<DetailSection>() else {
            log::debug!("{self}: no summary section called '{section}'");
            return Ok(None);
        };
        Ok(Some(view.entities.table(section).get_text_of(key).await?))
    }

    /// Whether the pool is listed on the current page of the list view.
    pub async fn exists(&self) -> Result<bool> {
        let view: ResourcePoolAllView = self
            .appliance()
            .navigate_to(&self.collection, "All")
            .await?;
        Ok(view
            .entities
            .entity_names()
            .await?
            .iter()
            .any(|name| name == &self.name))
    }
}

impl Navigable for ResourcePool {
    fn nav_tag(&self) -> &'static str {
        POOL_NAV_TAG
    }

    fn appliance(&self) -> &Appliance {
        &self.collection.appliance
    }

    fn attribute(&self, name: &str) -> Option<Arc<dyn Navigable>> {
        match name {
            "parent" => Some(Arc::new(self.collection.clone())),
            "appliance" => Some(Arc::new(self.collection.appliance.clone())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Collection of resource pools. Holds no membership of its own.
#[derive(Debug, Clone)]
pub struct ResourcePoolCollection {
    appliance: Appliance,
}

impl ResourcePoolCollection {
    pub fn new(appliance: Appliance) -> Self {
        Self { appliance }
    }

    pub fn instantiate(
        &self,
        name: &str,
        provider: Option<&Arc<dyn Provider>>,
    ) -> Result<ResourcePool> {
        if name.trim().is_empty() {
            return Err(PageError::InvalidEntity {
                kind: "ResourcePool".to_string(),
                reason: "name must not be empty".to_string(),
            }
            .into());
        }
        Ok(ResourcePool {
            name: name.to_string(),
            provider: provider.map(Arc::downgrade),
            collection: self.clone(),
        })
    }

    /// Pools listed on the current page of the list view.
    pub async fn all(&self) -> Result<Vec<ResourcePool>> {
        let view: ResourcePoolAllView = self.appliance.navigate_to(self, "All").await?;
        view.entities
            .entity_names()
            .await?
            .iter()
            .map(|name| self.instantiate(name, None))
            .collect()
    }
}

impl Navigable for ResourcePoolCollection {
    fn nav_tag(&self) -> &'static str {
        COLLECTION_NAV_TAG
    }

    fn appliance(&self) -> &Appliance {
        &self.appliance
    }

    fn attribute(&self, name: &str) -> Option<Arc<dyn Navigable>> {
        match name {
            "appliance" => Some(Arc::new(self.appliance.clone())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        "ResourcePoolCollection".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn v(raw: &str) -> ApplianceVersion {
        ApplianceVersion::parse(raw).unwrap()
    }

    #[test]
    fn test_remove_action_label_by_version() {
        assert_eq!(remove_action_label(&v("5.8.3.0")), "Remove Resource Pool");
        assert_eq!(
            remove_action_label(&v("5.9.0.1")),
            "Remove Resource Pool from Inventory"
        );
        assert_eq!(
            remove_action_label(&v("5.10")),
            "Remove Resource Pool from Inventory"
        );
        assert_eq!(
            remove_action_label(&ApplianceVersion::latest()),
            "Remove Resource Pool from Inventory"
        );
    }

    #[test]
    fn test_detail_sections_parse_from_titles() {
        assert_eq!(
            "Smart Management".parse::<DetailSection>().ok(),
            Some(DetailSection::SmartManagement)
        );
        assert!("smart management".parse::<DetailSection>().is_err());
        assert!("Power Management".parse::<DetailSection>().is_err());

        let titles = DetailSection::iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(titles, ["Properties", "Relationships", "Smart Management"]);
    }
}
