use anyhow::Result;
use async_trait::async_trait;

use infra_pages_widgets::{View, WidgetError};

use super::{
    views::{ResourcePoolAllView, ResourcePoolDetailsView, NAV_CHAIN},
    ResourcePool, COLLECTION_NAV_TAG, POOL_NAV_TAG,
};
use crate::{
    base::{server, BaseLoggedInPage},
    error::PageError,
    navigation::{
        navigable_ref, prerequisite_view, NavigateStep, Navigable, Prerequisite, StepRegistry,
    },
};

/// The list page of all resource pools
struct All;

#[async_trait]
impl NavigateStep for All {
    fn view_name(&self) -> &'static str {
        "ResourcePoolAllView"
    }

    fn prerequisite(&self) -> Prerequisite {
        Prerequisite::Attribute {
            path: "appliance.server",
            target: server::NAV_TAG,
            step: "LoggedIn",
        }
    }

    fn create_view(&self, obj: &dyn Navigable) -> Result<Box<dyn View>> {
        Ok(Box::new(ResourcePoolAllView::new(obj.appliance())))
    }

    async fn step(&self, _obj: &dyn Navigable, prerequisite: Option<&dyn View>) -> Result<()> {
        let logged_in = prerequisite_view::<BaseLoggedInPage>(prerequisite)?;
        logged_in.navigation.select(&NAV_CHAIN).await
    }
}

/// The details page of one resource pool
struct Details;

#[async_trait]
impl NavigateStep for Details {
    fn view_name(&self) -> &'static str {
        "ResourcePoolDetailsView"
    }

    fn prerequisite(&self) -> Prerequisite {
        Prerequisite::Attribute {
            path: "parent",
            target: COLLECTION_NAV_TAG,
            step: "All",
        }
    }

    fn create_view(&self, obj: &dyn Navigable) -> Result<Box<dyn View>> {
        let pool = navigable_ref::<ResourcePool>(obj)?;
        Ok(Box::new(ResourcePoolDetailsView::new(
            obj.appliance(),
            pool.name(),
        )))
    }

    async fn step(&self, obj: &dyn Navigable, prerequisite: Option<&dyn View>) -> Result<()> {
        let pool = navigable_ref::<ResourcePool>(obj)?;
        let all = prerequisite_view::<ResourcePoolAllView>(prerequisite)?;

        let row = match all.entities.get_entity(pool.name(), true).await {
            Ok(row) => row,
            Err(err) => {
                if let Some(WidgetError::ItemNotFound { .. }) = err.downcast_ref::<WidgetError>() {
                    return Err(PageError::ResourcePoolNotFound {
                        name: pool.name().to_string(),
                    }
                    .into());
                }
                return Err(err);
            }
        };
        all.page().click(&row).await
    }
}

pub fn register_steps(registry: &mut StepRegistry) -> Result<()> {
    registry.register(COLLECTION_NAV_TAG, "All", All)?;
    registry.register(POOL_NAV_TAG, "Details", Details)?;
    Ok(())
}
