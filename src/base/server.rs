use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use infra_pages_widgets::View;

use super::views::{BaseLoggedInPage, LoginPage};
use crate::{
    appliance::Appliance,
    error::PageError,
    navigation::{navigable_ref, NavigateStep, Navigable, Prerequisite, StepRegistry},
};

pub const NAV_TAG: &str = "Server";

/// The console server itself; root of every navigation chain.
#[derive(Debug, Clone)]
pub struct Server {
    appliance: Appliance,
}

impl Server {
    pub fn new(appliance: Appliance) -> Self {
        Self { appliance }
    }

    /// Log in with the configured user unless that user already is.
    pub async fn login(&self) -> Result<BaseLoggedInPage> {
        self.appliance.navigate_to(self, "LoggedIn").await
    }
}

impl Navigable for Server {
    fn nav_tag(&self) -> &'static str {
        NAV_TAG
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
        format!("Server({})", self.appliance.config().base_url)
    }
}

struct LoggedIn;

#[async_trait]
impl NavigateStep for LoggedIn {
    fn view_name(&self) -> &'static str {
        "BaseLoggedInPage"
    }

    fn prerequisite(&self) -> Prerequisite {
        Prerequisite::None
    }

    fn create_view(&self, obj: &dyn Navigable) -> Result<Box<dyn View>> {
        let appliance = obj.appliance();
        Ok(Box::new(BaseLoggedInPage::for_appliance(
            appliance,
            &appliance.new_page(),
        )))
    }

    async fn step(&self, obj: &dyn Navigable, _prerequisite_view: Option<&dyn View>) -> Result<()> {
        let server = navigable_ref::<Server>(obj)?;
        let appliance = &server.appliance;
        let user = &appliance.config().user;

        let page = appliance.new_page();
        let current = BaseLoggedInPage::for_appliance(appliance, &page);
        if current.logged_in().await? {
            log::info!("Logging out the current user to log in as {}", user.username);
            current.logout().await?;
        }

        page.goto(appliance.config().base_url.as_str()).await?;
        LoginPage::new(&page).log_in(user).await?;

        let landing = BaseLoggedInPage::for_appliance(appliance, &appliance.new_page());
        if !landing.logged_in_as_current_user().await? {
            return Err(PageError::LoginFailed {
                username: user.username.clone(),
            }
            .into());
        }
        Ok(())
    }
}

pub fn register_steps(registry: &mut StepRegistry) -> Result<()> {
    registry.register(NAV_TAG, "LoggedIn", LoggedIn)
}
