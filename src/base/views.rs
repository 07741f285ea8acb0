use anyhow::Result;
use async_trait::async_trait;

use infra_pages_utils::UserCredential;
use infra_pages_widgets::{
    Button, FlashMessages, Locator, NavigationMenu, Page, Text, TextInput, View,
};

use crate::appliance::Appliance;

/// Frame around every page shown after login.
#[derive(Debug, Clone)]
pub struct BaseLoggedInPage {
    page: Page,
    expected_user: String,
    pub navigation: NavigationMenu,
    pub flash: FlashMessages,
    pub current_user: Text,
    pub logout_link: Button,
}

impl BaseLoggedInPage {
    pub fn new(page: &Page, expected_user: &str) -> Self {
        Self {
            page: page.clone(),
            expected_user: expected_user.to_string(),
            navigation: NavigationMenu::new(page),
            flash: FlashMessages::new(page),
            current_user: Text::new(page, Self::user_locator()),
            logout_link: Button::new(page, Self::logout_locator()),
        }
    }

    pub fn for_appliance(appliance: &Appliance, page: &Page) -> Self {
        Self::new(page, &appliance.config().user.display_name)
    }

    pub fn user_locator() -> Locator {
        Locator::xpath("//li[contains(@class, 'dropdown')]/a[@id='user_menu']")
    }

    pub fn logout_locator() -> Locator {
        Locator::xpath("//a[@id='logout']")
    }

    pub async fn logged_in(&self) -> Result<bool> {
        self.current_user.is_displayed().await
    }

    pub async fn logged_in_as_current_user(&self) -> Result<bool> {
        Ok(self.logged_in().await? && self.current_user.text().await? == self.expected_user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.logout_link.click().await?;
        self.page.flush_widget_cache();
        Ok(())
    }
}

#[async_trait]
impl View for BaseLoggedInPage {
    fn page(&self) -> &Page {
        &self.page
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.logged_in_as_current_user().await
    }
}

#[derive(Debug, Clone)]
pub struct LoginPage {
    page: Page,
    pub username: TextInput,
    pub password: TextInput,
    pub login: Button,
}

impl LoginPage {
    pub fn new(page: &Page) -> Self {
        Self {
            page: page.clone(),
            username: TextInput::with_id(page, "user_name"),
            password: TextInput::with_id(page, "user_password"),
            login: Button::new(page, Self::login_locator()),
        }
    }

    pub fn login_locator() -> Locator {
        Locator::xpath("//a[@id='login']")
    }

    pub async fn log_in(&self, user: &UserCredential) -> Result<()> {
        log::info!("Logging in as {}", user.username);
        self.username.fill(&user.username).await?;
        self.password.fill(&user.password).await?;
        self.login.click().await?;
        self.page.flush_widget_cache();
        Ok(())
    }
}

#[async_trait]
impl View for LoginPage {
    fn page(&self) -> &Page {
        &self.page
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.page.is_present(self.username.locator()).await
    }
}
