//! Handle on the appliance under test.

use anyhow::Result;
use std::{fmt, sync::Arc, time::Duration};

use infra_pages_utils::{ApplianceVersion, ConsoleConfig, WaitOptions};
use infra_pages_widgets::{downcast_view, Browser, Page, View};

use crate::{
    base::server::Server,
    error::PageError,
    infrastructure::resource_pool::ResourcePoolCollection,
    navigation::{default_registry, Navigable, Navigator, StepRegistry},
};

struct ApplianceInner {
    config: ConsoleConfig,
    version: ApplianceVersion,
    browser: Arc<dyn Browser>,
    navigator: Navigator,
}

/// Cheap to clone; every entity carries one.
#[derive(Clone)]
pub struct Appliance {
    inner: Arc<ApplianceInner>,
}

impl fmt::Debug for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Appliance")
            .field("base_url", &self.inner.config.base_url)
            .field("version", &self.inner.version.as_str())
            .finish()
    }
}

impl Appliance {
    pub fn new(config: ConsoleConfig, browser: Arc<dyn Browser>) -> Result<Self> {
        Self::with_registry(config, browser, default_registry()?)
    }

    pub fn with_registry(
        config: ConsoleConfig,
        browser: Arc<dyn Browser>,
        registry: StepRegistry,
    ) -> Result<Self> {
        config.validate()?;
        let version = config.version()?;
        log::info!(
            "Appliance {} (version {}) with {} navigation step(s)",
            config.base_url,
            version,
            registry.len()
        );
        Ok(Self {
            inner: Arc::new(ApplianceInner {
                config,
                version,
                browser,
                navigator: Navigator::new(registry),
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn version(&self) -> &ApplianceVersion {
        &self.inner.version
    }

    pub fn browser(&self) -> &Arc<dyn Browser> {
        &self.inner.browser
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    /// Fresh page context with an empty widget cache.
    pub fn new_page(&self) -> Page {
        Page::new(self.inner.browser.clone())
    }

    pub fn server(&self) -> Server {
        Server::new(self.clone())
    }

    pub fn collections(&self) -> Collections {
        Collections {
            appliance: self.clone(),
        }
    }

    /// Wait settings with the configured poll delay.
    pub fn wait_options(&self, timeout: Duration, message: impl Into<String>) -> WaitOptions {
        WaitOptions::new(timeout)
            .delay(self.inner.config.waits.poll_delay())
            .message(message)
    }

    /// Navigate `obj` to `step` and return the view as its concrete type.
    pub async fn navigate_to<V: View>(&self, obj: &dyn Navigable, step: &str) -> Result<V> {
        let view = self.navigator().navigate_to(obj, step).await?;
        downcast_view::<V>(view).ok_or_else(|| {
            PageError::UnexpectedView {
                expected: std::any::type_name::<V>().to_string(),
            }
            .into()
        })
    }
}

impl Navigable for Appliance {
    fn nav_tag(&self) -> &'static str {
        "Appliance"
    }

    fn appliance(&self) -> &Appliance {
        self
    }

    fn attribute(&self, name: &str) -> Option<Arc<dyn Navigable>> {
        match name {
            "server" => Some(Arc::new(self.server())),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!("Appliance({})", self.inner.config.base_url)
    }
}

/// Entry point to the collections of the appliance.
#[derive(Debug, Clone)]
pub struct Collections {
    appliance: Appliance,
}

impl Collections {
    pub fn resource_pools(&self) -> ResourcePoolCollection {
        ResourcePoolCollection::new(self.appliance.clone())
    }
}
