use anyhow::Result;
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use infra_pages::Provider;

use crate::console::MockConsole;

/// Provider whose relationship refresh syncs the simulated console.
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    key: String,
    console: Arc<MockConsole>,
    refreshes: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: &str, key: &str, console: Arc<MockConsole>) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
            console,
            refreshes: AtomicUsize::new(0),
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    async fn refresh_provider_relationships(&self) -> Result<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        log::debug!("Refreshing relationships of provider {}", self.key);
        self.console.sync_inventory();
        Ok(())
    }
}
