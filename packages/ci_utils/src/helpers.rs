use anyhow::Result;
use std::sync::Arc;

use infra_pages::{Appliance, Provider};
use infra_pages_utils::{ApplianceVersion, ConsoleConfig, WaitSettings};

use crate::{console::MockConsole, provider::MockProvider};

pub const PROVIDER_KEY: &str = "vsphere65-nested";

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Default configuration with waits short enough for tests.
pub fn test_config(appliance_version: &str) -> ConsoleConfig {
    ConsoleConfig {
        appliance_version: appliance_version.to_string(),
        waits: WaitSettings {
            poll_delay_ms: 10,
            redirect_timeout_secs: 1,
            delete_timeout_secs: 2,
            exists_timeout_secs: 1,
        },
        ..ConsoleConfig::default()
    }
}

/// Everything a scenario needs: the console, an appliance driving it and a
/// provider whose refresh syncs the console inventory.
pub struct TestBed {
    pub console: Arc<MockConsole>,
    pub appliance: Appliance,
    pub provider: Arc<dyn Provider>,
    pub mock_provider: Arc<MockProvider>,
}

impl TestBed {
    pub fn new(appliance_version: &str) -> Result<Self> {
        init_test_logging();
        let config = test_config(appliance_version);
        let console = Arc::new(MockConsole::new(ApplianceVersion::parse(
            appliance_version,
        )?));
        let appliance = Appliance::new(config, console.clone())?;
        let mock_provider = Arc::new(MockProvider::new(
            "vSphere 6.5 (nested)",
            PROVIDER_KEY,
            console.clone(),
        ));
        let provider: Arc<dyn Provider> = mock_provider.clone();
        Ok(Self {
            console,
            appliance,
            provider,
            mock_provider,
        })
    }
}
