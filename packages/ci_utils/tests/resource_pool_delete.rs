//! Deleting resource pools through the details page

use anyhow::Result;
use std::sync::Arc;

use infra_pages::{Appliance, ResourcePool};
use infra_pages_ci_utils::{
    init_test_logging, test_config, MockConsole, PoolRecord, Screen, TestBed,
};
use infra_pages_utils::ApplianceVersion;
use infra_pages_widgets::WidgetError;

fn pool(bed: &TestBed, name: &str) -> Result<ResourcePool> {
    bed.appliance
        .collections()
        .resource_pools()
        .instantiate(name, Some(&bed.provider))
}

#[tokio::test]
async fn test_delete_and_wait_until_gone() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    bed.console.seed_pool(PoolRecord::new("pool-b"));
    let doomed = pool(&bed, "pool-a")?;
    assert!(doomed.exists().await?);

    let outcome = doomed.delete(false, true).await?.expect("delete waited");
    assert!(outcome.is_reached());
    // the list only catches up after the provider refresh
    assert!(outcome.attempts() >= 2);
    assert!(bed.mock_provider.refresh_count() >= 1);

    assert!(!doomed.exists().await?);
    assert!(!bed.console.backend_has("pool-a"));
    assert!(pool(&bed, "pool-b")?.exists().await?);
    assert_eq!(bed.console.stats().alerts_accepted, 1);
    Ok(())
}

#[tokio::test]
async fn test_delete_without_wait_returns_on_list_page() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    let doomed = pool(&bed, "pool-a")?;

    assert_eq!(doomed.delete(false, false).await?, None);
    assert_eq!(bed.console.screen(), Screen::PoolList);
    assert!(!bed.console.backend_has("pool-a"));
    // not refreshed yet, the list still shows the pool
    assert!(doomed.exists().await?);
    assert_eq!(bed.mock_provider.refresh_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_cancelled_delete_keeps_pool() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    let kept = pool(&bed, "pool-a")?;

    assert_eq!(kept.delete(true, false).await?, None);
    assert_eq!(bed.console.screen(), Screen::PoolDetails("pool-a".to_string()));
    assert_eq!(bed.console.stats().alerts_dismissed, 1);
    assert_eq!(bed.console.alert_text(), None);

    assert!(kept.exists().await?);
    assert!(bed.console.backend_has("pool-a"));
    Ok(())
}

#[tokio::test]
async fn test_delete_uses_pre_5_9_label() -> Result<()> {
    let bed = TestBed::new("5.8.3.0")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    let doomed = pool(&bed, "pool-a")?;

    let outcome = doomed.delete(false, true).await?.expect("delete waited");
    assert!(outcome.is_reached());
    assert!(!bed.console.backend_has("pool-a"));
    Ok(())
}

#[tokio::test]
async fn test_delete_with_mismatched_version_finds_no_menu_item() -> Result<()> {
    init_test_logging();
    let console = Arc::new(MockConsole::new(ApplianceVersion::parse("5.8.3")?));
    console.seed_pool(PoolRecord::new("pool-a"));
    let appliance = Appliance::new(test_config("5.9.0"), console.clone())?;
    let pool = appliance
        .collections()
        .resource_pools()
        .instantiate("pool-a", None)?;

    let err = pool.delete(false, false).await.unwrap_err();
    match err.downcast_ref::<WidgetError>() {
        Some(WidgetError::MenuItemNotFound { menu, item }) => {
            assert_eq!(menu, "Configuration");
            assert_eq!(item, "Remove Resource Pool from Inventory");
        }
        other => panic!("unexpected error: {other:?} ({err})"),
    }
    assert!(console.backend_has("pool-a"));
    Ok(())
}

#[tokio::test]
async fn test_delete_wait_times_out_when_inventory_never_syncs() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    // without a provider nothing refreshes the list
    let doomed = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("pool-a", None)?;

    let outcome = doomed.delete(false, true).await?.expect("delete waited");
    assert!(outcome.is_timed_out());
    assert!(!bed.console.backend_has("pool-a"));
    assert!(bed.console.listed_has("pool-a"));
    assert_eq!(bed.mock_provider.refresh_count(), 0);
    Ok(())
}
