//! Waiting for resource pools to show up in the list

use anyhow::Result;
use std::time::Duration;

use infra_pages_ci_utils::{PoolRecord, TestBed};

#[tokio::test]
async fn test_wait_for_exists_after_provider_refresh() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.add_pool(PoolRecord::new("pool-new"));
    let pool = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("pool-new", Some(&bed.provider))?;
    assert!(!pool.exists().await?);

    let outcome = pool.wait_for_exists().await?;
    assert!(outcome.is_reached());
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(bed.mock_provider.refresh_count(), 1);
    assert!(pool.exists().await?);
    Ok(())
}

#[tokio::test]
async fn test_wait_for_exists_times_out() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    let pool = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("never-created", Some(&bed.provider))?;

    let outcome = pool.wait_for_exists().await?;
    assert!(outcome.is_timed_out());
    assert!(outcome.elapsed() >= Duration::from_secs(1));
    assert!(outcome.attempts() > 1);
    assert!(bed.console.stats().refreshes >= 1);
    Ok(())
}

#[tokio::test]
async fn test_wait_for_exists_refreshes_page_without_provider() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    let pool = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("pool-late", None)?;
    bed.console.add_pool(PoolRecord::new("pool-late"));

    // nothing syncs the inventory when the pool has no provider
    let outcome = pool.wait_for_exists().await?;
    assert!(outcome.is_timed_out());
    assert_eq!(bed.mock_provider.refresh_count(), 0);

    bed.console.sync_inventory();
    assert!(pool.wait_for_exists().await?.is_reached());
    Ok(())
}
