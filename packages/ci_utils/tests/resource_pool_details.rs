//! Details page navigation and summary table reads against the simulated console

use anyhow::Result;

use infra_pages::{
    infrastructure::resource_pool::ResourcePoolDetailsView, navigation::StepState, PageError,
    ResourcePool,
};
use infra_pages_ci_utils::{PoolRecord, Screen, TestBed, PROVIDER_KEY};
use infra_pages_widgets::WidgetError;

const POOL: &str = "Default for Cluster";

fn bed_with_pool() -> Result<(TestBed, ResourcePool)> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(
        PoolRecord::new(POOL)
            .with_property("Memory Limit", "4096 MB")
            .with_relationship("Parent Cluster", "Cluster01")
            .with_smart_management("My Company Tags", "Department: Engineering"),
    );
    let pool = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate(POOL, Some(&bed.provider))?;
    Ok((bed, pool))
}

#[tokio::test]
async fn test_get_detail_reads_every_summary_table() -> Result<()> {
    let (bed, pool) = bed_with_pool()?;

    assert_eq!(
        pool.get_detail("Properties", "Memory Limit").await?.as_deref(),
        Some("4096 MB")
    );
    assert_eq!(
        pool.get_detail("Relationships", "Parent Cluster")
            .await?
            .as_deref(),
        Some("Cluster01")
    );
    assert_eq!(
        pool.get_detail("Smart Management", "My Company Tags")
            .await?
            .as_deref(),
        Some("Department: Engineering")
    );
    assert_eq!(bed.console.screen(), Screen::PoolDetails(POOL.to_string()));
    Ok(())
}

#[tokio::test]
async fn test_repeated_reads_stay_on_details_page() -> Result<()> {
    let (bed, pool) = bed_with_pool()?;

    pool.get_detail("Properties", "CPU Shares").await?;
    let renders = bed.console.stats().renders;
    assert_eq!(
        pool.get_detail("Properties", "CPU Shares").await?.as_deref(),
        Some("4000")
    );
    assert_eq!(bed.console.stats().renders, renders);

    let last = bed
        .appliance
        .navigator()
        .history()
        .pop()
        .expect("navigation recorded");
    assert_eq!(last.step, "Details");
    assert_eq!(last.state, StepState::AlreadyThere);
    Ok(())
}

#[tokio::test]
async fn test_unknown_section_gives_none() -> Result<()> {
    let (_bed, pool) = bed_with_pool()?;
    assert_eq!(pool.get_detail("Power Management", "State").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_missing_key_in_known_section_is_an_error() -> Result<()> {
    let (_bed, pool) = bed_with_pool()?;
    let err = pool
        .get_detail("Properties", "Number of Sockets")
        .await
        .unwrap_err();
    match err.downcast_ref::<WidgetError>() {
        Some(WidgetError::RowNotFound { table, key }) => {
            assert_eq!(table, "Properties");
            assert_eq!(key, "Number of Sockets");
        }
        other => panic!("unexpected error: {other:?} ({err})"),
    }
    Ok(())
}

#[tokio::test]
async fn test_details_of_unlisted_pool_is_not_found() -> Result<()> {
    let (bed, _pool) = bed_with_pool()?;
    let ghost = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("ghost", Some(&bed.provider))?;

    let err = ghost.get_detail("Properties", "Memory Limit").await.unwrap_err();
    match err.downcast_ref::<PageError>() {
        Some(PageError::ResourcePoolNotFound { name }) => assert_eq!(name, "ghost"),
        other => panic!("unexpected error: {other:?} ({err})"),
    }
    assert_eq!(err.to_string(), "Resource pool ghost not found");
    assert_eq!(bed.console.screen(), Screen::PoolList);
    Ok(())
}

#[tokio::test]
async fn test_details_step_surfs_list_pages() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.set_page_size(2);
    for index in 1..=5 {
        bed.console.seed_pool(
            PoolRecord::new(&format!("pool-{index}"))
                .with_property("CPU Shares", &format!("{index}000")),
        );
    }
    let pools = bed.appliance.collections().resource_pools();

    // first page only
    let listed = pools
        .all()
        .await?
        .into_iter()
        .map(|pool| pool.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(listed, ["pool-1", "pool-2"]);

    let last = pools.instantiate("pool-5", None)?;
    assert!(!last.exists().await?);
    assert_eq!(
        last.get_detail("Properties", "CPU Shares").await?.as_deref(),
        Some("5000")
    );
    assert_eq!(bed.console.screen(), Screen::PoolDetails("pool-5".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_instantiate_rejects_empty_name() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    let err = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("  ", None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PageError>(),
        Some(PageError::InvalidEntity { .. })
    ));
    Ok(())
}

#[test]
fn test_display_names_provider_key() -> Result<()> {
    let (bed, pool) = bed_with_pool()?;
    assert_eq!(
        pool.to_string(),
        format!("ResourcePool(name='{POOL}', provider_key='{PROVIDER_KEY}')")
    );
    let orphan = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate(POOL, None)?;
    assert_eq!(
        orphan.to_string(),
        format!("ResourcePool(name='{POOL}', provider_key=None)")
    );
    Ok(())
}

#[tokio::test]
async fn test_sidebar_relationships_open_in_place() -> Result<()> {
    let (bed, pool) = bed_with_pool()?;
    let view: ResourcePoolDetailsView = bed.appliance.navigate_to(&pool, "Details").await?;
    let renders = bed.console.stats().renders;

    assert!(view.sidebar.properties.is_opened().await?);
    let relationships = &view.sidebar.relationships;
    assert!(relationships.is_displayed().await?);
    assert!(!relationships.is_opened().await?);

    relationships.open().await?;
    assert!(relationships.is_opened().await?);
    // opening twice leaves it open
    relationships.open().await?;
    assert!(relationships.is_opened().await?);

    let tree = relationships.tree();
    assert!(tree.nodes().await?.contains(&"Parent Cluster".to_string()));
    tree.click_node("Parent Cluster").await?;

    let err = tree.click_node("Datastores").await.unwrap_err();
    match err.downcast_ref::<WidgetError>() {
        Some(WidgetError::ItemNotFound { name }) => assert_eq!(name, "Datastores"),
        other => panic!("unexpected error: {other:?} ({err})"),
    }

    assert_eq!(bed.console.stats().renders, renders);
    assert_eq!(bed.console.screen(), Screen::PoolDetails(POOL.to_string()));
    Ok(())
}
