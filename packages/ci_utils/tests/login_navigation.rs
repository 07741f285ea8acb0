//! Login handling of the navigation root step

use anyhow::Result;
use std::sync::Arc;

use infra_pages::{
    infrastructure::resource_pool::ResourcePoolAllView, navigation::StepState, Appliance,
    PageError,
};
use infra_pages_ci_utils::{
    init_test_logging, test_config, MockConsole, MockUser, PoolRecord, Screen, TestBed,
};
use infra_pages_utils::ApplianceVersion;
use infra_pages_widgets::View;

#[tokio::test]
async fn test_login_is_skipped_when_already_logged_in() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    let server = bed.appliance.server();

    let page = server.login().await?;
    assert!(page.is_displayed().await?);
    assert_eq!(bed.console.logged_in_user().as_deref(), Some("Administrator"));
    assert_eq!(bed.console.stats().gotos, 1);

    server.login().await?;
    assert_eq!(bed.console.stats().gotos, 1);
    let states = bed
        .appliance
        .navigator()
        .history()
        .into_iter()
        .map(|record| record.state)
        .collect::<Vec<_>>();
    assert_eq!(states, [StepState::StepExecuted, StepState::AlreadyThere]);
    Ok(())
}

#[tokio::test]
async fn test_navigation_logs_in_again_after_logout() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    bed.console.seed_pool(PoolRecord::new("pool-a"));
    let pool = bed
        .appliance
        .collections()
        .resource_pools()
        .instantiate("pool-a", None)?;

    assert!(pool.exists().await?);
    bed.appliance.server().login().await?.logout().await?;
    assert_eq!(bed.console.screen(), Screen::Login);

    assert!(pool.exists().await?);
    assert_eq!(bed.console.screen(), Screen::PoolList);
    assert_eq!(bed.console.stats().gotos, 2);
    Ok(())
}

#[tokio::test]
async fn test_other_user_is_logged_out_first() -> Result<()> {
    init_test_logging();
    let console = Arc::new(MockConsole::new(ApplianceVersion::parse("5.9.0")?));
    console.add_user(MockUser::new("bob", "secret", "Bob Smith"));

    let mut config = test_config("5.9.0");
    config.user.username = "bob".to_string();
    config.user.password = "secret".to_string();
    config.user.display_name = "Bob Smith".to_string();
    let as_bob = Appliance::new(config, console.clone())?;
    as_bob.server().login().await?;
    assert_eq!(console.logged_in_user().as_deref(), Some("Bob Smith"));

    let as_admin = Appliance::new(test_config("5.9.0"), console.clone())?;
    as_admin.server().login().await?;
    assert_eq!(console.logged_in_user().as_deref(), Some("Administrator"));
    Ok(())
}

#[tokio::test]
async fn test_rejected_credentials_fail_login() -> Result<()> {
    init_test_logging();
    let console = Arc::new(MockConsole::new(ApplianceVersion::parse("5.9.0")?));
    let mut config = test_config("5.9.0");
    config.user.password = "not-the-password".to_string();
    let appliance = Appliance::new(config, console.clone())?;

    let err = appliance.server().login().await.unwrap_err();
    match err.downcast_ref::<PageError>() {
        Some(PageError::LoginFailed { username }) => assert_eq!(username, "admin"),
        other => panic!("unexpected error: {other:?} ({err})"),
    }
    assert_eq!(console.screen(), Screen::Login);
    assert_eq!(console.logged_in_user(), None);
    Ok(())
}

#[tokio::test]
async fn test_list_view_widgets() -> Result<()> {
    let bed = TestBed::new("5.9.0.1")?;
    for name in ["alpha", "beta", "gamma"] {
        bed.console.seed_pool(PoolRecord::new(name));
    }
    let pools = bed.appliance.collections().resource_pools();
    let view: ResourcePoolAllView = bed.appliance.navigate_to(&pools, "All").await?;

    assert_eq!(
        view.common.base.navigation.currently_selected().await?,
        ["Compute", "Infrastructure", "Resource Pools"]
    );
    assert_eq!(
        view.toolbar.view_selector.selected().await?.as_deref(),
        Some("List View")
    );
    view.toolbar.view_selector.select("Grid View").await?;
    assert_eq!(
        view.toolbar.view_selector.selected().await?.as_deref(),
        Some("Grid View")
    );

    view.search.simple_search("am").await?;
    assert_eq!(view.entities.entity_names().await?, ["gamma"]);
    view.search.clear_simple_search().await?;
    assert_eq!(view.entities.entity_names().await?, ["alpha", "beta", "gamma"]);
    assert!(view.is_displayed().await?);
    Ok(())
}
