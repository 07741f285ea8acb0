//! Page objects for the infrastructure resource pool pages of the management
//! console.
//!
//! Test code builds an [`Appliance`] around a [`widgets::Browser`], asks it for
//! the resource pool collection, instantiates pools and drives them:
//!
//! ```ignore
//! let appliance = Appliance::new(config, browser)?;
//! let pool = appliance
//!     .collections()
//!     .resource_pools()
//!     .instantiate("Default for Cluster", Some(&provider))?;
//! if pool.exists().await? {
//!     pool.delete(false, true).await?;
//! }
//! ```
//!
//! Every page is reached through the [`navigation::Navigator`], which runs the
//! prerequisite steps of the requested step first.

pub mod appliance;
pub mod base;
pub mod error;
pub mod infrastructure;
pub mod navigation;
pub mod provider;

pub use appliance::{Appliance, Collections};
pub use error::PageError;
pub use infrastructure::resource_pool::{DetailSection, ResourcePool, ResourcePoolCollection};
pub use provider::Provider;

pub use infra_pages_utils as utils;
pub use infra_pages_widgets as widgets;
