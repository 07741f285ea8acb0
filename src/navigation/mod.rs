//! Navigation graph: how each page is reached from an authenticated session.
//!
//! A step is registered for a pair of (navigable type tag, step name). It
//! names the step that must be reached first, knows which view it ends on and
//! performs the UI actions that lead from the prerequisite view to its own.

mod navigator;
mod registry;

pub use navigator::{NavigationRecord, Navigator, StepState};
pub use registry::{default_registry, StepKey, StepRegistry};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use infra_pages_widgets::{AsAny, View};

use crate::{appliance::Appliance, error::PageError};

/// Anything navigation can start from: an entity, a collection, the server.
pub trait Navigable: AsAny {
    /// Type tag the steps of this type are registered under.
    fn nav_tag(&self) -> &'static str;

    fn appliance(&self) -> &Appliance;

    /// Resolve one segment of a prerequisite attribute path.
    fn attribute(&self, name: &str) -> Option<Arc<dyn Navigable>>;

    fn describe(&self) -> String;
}

/// What has to be reached before a step can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prerequisite {
    None,
    /// Another step of the same object.
    Sibling { step: &'static str },
    /// A step of the object found by following `path` (dot separated).
    /// `target` is the type tag that object is expected to have.
    Attribute {
        path: &'static str,
        target: &'static str,
        step: &'static str,
    },
}

impl Prerequisite {
    /// Registry key of the prerequisite step, given the tag of the owner.
    pub fn key(&self, owner: &'static str) -> Option<StepKey> {
        match *self {
            Prerequisite::None => None,
            Prerequisite::Sibling { step } => Some(StepKey::new(owner, step)),
            Prerequisite::Attribute { target, step, .. } => Some(StepKey::new(target, step)),
        }
    }
}

#[async_trait]
pub trait NavigateStep: Send + Sync {
    /// Name of the view the step ends on.
    fn view_name(&self) -> &'static str;

    fn prerequisite(&self) -> Prerequisite;

    fn create_view(&self, obj: &dyn Navigable) -> Result<Box<dyn View>>;

    async fn am_i_here(&self, view: &dyn View) -> Result<bool> {
        view.is_displayed().await
    }

    async fn step(&self, obj: &dyn Navigable, prerequisite_view: Option<&dyn View>) -> Result<()>;
}

/// Follow a dot separated attribute path starting at `obj`.
pub fn resolve_attribute_path(obj: &dyn Navigable, path: &str) -> Result<Arc<dyn Navigable>> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();
    let mut current = obj
        .attribute(first)
        .ok_or_else(|| PageError::UnresolvedAttribute {
            target: obj.describe(),
            attribute: first.to_string(),
        })?;

    for segment in segments {
        let next = current
            .attribute(segment)
            .ok_or_else(|| PageError::UnresolvedAttribute {
                target: current.describe(),
                attribute: segment.to_string(),
            })?;
        current = next;
    }
    Ok(current)
}

/// Borrow the concrete type behind a navigable.
pub fn navigable_ref<T: Navigable>(obj: &dyn Navigable) -> Result<&T> {
    obj.as_any().downcast_ref::<T>().ok_or_else(|| {
        PageError::InvalidEntity {
            kind: std::any::type_name::<T>().to_string(),
            reason: format!("navigation started from {}", obj.describe()),
        }
        .into()
    })
}

/// Borrow the prerequisite view as its concrete type.
pub fn prerequisite_view<V: View>(view: Option<&dyn View>) -> Result<&V> {
    view.and_then(|view| view.as_any().downcast_ref::<V>())
        .ok_or_else(|| {
            PageError::UnexpectedView {
                expected: std::any::type_name::<V>().to_string(),
            }
            .into()
        })
}
