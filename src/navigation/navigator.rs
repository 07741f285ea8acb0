use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::collections::VecDeque;

use infra_pages_widgets::View;

use super::{resolve_attribute_path, Navigable, Prerequisite, StepRegistry};

const HISTORY_LIMIT: usize = 256;

/// Progress of a single navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    NotYetNavigated,
    /// The requested page was already displayed, nothing was done.
    AlreadyThere,
    PrerequisiteSatisfied,
    StepExecuted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub target: String,
    pub step: String,
    pub state: StepState,
}

/// Executes navigation steps from an injected registry.
#[derive(Debug)]
pub struct Navigator {
    registry: StepRegistry,
    history: Mutex<VecDeque<NavigationRecord>>,
}

impl Navigator {
    pub fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            history: Mutex::new(VecDeque::new()),
        }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Final states of the most recent navigations, oldest first.
    pub fn history(&self) -> Vec<NavigationRecord> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    fn record(&self, obj: &dyn Navigable, step: &str, state: StepState) {
        log::debug!("{} / {}: {:?}", obj.describe(), step, state);
        if matches!(state, StepState::AlreadyThere | StepState::StepExecuted) {
            let mut history = self.history.lock();
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back(NavigationRecord {
                target: obj.describe(),
                step: step.to_string(),
                state,
            });
        }
    }

    /// Navigate `obj` to the step called `name` and return its view.
    ///
    /// When the view is already displayed nothing is clicked. Otherwise the
    /// prerequisite chain is walked first, then the step itself runs.
    pub fn navigate_to<'a>(
        &'a self,
        obj: &'a dyn Navigable,
        name: &'a str,
    ) -> BoxFuture<'a, Result<Box<dyn View>>> {
        async move {
            let step = self.registry.get(obj.nav_tag(), name)?;
            self.record(obj, name, StepState::NotYetNavigated);

            let view = step.create_view(obj)?;
            if step.am_i_here(&*view).await? {
                view.flush_widget_cache();
                self.record(obj, name, StepState::AlreadyThere);
                return Ok(view);
            }

            let prerequisite_view = match step.prerequisite() {
                Prerequisite::None => None,
                Prerequisite::Sibling { step: sibling } => {
                    Some(self.navigate_to(obj, sibling).await?)
                }
                Prerequisite::Attribute { path, step: dependency_step, .. } => {
                    let dependency = resolve_attribute_path(obj, path)?;
                    Some(self.navigate_to(&*dependency, dependency_step).await?)
                }
            };
            self.record(obj, name, StepState::PrerequisiteSatisfied);

            step.step(obj, prerequisite_view.as_deref()).await?;
            // lookups made while checking where we were are stale now
            view.flush_widget_cache();
            self.record(obj, name, StepState::StepExecuted);
            Ok(view)
        }
        .boxed()
    }
}
