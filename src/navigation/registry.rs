use anyhow::Result;
use serde::Serialize;
use std::{collections::BTreeMap, fmt, sync::Arc};

use super::{NavigateStep, Prerequisite};
use crate::{base::server, error::PageError, infrastructure::resource_pool};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StepKey {
    pub target: String,
    pub step: String,
}

impl StepKey {
    pub fn new(target: &str, step: &str) -> Self {
        Self {
            target: target.to_string(),
            step: step.to_string(),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.target, self.step)
    }
}

/// Mapping from (type tag, step name) to the step implementation.
///
/// Holds at most one step per pair.
#[derive(Default, Clone)]
pub struct StepRegistry {
    steps: BTreeMap<StepKey, (&'static str, Arc<dyn NavigateStep>)>,
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.steps.keys()).finish()
    }
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S>(&mut self, target: &'static str, name: &'static str, step: S) -> Result<()>
    where
        S: NavigateStep + 'static,
    {
        let key = StepKey::new(target, name);
        if self.steps.contains_key(&key) {
            return Err(PageError::DuplicateStep {
                target: target.to_string(),
                step: name.to_string(),
            }
            .into());
        }
        log::debug!("Registered navigation step {key}");
        self.steps.insert(key, (target, Arc::new(step)));
        Ok(())
    }

    pub fn get(&self, target: &str, name: &str) -> Result<Arc<dyn NavigateStep>> {
        self.steps
            .get(&StepKey::new(target, name))
            .map(|(_, step)| step.clone())
            .ok_or_else(|| {
                PageError::UnknownStep {
                    target: target.to_string(),
                    step: name.to_string(),
                }
                .into()
            })
    }

    pub fn contains(&self, target: &str, name: &str) -> bool {
        self.steps.contains_key(&StepKey::new(target, name))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepKey, &dyn NavigateStep)> {
        self.steps.iter().map(|(key, (_, step))| (key, step.as_ref()))
    }

    /// Check that every prerequisite names a registered step.
    pub fn validate(&self) -> Result<()> {
        for (key, (owner, step)) in &self.steps {
            if let Some(prerequisite) = step.prerequisite().key(*owner) {
                if !self.steps.contains_key(&prerequisite) {
                    return Err(PageError::MissingPrerequisite {
                        target: key.target.clone(),
                        step: key.step.clone(),
                        prerequisite: prerequisite.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Steps run to reach `target/name`, the requested step last.
    pub fn chain(&self, target: &str, name: &str) -> Result<Vec<StepKey>> {
        let mut chain = Vec::new();
        let mut key = StepKey::new(target, name);
        loop {
            let (owner, step) = self.steps.get(&key).ok_or_else(|| PageError::UnknownStep {
                target: key.target.clone(),
                step: key.step.clone(),
            })?;
            let next = step.prerequisite().key(*owner);
            chain.push(key);
            match next {
                Some(next) if !chain.contains(&next) => key = next,
                _ => break,
            }
        }
        chain.reverse();
        Ok(chain)
    }

    pub fn prerequisite_of(&self, target: &str, name: &str) -> Result<Prerequisite> {
        Ok(self.get(target, name)?.prerequisite())
    }
}

/// Registry holding every step this crate knows about.
pub fn default_registry() -> Result<StepRegistry> {
    let mut registry = StepRegistry::new();
    server::register_steps(&mut registry)?;
    resource_pool::register_steps(&mut registry)?;
    registry.validate()?;
    Ok(registry)
}
