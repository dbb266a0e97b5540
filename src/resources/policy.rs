use bevy::prelude::*;
use std::collections::HashMap;

use crate::policy::PolicyHandle;

/// Sending handles for every externally driven agent, keyed by agent name
#[derive(Resource, Debug, Clone, Default)]
pub struct PolicyHandles(HashMap<String, PolicyHandle>);

impl PolicyHandles {
    pub fn insert(&mut self, handle: PolicyHandle) {
        self.0.insert(handle.agent().to_string(), handle);
    }

    pub fn get(&self, agent: &str) -> Option<&PolicyHandle> {
        self.0.get(agent)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyHandle> {
        self.0.values()
    }
}
