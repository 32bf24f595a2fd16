//! Host callbacks invoked while translating.
//!
//! Some blocks name editor-side resources (broadcast channels, variables).
//! The editor may want to learn about them, e.g. to keep its dropdowns in
//! sync. Hooks report failure through [`HookError`]; the compiler records
//! the failure as a warning and carries on.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of editor resource a block refers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Broadcast,
    Variable,
    List,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => write!(f, "broadcast"),
            Self::Variable => write!(f, "variable"),
            Self::List => write!(f, "list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("host rejected {kind} '{name}': {reason}")]
    Rejected {
        kind: ResourceKind,
        name: String,
        reason: String,
    },

    #[error("host hook unavailable: {0}")]
    Unavailable(String),
}

/// Editor-side callbacks available during a pass.
pub trait HostHooks {
    /// Make sure a named resource exists on the editor side.
    fn create_resource(&mut self, kind: ResourceKind, name: &str) -> Result<(), HookError>;
}

/// Hooks that only record what was asked for, in request order and
/// without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLog {
    pub created: Vec<(ResourceKind, String)>,
}

impl ResourceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.created.iter().any(|(k, n)| *k == kind && n == name)
    }
}

impl HostHooks for ResourceLog {
    fn create_resource(&mut self, kind: ResourceKind, name: &str) -> Result<(), HookError> {
        if !self.contains(kind, name) {
            self.created.push((kind, name.to_string()));
        }
        Ok(())
    }
}
