//! One-time permission walkthrough on first use

use crate::error::Result;
use crate::infrastructure::{KeyValueStore, Permission, PermissionPrompter};
use std::sync::Arc;
use tracing::{info, warn};

pub const FIRST_LAUNCH_KEY: &str = "isFirstLaunch";

pub struct FirstLaunchService {
    store: Arc<dyn KeyValueStore>,
}

impl FirstLaunchService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        FirstLaunchService { store }
    }

    /// Absent or unreadable sentinel counts as a first launch
    pub async fn is_first_launch(&self) -> Result<bool> {
        let stored = match self.store.get(FIRST_LAUNCH_KEY).await {
            Err(e) if e.is_corrupt_store() => {
                warn!(error = %e, "unreadable first-launch flag");
                return Ok(true);
            }
            other => other?,
        };

        match stored {
            None => Ok(true),
            Some(text) => match serde_json::from_str::<bool>(text.trim()) {
                Ok(first) => Ok(first),
                Err(e) => {
                    warn!(error = %e, "unreadable first-launch flag");
                    Ok(true)
                }
            },
        }
    }

    /// Ask for every permission once, then record that it happened.
    /// Returns the answers, or `None` when this is not the first launch.
    pub async fn run_if_needed(
        &self,
        prompter: &dyn PermissionPrompter,
    ) -> Result<Option<Vec<(Permission, bool)>>> {
        if !self.is_first_launch().await? {
            return Ok(None);
        }

        let mut answers = Vec::with_capacity(Permission::ALL.len());
        for permission in Permission::ALL {
            let granted = prompter.request(permission).await?;
            info!(permission = permission.label(), granted, "permission requested");
            answers.push((permission, granted));
        }

        self.store.set(FIRST_LAUNCH_KEY, "false").await?;
        Ok(Some(answers))
    }
}
