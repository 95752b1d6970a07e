//! Local notifications

use crate::error::{Result, TravelogError};
use async_trait::async_trait;
use std::io::Write;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// Prints notifications to stdout. Disabled notifiers do nothing.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        TerminalNotifier { enabled }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        writeln!(out, "🔔 {}: {}", title, body)
            .map_err(|e| TravelogError::Notification(e.to_string()))
    }
}
