//! Transient status messages
//!
//! At most one message is visible and at most one clear timer is pending.
//! Showing a new message cancels the previous timer, so a stale clear never
//! erases a newer message.

use crate::core::Config;
use parking_lot::Mutex;
use serde::Serialize;
use shared::error::{AlertLevel, AppError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub level: AlertLevel,
}

#[derive(Default)]
struct Slot {
    message: Option<StatusMessage>,
    /// Bumped on every show/clear; a timer only clears its own generation
    generation: u64,
    pending: Option<CancellationToken>,
}

/// Single-slot message board with auto-clear
#[derive(Clone)]
pub struct StatusBoard {
    slot: Arc<Mutex<Slot>>,
    clear_after: Duration,
}

impl StatusBoard {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            clear_after,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.message_clear_after())
    }

    /// Replace the current message and schedule its clear.
    ///
    /// Outside a tokio runtime the message stays until replaced or cleared.
    pub fn show(&self, text: impl Into<String>, level: AlertLevel) {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.slot.lock();
            if let Some(previous) = slot.pending.replace(token.clone()) {
                previous.cancel();
            }
            slot.generation += 1;
            slot.message = Some(StatusMessage {
                text: text.into(),
                level,
            });
            slot.generation
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(clear_later(
                    self.slot.clone(),
                    generation,
                    token,
                    self.clear_after,
                ));
            }
            Err(_) => tracing::debug!("No async runtime, status message will not auto-clear"),
        }
    }

    /// Show an error's message at its alert level
    pub fn show_error(&self, err: &AppError) {
        self.show(err.message.clone(), err.alert_level());
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.slot.lock().message.clone()
    }

    pub fn clear(&self) {
        let mut slot = self.slot.lock();
        if let Some(pending) = slot.pending.take() {
            pending.cancel();
        }
        slot.generation += 1;
        slot.message = None;
    }
}

async fn clear_later(
    slot: Arc<Mutex<Slot>>,
    generation: u64,
    token: CancellationToken,
    delay: Duration,
) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {
            let mut slot = slot.lock();
            if slot.generation == generation {
                slot.message = None;
                slot.pending = None;
            }
        }
        _ = token.cancelled() => {}
    }
}
