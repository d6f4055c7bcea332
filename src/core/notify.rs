//! Best-effort remote confirmation, detached from the scan flow.
//!
//! Each call spawns one thread that performs the request and prints a
//! warning on failure. Results are never joined before control returns to
//! the caller; `drain` collects the stragglers before the process exits so
//! late warnings still reach the console.

use crate::api::{ApiResponse, Gateway, HttpGateway};
use crate::config::Config;
use crate::ui::messages::warning;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub struct RemoteNotifier {
    gateway: Option<Arc<dyn Gateway>>,
    handles: Vec<JoinHandle<()>>,
}

impl RemoteNotifier {
    pub fn new(gateway: Option<Arc<dyn Gateway>>) -> Self {
        Self {
            gateway,
            handles: Vec::new(),
        }
    }

    /// Notifier wired to the configured backend, or disabled when no
    /// remote is set up.
    pub fn from_config(config: &Config) -> Self {
        if config.has_remote() {
            Self::new(Some(Arc::new(HttpGateway::new(
                &config.webapp_url,
                &config.api_token,
            ))))
        } else {
            Self::disabled()
        }
    }

    /// Notifier that never calls out. Local truth stands alone.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn check_in(&mut self, id: &str) {
        self.spawn("check-in", id, |gw, id| gw.check_in(id));
    }

    pub fn undo_check_in(&mut self, id: &str) {
        self.spawn("undo", id, |gw, id| gw.undo_check_in(id));
    }

    fn spawn<F>(&mut self, label: &'static str, id: &str, call: F)
    where
        F: FnOnce(&dyn Gateway, &str) -> ApiResponse + Send + 'static,
    {
        let Some(gateway) = self.gateway.clone() else {
            return;
        };
        let id = id.to_string();

        let handle = thread::spawn(move || {
            let res = call(gateway.as_ref(), &id);
            if !res.ok {
                warning(format!(
                    "Remote {label} for '{id}' failed: {} (local state kept)",
                    res.error_message()
                ));
            }
        });
        self.handles.push(handle);
    }

    /// Join outstanding confirmations. Call before exiting.
    pub fn drain(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
