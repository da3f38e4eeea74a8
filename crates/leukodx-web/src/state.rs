//! Shared application state for the web server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leukodx_common::SessionContext;
use leukodx_model::Classifier;

/// Shared state injected into every Axum handler.
///
/// `session` and `classifier` are write-once: populated during startup and
/// read-only for the rest of the process. If startup loading failed they
/// stay `None`, `init_error` carries the message, and the prediction route
/// is disabled for the whole session.
pub struct AppState {
    pub session: Option<Arc<SessionContext>>,
    pub classifier: Option<Arc<dyn Classifier>>,
    pub init_error: Option<String>,
    busy: AtomicBool,
}

impl AppState {
    pub fn ready(session: SessionContext, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            session: Some(Arc::new(session)),
            classifier: Some(classifier),
            init_error: None,
            busy: AtomicBool::new(false),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            session: None,
            classifier: None,
            init_error: Some(message.into()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some() && self.classifier.is_some()
    }

    /// Claim the single prediction slot. At most one prediction runs at a
    /// time; an overlapping submission is rejected without starting any
    /// pipeline work. Returns a guard that releases the slot on drop.
    pub fn try_begin_prediction(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| BusyGuard { state: self })
    }
}

/// Releases the prediction slot on drop, so every exit path — success,
/// validation failure, inference failure — re-enables the trigger.
pub struct BusyGuard<'a> {
    state: &'a AppState,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}

pub type SharedState = Arc<AppState>;
