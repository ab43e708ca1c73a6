//! # Backorder Notifications
//!
//! When a drain satisfies a backorder, its customer is told the goods are
//! available. Delivery (email, SMS...) lives behind [`BackorderNotifier`];
//! the services only call it, after their transaction has committed.

use std::sync::Arc;

use store_core::Backorder;
use tracing::info;

/// Receives every backorder a drain satisfied.
///
/// Implementations must not block for long and cannot fail the caller:
/// the stock and backorder changes are already committed when this runs.
pub trait BackorderNotifier: Send + Sync {
    fn notify(&self, backorder: &Backorder);
}

/// Default notifier: writes a structured log line per backorder.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl BackorderNotifier for LogNotifier {
    fn notify(&self, backorder: &Backorder) {
        info!(
            backorder_id = %backorder.id,
            customer_id = %backorder.customer_id,
            product_id = %backorder.product_id,
            quantity = backorder.quantity,
            "Backorder can be fulfilled, notifying customer"
        );
    }
}

/// Shared handle passed into the services.
pub type SharedNotifier = Arc<dyn BackorderNotifier>;

pub(crate) fn dispatch(notifier: &dyn BackorderNotifier, satisfied: &[Backorder]) {
    for backorder in satisfied {
        notifier.notify(backorder);
    }
}

/// Notifier that remembers what it was given. Test helper.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    seen: std::sync::Mutex<Vec<Backorder>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn seen(&self) -> Vec<Backorder> {
        self.seen.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl BackorderNotifier for RecordingNotifier {
    fn notify(&self, backorder: &Backorder) {
        self.seen.lock().unwrap().push(backorder.clone());
    }
}
