//! Shared application state handed to every handler.

use store_db::{
    BackorderQueue, Database, OrderService, ProductLedger, ProductLocks, SharedNotifier,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub orders: OrderService,
    pub ledger: ProductLedger,
    pub backorders: BackorderQueue,
}

impl AppState {
    /// Wires the services around one lock registry and one notifier.
    pub fn new(db: Database, notifier: SharedNotifier) -> Self {
        let locks = ProductLocks::new();
        AppState {
            orders: OrderService::new(db.clone(), notifier.clone(), locks.clone()),
            ledger: ProductLedger::new(db.clone(), notifier.clone(), locks.clone()),
            backorders: BackorderQueue::new(db.clone(), notifier, locks),
            db,
        }
    }
}
