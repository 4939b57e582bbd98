use std::sync::Arc;

use snipshare_core::ShareStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ShareStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ShareStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn ShareStore {
        self.store.as_ref()
    }
}
