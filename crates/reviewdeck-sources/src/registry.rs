use std::collections::HashMap;
use std::sync::Arc;

use reviewdeck_models::Platform;
use tracing::debug;

use crate::traits::ReviewStore;

/// Registry of platform stores, keyed by platform.
///
/// The embedding application registers one store per connected platform;
/// queries for unregistered platforms simply find nothing to fetch, which is
/// how disabled platforms avoid a round trip entirely.
#[derive(Default)]
pub struct StoreRegistry {
    stores: HashMap<Platform, Arc<dyn ReviewStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, store: Arc<dyn ReviewStore>) {
        let platform = store.platform();
        debug!(platform = %platform, "registering review store");
        self.stores.insert(platform, store);
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn ReviewStore>> {
        self.stores.get(&platform).cloned()
    }

    pub fn is_registered(&self, platform: Platform) -> bool {
        self.stores.contains_key(&platform)
    }

    /// Registered platforms in the fixed tie-break order.
    pub fn registered_platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.stores.keys().copied().collect();
        platforms.sort();
        platforms
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
