//! The shared configuration store.

use parking_lot::RwLock;
use serde_json::Value;

use crate::{AdapterConfig, ConfigError};

/// A shared, mutable configuration store.
///
/// Construct one store per process, share it by `Arc`, and let readers call
/// [`get`](Self::get) on every use. Readers must not cache the result: the
/// formatter re-reads the store on every response so that configuration
/// merged after an adapter was built still takes effect.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use talaria_config::{AdapterConfig, ConfigStore};
///
/// let store = ConfigStore::default();
/// store.merge_value(json!({ "api": { "blacklist": ["password"] } })).unwrap();
/// assert_eq!(store.get().api.blacklist, vec!["password"]);
/// ```
#[derive(Debug, Default)]
pub struct ConfigStore {
    inner: RwLock<AdapterConfig>,
}

impl ConfigStore {
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: AdapterConfig) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn get(&self) -> AdapterConfig {
        self.inner.read().clone()
    }

    /// Deep-merges `patch` onto the current configuration.
    ///
    /// Successive merges accumulate: list fields concatenate and scalar
    /// fields are replaced.
    pub fn merge(&self, patch: AdapterConfig) {
        self.inner.write().merge(patch);
    }

    /// Deep-merges a raw configuration document onto the current
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] when the document does not match the
    /// configuration shape.
    pub fn merge_value(&self, patch: Value) -> Result<(), ConfigError> {
        let patch: AdapterConfig = serde_json::from_value(patch)?;
        self.merge(patch);
        Ok(())
    }

    /// Replaces the entire configuration.
    pub fn replace(&self, config: AdapterConfig) {
        *self.inner.write() = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CorsSetting;
    use serde_json::json;

    #[test]
    fn test_get_returns_current_state() {
        let store = ConfigStore::default();
        assert_eq!(store.get(), AdapterConfig::default());
    }

    #[test]
    fn test_successive_merges_accumulate() {
        let store = ConfigStore::default();
        store
            .merge_value(json!({ "api": { "cors": true, "blacklist": ["password"] } }))
            .unwrap();
        store
            .merge_value(json!({ "api": { "blacklist": ["token"] } }))
            .unwrap();

        let config = store.get();
        assert_eq!(config.api.cors, CorsSetting::Flag(true));
        assert_eq!(config.api.blacklist, vec!["password", "token"]);
    }

    #[test]
    fn test_merge_value_rejects_malformed_documents() {
        let store = ConfigStore::default();
        let result = store.merge_value(json!({ "api": { "cors": 42 } }));
        assert!(result.is_err());
        // The store is untouched after a rejected merge.
        assert_eq!(store.get(), AdapterConfig::default());
    }

    #[test]
    fn test_replace_overwrites_previous_state() {
        let store = ConfigStore::default();
        store
            .merge_value(json!({ "api": { "blacklist": ["password"] } }))
            .unwrap();

        store.replace(AdapterConfig::default());
        assert!(store.get().api.blacklist.is_empty());
    }
}
