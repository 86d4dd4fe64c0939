//! The table-store seam and the in-memory backend.

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;

use crate::StoreResult;

/// A stored record: a flat JSON object.
pub type Document = serde_json::Map<String, Value>;

/// The storage engine seam.
///
/// Implementations adapt an external table store (or an in-process map, see
/// [`MemoryStore`]) to the repository layer. Keys are opaque strings scoped
/// per table; documents are stored as given, byte-for-byte semantics are the
/// backend's business.
pub trait TableStore: Send + Sync + 'static {
    /// Writes `document` under `key`, replacing any previous document.
    fn put<'a>(
        &'a self,
        table: &'a str,
        key: &'a str,
        document: Document,
    ) -> BoxFuture<'a, StoreResult<()>>;

    /// Reads the document under `key`, if present.
    fn get<'a>(
        &'a self,
        table: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>>;

    /// Removes the document under `key`. Removing an absent key is not an
    /// error.
    fn delete<'a>(&'a self, table: &'a str, key: &'a str) -> BoxFuture<'a, StoreResult<()>>;

    /// Returns every document in `table`, in insertion order where the
    /// backend has one.
    fn scan<'a>(&'a self, table: &'a str) -> BoxFuture<'a, StoreResult<Vec<Document>>>;
}

/// An in-memory [`TableStore`] for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, IndexMap<String, Document>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in `table`.
    #[must_use]
    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |entries| entries.len())
    }

    /// Returns `true` when `table` holds no documents.
    #[must_use]
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

impl TableStore for MemoryStore {
    fn put<'a>(
        &'a self,
        table: &'a str,
        key: &'a str,
        document: Document,
    ) -> BoxFuture<'a, StoreResult<()>> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Box::pin(std::future::ready(Ok(())))
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        key: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>> {
        let document = self
            .tables
            .get(table)
            .and_then(|entries| entries.get(key).cloned());
        Box::pin(std::future::ready(Ok(document)))
    }

    fn delete<'a>(&'a self, table: &'a str, key: &'a str) -> BoxFuture<'a, StoreResult<()>> {
        if let Some(mut entries) = self.tables.get_mut(table) {
            entries.shift_remove(key);
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn scan<'a>(&'a self, table: &'a str) -> BoxFuture<'a, StoreResult<Vec<Document>>> {
        let documents = self
            .tables
            .get(table)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default();
        Box::pin(std::future::ready(Ok(documents)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(pairs: &[(&str, Value)]) -> Document {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .put("users", "u1", document(&[("email", json!("a@b.com"))]))
            .await
            .unwrap();

        let fetched = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(fetched["email"], json!("a@b.com"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("users", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryStore::new();
        store
            .put("users", "u1", document(&[("email", json!("old@b.com"))]))
            .await
            .unwrap();
        store
            .put("users", "u1", document(&[("email", json!("new@b.com"))]))
            .await
            .unwrap();

        let fetched = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(fetched["email"], json!("new@b.com"));
        assert_eq!(store.len("users"), 1);
    }

    #[tokio::test]
    async fn test_delete_is_silent_on_missing() {
        let store = MemoryStore::new();
        store.delete("users", "u1").await.unwrap();

        store
            .put("users", "u1", document(&[("email", json!("a@b.com"))]))
            .await
            .unwrap();
        store.delete("users", "u1").await.unwrap();
        assert!(store.is_empty("users"));
    }

    #[tokio::test]
    async fn test_scan_preserves_insertion_order() {
        let store = MemoryStore::new();
        for (key, email) in [("u1", "first@b.com"), ("u2", "second@b.com")] {
            store
                .put("users", key, document(&[("email", json!(email))]))
                .await
                .unwrap();
        }

        let all = store.scan("users").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["email"], json!("first@b.com"));
        assert_eq!(all[1]["email"], json!("second@b.com"));
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let store = MemoryStore::new();
        store
            .put("users", "1", document(&[("kind", json!("user"))]))
            .await
            .unwrap();
        store
            .put("orders", "1", document(&[("kind", json!("order"))]))
            .await
            .unwrap();

        assert_eq!(store.len("users"), 1);
        assert_eq!(store.len("orders"), 1);
        assert_eq!(
            store.get("users", "1").await.unwrap().unwrap()["kind"],
            json!("user")
        );
    }
}
