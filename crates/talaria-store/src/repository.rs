//! The repository layer.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join_all;
use serde_json::{json, Value};

use crate::{Document, Record, StoreError, StoreResult, TableStore};

/// A typed repository over a [`TableStore`].
///
/// Creation assigns a UUID v4 key when the record has none and stamps
/// `created_at`/`updated_at` into the stored document; updates require the
/// record to exist and refresh `updated_at`.
pub struct Repository<R: Record> {
    store: Arc<dyn TableStore>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> Repository<R> {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::Conflict`] when a record already exists
    /// under the same key; creation never overwrites.
    pub async fn create(&self, mut record: R) -> StoreResult<R> {
        let key = record
            .key()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        record.set_key(key.clone());

        if self.store.get(R::TABLE, &key).await?.is_some() {
            return Err(StoreError::conflict(R::TABLE, &key));
        }

        let mut document = to_document(&record)?;
        let now = Utc::now().to_rfc3339();
        document.insert("created_at".to_string(), json!(now));
        document.insert("updated_at".to_string(), json!(now));

        self.store.put(R::TABLE, &key, document.clone()).await?;
        from_document(document)
    }

    /// Persists a batch of new records, concurrently.
    ///
    /// # Errors
    ///
    /// Fails on the first failing create.
    pub async fn create_many(&self, records: Vec<R>) -> StoreResult<Vec<R>> {
        try_join_all(records.into_iter().map(|record| self.create(record))).await
    }

    /// Returns every record in the table.
    pub async fn find_all(&self) -> StoreResult<Vec<R>> {
        let documents = self.store.scan(R::TABLE).await?;
        documents.into_iter().map(from_document).collect()
    }

    /// Returns the record under `key`, if present.
    pub async fn find_by_key(&self, key: &str) -> StoreResult<Option<R>> {
        match self.store.get(R::TABLE, key).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Updates an existing record.
    ///
    /// The record's fields are merged over the stored document, so fields
    /// this record type does not model survive the update.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::MissingKey`] when the record carries no key
    /// and [`StoreError::NotFound`] when nothing is stored under it.
    pub async fn update(&self, record: R) -> StoreResult<R> {
        let key = record.key().ok_or(StoreError::MissingKey)?;

        let mut document = self
            .store
            .get(R::TABLE, &key)
            .await?
            .ok_or_else(|| StoreError::not_found(R::TABLE, &key))?;

        for (field, value) in to_document(&record)? {
            document.insert(field, value);
        }
        document.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        self.store.put(R::TABLE, &key, document.clone()).await?;
        from_document(document)
    }

    /// Removes the record under `key`. Removing an absent key is not an
    /// error.
    pub async fn destroy(&self, key: &str) -> StoreResult<()> {
        self.store.delete(R::TABLE, key).await
    }
}

fn to_document<R: Record>(record: &R) -> StoreResult<Document> {
    match serde_json::to_value(record)? {
        Value::Object(document) => Ok(document),
        _ => Err(StoreError::NotADocument),
    }
}

fn from_document<R: Record>(document: Document) -> StoreResult<R> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
