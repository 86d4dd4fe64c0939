//! The record trait.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persistable record type.
///
/// A record serializes to a flat JSON object and carries an optional string
/// key. The repository assigns a UUID key on create when none is set; the
/// per-field accessor pair keeps key handling explicit instead of reaching
/// into the serialized form by name.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The table this record lives in.
    const TABLE: &'static str;

    /// Returns the record's key, if assigned.
    fn key(&self) -> Option<String>;

    /// Assigns the record's key.
    fn set_key(&mut self, key: String);
}
