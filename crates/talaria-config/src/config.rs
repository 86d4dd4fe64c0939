//! Configuration types and merge semantics.

use serde::{Deserialize, Serialize};

/// Complete adapter configuration.
///
/// This is the root configuration type. It deserializes from the JSON shape
/// business code conventionally ships:
///
/// ```json
/// { "api": { "cors": true, "blacklist": ["password"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Gateway response synthesis configuration.
    pub api: ApiConfig,
}

impl AdapterConfig {
    /// Deep-merges `other` onto this configuration.
    ///
    /// Sections merge recursively, list fields concatenate, and scalar or
    /// optional fields are replaced by the incoming value when it is set.
    pub fn merge(&mut self, other: Self) {
        self.api.merge(other.api);
    }
}

/// Configuration for the gateway response formatter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Cross-origin response header synthesis.
    pub cors: CorsSetting,

    /// Field names removed from serialized response bodies, at any depth.
    pub blacklist: Vec<String>,
}

impl ApiConfig {
    fn merge(&mut self, other: Self) {
        self.cors.merge(other.cors);
        self.blacklist.extend(other.blacklist);
    }
}

/// Cross-origin configuration: disabled, enabled with defaults, or explicit
/// options.
///
/// Serializes as `false`, `true`, or an options object, matching the wire
/// shape of the configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorsSetting {
    /// `false` disables synthesis entirely; `true` enables it with every
    /// option at its default.
    Flag(bool),
    /// Explicit cross-origin options.
    Custom(CorsOptions),
}

impl CorsSetting {
    /// Returns `true` when cross-origin synthesis is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }

    /// Returns the explicit options, if any were configured.
    #[must_use]
    pub const fn options(&self) -> Option<&CorsOptions> {
        match self {
            Self::Custom(options) => Some(options),
            Self::Flag(_) => None,
        }
    }

    fn merge(&mut self, other: Self) {
        match (self, other) {
            // Merging two option objects combines them field-wise.
            (Self::Custom(current), Self::Custom(incoming)) => current.merge(incoming),
            // Anything else replaces the previous setting.
            (current, incoming) => *current = incoming,
        }
    }
}

impl Default for CorsSetting {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// Explicit cross-origin options.
///
/// Unset fields fall back to request-derived values at format time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CorsOptions {
    /// The allowed origin. Defaults to the request's own `origin` header.
    pub origin: Option<String>,

    /// Whether to emit `Access-Control-Allow-Credentials`.
    pub credentials: bool,

    /// The allowed methods. Defaults to the full gateway method set.
    pub methods: Option<Vec<String>>,

    /// The allowed request headers. Defaults to the inbound header names.
    pub allow_headers: Option<Vec<String>>,

    /// The exposed response headers. Defaults to the handler-set header
    /// names.
    pub expose_headers: Option<Vec<String>>,

    /// Value for `Access-Control-Max-Age`, when set.
    pub max_age: Option<String>,
}

impl CorsOptions {
    fn merge(&mut self, other: Self) {
        merge_option(&mut self.origin, other.origin);
        if other.credentials {
            self.credentials = true;
        }
        merge_option_list(&mut self.methods, other.methods);
        merge_option_list(&mut self.allow_headers, other.allow_headers);
        merge_option_list(&mut self.expose_headers, other.expose_headers);
        merge_option(&mut self.max_age, other.max_age);
    }
}

fn merge_option<T>(current: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *current = incoming;
    }
}

fn merge_option_list<T>(current: &mut Option<Vec<T>>, incoming: Option<Vec<T>>) {
    match (current.as_mut(), incoming) {
        (Some(existing), Some(more)) => existing.extend(more),
        (None, Some(more)) => *current = Some(more),
        (_, None) => {}
    }
}
