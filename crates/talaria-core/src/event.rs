//! Inbound trigger event types.
//!
//! A [`GatewayEvent`] is the decoded form of the raw gateway-style trigger
//! payload. An [`ApiRequest`] is the normalized request handed to hooks and
//! handlers: identical to the event except that the textual body has been
//! replaced by parsed JSON.

use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A gateway-style trigger event as delivered by the hosting runtime.
///
/// Only the fields the adapter acts on are typed; everything else the
/// runtime sends is preserved in [`extra`](Self::extra) and passed through
/// unmodified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayEvent {
    /// The HTTP method of the request (GET, POST, ...).
    pub http_method: String,

    /// Inbound request headers, in the order the runtime delivered them.
    pub headers: IndexMap<String, String>,

    /// The raw textual request body, if any.
    pub body: Option<String>,

    /// Path parameters extracted by the gateway.
    ///
    /// The presence of this field on the raw payload (even as JSON `null`)
    /// is what marks an event as gateway-shaped; by the time the event is
    /// decoded here, `null` and absent have collapsed to `None`.
    pub path_parameters: Option<IndexMap<String, String>>,

    /// Query string parameters extracted by the gateway.
    pub query_string_parameters: Option<IndexMap<String, String>>,

    /// The request path.
    pub path: Option<String>,

    /// All other event fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized gateway request.
///
/// This is a [`GatewayEvent`] whose body has been parsed into structured
/// JSON. Construction goes through the normalizer; a present, non-empty body
/// that is not valid JSON never produces an `ApiRequest`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// The HTTP method of the request.
    pub http_method: String,

    /// Inbound request headers.
    pub headers: IndexMap<String, String>,

    /// The parsed request body. `None` when the raw body was empty or absent.
    pub body: Option<Value>,

    /// Path parameters extracted by the gateway.
    pub path_parameters: Option<IndexMap<String, String>>,

    /// Query string parameters extracted by the gateway.
    pub query_string_parameters: Option<IndexMap<String, String>>,

    /// The request path.
    pub path: Option<String>,

    /// All other event fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiRequest {
    /// Returns `true` if the request method matches `method`.
    ///
    /// The comparison is case-sensitive, matching the runtime's delivery of
    /// upper-case method names.
    #[must_use]
    pub fn is_method(&self, method: &Method) -> bool {
        self.http_method == method.as_str()
    }

    /// Looks up an inbound header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the inbound header names in delivery order.
    #[must_use]
    pub fn header_names(&self) -> Vec<&str> {
        self.headers.keys().map(String::as_str).collect()
    }
}
