//! Event normalization.
//!
//! Converts a raw gateway-shaped trigger payload into an [`ApiRequest`]:
//! the textual body, when present and non-empty, is parsed into structured
//! JSON; everything else is carried over unchanged.

use serde_json::Value;
use talaria_core::{ApiRequest, GatewayEvent, HandlerError};

/// Normalizes a raw gateway event into a typed request.
///
/// Pure and side-effect free. A raw body is parsed exactly once, here; the
/// resulting request carries structured JSON and is never re-parsed.
///
/// # Errors
///
/// Fails with [`HandlerError::BadRequest`] when the event does not decode as
/// a gateway event, or when it carries a non-empty body that is not
/// well-formed JSON. The business callback is never invoked in that case.
pub fn normalize(event: &Value) -> Result<ApiRequest, HandlerError> {
    let event: GatewayEvent =
        serde_json::from_value(event.clone()).map_err(|_| HandlerError::bad_request())?;

    let GatewayEvent {
        http_method,
        headers,
        body,
        path_parameters,
        query_string_parameters,
        path,
        extra,
    } = event;

    let body = match body {
        Some(raw) if !raw.is_empty() => {
            Some(serde_json::from_str(&raw).map_err(|_| HandlerError::bad_request())?)
        }
        _ => None,
    };

    Ok(ApiRequest {
        http_method,
        headers,
        body,
        path_parameters,
        query_string_parameters,
        path,
        extra,
    })
}

/// Best-effort request salvage for the error path.
///
/// When normalization itself fails, the error formatter still needs the
/// method and inbound headers for status inference and cross-origin
/// synthesis. Fields that cannot be recovered are left at their defaults.
pub(crate) fn lossy_request(event: &Value) -> ApiRequest {
    let mut request = ApiRequest::default();

    if let Some(method) = event.get("httpMethod").and_then(Value::as_str) {
        request.http_method = method.to_string();
    }
    if let Some(headers) = event.get("headers").and_then(Value::as_object) {
        for (name, value) in headers {
            if let Some(value) = value.as_str() {
                request.headers.insert(name.clone(), value.to_string());
            }
        }
    }

    request
}
