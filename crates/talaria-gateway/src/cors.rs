//! Cross-origin header synthesis.
//!
//! Access-control headers are computed fresh for every response from the
//! current configuration, the inbound request, and the header names the
//! handler accumulated. Nothing is remembered between responses.

use indexmap::IndexMap;
use talaria_config::CorsSetting;
use talaria_core::{ApiRequest, HeaderScalar};

/// The default allowed method set, used when no explicit list is configured.
pub const DEFAULT_METHODS: [&str; 7] =
    ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "HEAD"];

/// Computes the access-control headers for one response.
///
/// Returns an empty map when cross-origin support is disabled. Each value
/// falls back from explicit configuration to request-derived data:
///
/// - allowed origin: configured origin, else the request's `origin` header,
///   else `*`
/// - allowed methods: configured list, else [`DEFAULT_METHODS`]
/// - exposed headers: configured list, else the de-duplicated
///   `handler_header_names`
/// - allowed headers: configured list, else the inbound header names
#[must_use]
pub fn cors_headers(
    setting: &CorsSetting,
    request: &ApiRequest,
    handler_header_names: &[String],
) -> IndexMap<String, HeaderScalar> {
    let mut headers = IndexMap::new();
    if !setting.is_enabled() {
        return headers;
    }
    let options = setting.options();

    let origin = options
        .and_then(|o| o.origin.clone())
        .or_else(|| request.header("origin").map(ToString::to_string))
        .unwrap_or_else(|| "*".to_string());

    let methods = options.and_then(|o| o.methods.clone()).unwrap_or_else(|| {
        DEFAULT_METHODS.iter().map(ToString::to_string).collect()
    });

    let expose_headers = options
        .and_then(|o| o.expose_headers.clone())
        .unwrap_or_else(|| dedup(handler_header_names));

    let allow_headers = options.and_then(|o| o.allow_headers.clone()).unwrap_or_else(|| {
        request
            .header_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    });

    headers.insert(
        "Access-Control-Allow-Origin".to_string(),
        HeaderScalar::Str(origin),
    );
    headers.insert(
        "Access-Control-Allow-Methods".to_string(),
        HeaderScalar::Str(methods.join(", ")),
    );
    headers.insert(
        "Access-Control-Expose-Headers".to_string(),
        HeaderScalar::Str(expose_headers.join(", ")),
    );
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        HeaderScalar::Str(allow_headers.join(", ")),
    );

    if let Some(options) = options {
        if options.credentials {
            headers.insert(
                "Access-Control-Allow-Credentials".to_string(),
                HeaderScalar::Bool(true),
            );
        }
        if let Some(max_age) = &options.max_age {
            headers.insert(
                "Access-Control-Max-Age".to_string(),
                HeaderScalar::Str(max_age.clone()),
            );
        }
    }

    headers
}

fn dedup(names: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(name) {
            seen.push(name.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap as Headers;
    use serde_json::json;
    use talaria_config::{AdapterConfig, CorsSetting};

    fn request_with_headers(pairs: &[(&str, &str)]) -> ApiRequest {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers.insert((*name).to_string(), (*value).to_string());
        }
        ApiRequest {
            headers,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_produces_nothing() {
        let headers = cors_headers(
            &CorsSetting::Flag(false),
            &request_with_headers(&[("origin", "site.example")]),
            &[],
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn test_defaults_derive_from_request_and_accumulator() {
        let request = request_with_headers(&[("origin", "localhost"), ("x-foo", "foo"), ("x-bar", "bar")]);
        let headers = cors_headers(
            &CorsSetting::Flag(true),
            &request,
            &["x-baz".to_string()],
        );

        assert_eq!(headers["Access-Control-Allow-Origin"], HeaderScalar::from("localhost"));
        assert_eq!(
            headers["Access-Control-Allow-Methods"],
            HeaderScalar::from("GET, POST, PUT, PATCH, DELETE, OPTIONS, HEAD")
        );
        assert_eq!(headers["Access-Control-Expose-Headers"], HeaderScalar::from("x-baz"));
        assert_eq!(
            headers["Access-Control-Allow-Headers"],
            HeaderScalar::from("origin, x-foo, x-bar")
        );
    }

    #[test]
    fn test_origin_falls_back_to_wildcard() {
        let headers = cors_headers(&CorsSetting::Flag(true), &ApiRequest::default(), &[]);
        assert_eq!(headers["Access-Control-Allow-Origin"], HeaderScalar::from("*"));
    }

    #[test]
    fn test_expose_headers_are_deduplicated() {
        let headers = cors_headers(
            &CorsSetting::Flag(true),
            &ApiRequest::default(),
            &["x-a".to_string(), "x-b".to_string(), "x-a".to_string()],
        );
        assert_eq!(headers["Access-Control-Expose-Headers"], HeaderScalar::from("x-a, x-b"));
    }

    #[test]
    fn test_explicit_options_win_over_request_data() {
        let config: AdapterConfig = serde_json::from_value(json!({
            "api": {
                "cors": {
                    "origin": "configured.example",
                    "methods": ["GET", "POST"],
                    "allowHeaders": ["x-allowed"],
                    "exposeHeaders": ["x-exposed"],
                    "credentials": true,
                    "maxAge": "600",
                }
            }
        }))
        .unwrap();

        let request = request_with_headers(&[("origin", "other.example"), ("x-foo", "1")]);
        let headers = cors_headers(&config.api.cors, &request, &["x-baz".to_string()]);

        assert_eq!(
            headers["Access-Control-Allow-Origin"],
            HeaderScalar::from("configured.example")
        );
        assert_eq!(headers["Access-Control-Allow-Methods"], HeaderScalar::from("GET, POST"));
        assert_eq!(headers["Access-Control-Expose-Headers"], HeaderScalar::from("x-exposed"));
        assert_eq!(headers["Access-Control-Allow-Headers"], HeaderScalar::from("x-allowed"));
        assert_eq!(headers["Access-Control-Allow-Credentials"], HeaderScalar::Bool(true));
        assert_eq!(headers["Access-Control-Max-Age"], HeaderScalar::from("600"));
    }
}
