//! Response synthesis.
//!
//! Turns the normalized request, the handler's accumulator, and the content
//! to return into the final wire response: status inference, header
//! partitioning, cross-origin synthesis, and serialize-time redaction.

use http::{Method, StatusCode};
use indexmap::IndexMap;
use serde_json::Value;
use talaria_config::ApiConfig;
use talaria_core::{ApiRequest, GatewayResponse, HandlerError, HeaderValue, ResponseParts};

use crate::cors::cors_headers;
use crate::redact::to_redacted_string;

/// Synthesizes the final response for one invocation.
///
/// Status selection: an accumulator override always wins. Otherwise a POST
/// yields 201; any other method yields 204 for empty content and 200 for
/// non-empty content. Content counts as empty when it is absent, JSON
/// `null`, or an empty string.
///
/// Accumulator headers are partitioned by shape: single scalars go to
/// `headers`, sequences to `multiValueHeaders`. When cross-origin support is
/// enabled, the synthesized access-control headers are injected afterwards
/// and override accumulator entries of the same name. An empty-content
/// response still carries all of its headers.
///
/// # Errors
///
/// Fails only when the content cannot be serialized, which does not happen
/// for JSON values in practice; the caller maps the failure into the error
/// path.
pub fn format(
    request: &ApiRequest,
    parts: &ResponseParts,
    content: Option<&Value>,
    config: &ApiConfig,
) -> Result<GatewayResponse, HandlerError> {
    let empty = is_empty_content(content);
    let status = parts.status.unwrap_or_else(|| infer_status(request, empty));

    let mut headers = IndexMap::new();
    let mut multi_value_headers = IndexMap::new();
    for (name, value) in &parts.headers {
        match value {
            HeaderValue::Single(scalar) => {
                headers.insert(name.clone(), scalar.clone());
            }
            HeaderValue::Multi(scalars) => {
                multi_value_headers.insert(name.clone(), scalars.clone());
            }
        }
    }

    for (name, value) in cors_headers(&config.cors, request, &parts.header_names()) {
        headers.insert(name, value);
    }

    let body = match content {
        Some(value) if !empty => to_redacted_string(value, &config.blacklist).map_err(|err| {
            HandlerError::internal_with_source("failed to serialize response content", err)
        })?,
        _ => String::new(),
    };

    Ok(GatewayResponse {
        status_code: status.as_u16(),
        headers,
        multi_value_headers,
        body,
    })
}

fn is_empty_content(content: Option<&Value>) -> bool {
    match content {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

fn infer_status(request: &ApiRequest, empty: bool) -> StatusCode {
    if request.is_method(&Method::POST) {
        StatusCode::CREATED
    } else if empty {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use talaria_core::{HeaderScalar, Response};

    fn get_request() -> ApiRequest {
        ApiRequest {
            http_method: "GET".to_string(),
            ..Default::default()
        }
    }

    fn post_request() -> ApiRequest {
        ApiRequest {
            http_method: "POST".to_string(),
            ..Default::default()
        }
    }

    fn plain_config() -> ApiConfig {
        ApiConfig::default()
    }

    #[test]
    fn test_empty_content_yields_204_for_get() {
        let response = format(&get_request(), &ResponseParts::default(), None, &plain_config()).unwrap();

        assert_eq!(response.status_code, 204);
        assert!(response.headers.is_empty());
        assert!(response.multi_value_headers.is_empty());
        assert_eq!(response.body, "");
    }

    #[test]
    fn test_empty_content_yields_201_for_post() {
        let response = format(&post_request(), &ResponseParts::default(), None, &plain_config()).unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, "");
    }

    #[test]
    fn test_null_and_empty_string_count_as_empty() {
        for content in [json!(null), json!("")] {
            let response =
                format(&get_request(), &ResponseParts::default(), Some(&content), &plain_config())
                    .unwrap();
            assert_eq!(response.status_code, 204);
            assert_eq!(response.body, "");
        }
    }

    #[test]
    fn test_content_yields_200_for_get_and_201_for_post() {
        let content = json!({"email": "foo@example.com"});

        let get = format(&get_request(), &ResponseParts::default(), Some(&content), &plain_config())
            .unwrap();
        assert_eq!(get.status_code, 200);
        assert_eq!(get.body, r#"{"email":"foo@example.com"}"#);

        let post =
            format(&post_request(), &ResponseParts::default(), Some(&content), &plain_config())
                .unwrap();
        assert_eq!(post.status_code, 201);
    }

    #[test]
    fn test_explicit_override_always_wins() {
        let response = Response::new();
        response.set_status(StatusCode::ACCEPTED);

        let formatted = format(
            &post_request(),
            &response.snapshot(),
            Some(&json!({"queued": true})),
            &plain_config(),
        )
        .unwrap();
        assert_eq!(formatted.status_code, 202);

        let empty = format(&get_request(), &response.snapshot(), None, &plain_config()).unwrap();
        assert_eq!(empty.status_code, 202);
    }

    #[test]
    fn test_header_partition_by_shape() {
        let response = Response::new();
        response.insert_header("x-single", "one");
        response.insert_header("x-count", 7_i64);
        response.insert_header("x-multi", vec![HeaderScalar::from("a"), HeaderScalar::from("b")]);

        let formatted =
            format(&get_request(), &response.snapshot(), None, &plain_config()).unwrap();

        assert_eq!(formatted.headers["x-single"], HeaderScalar::from("one"));
        assert_eq!(formatted.headers["x-count"], HeaderScalar::Number(7));
        assert!(!formatted.headers.contains_key("x-multi"));
        assert_eq!(
            formatted.multi_value_headers["x-multi"],
            vec![HeaderScalar::from("a"), HeaderScalar::from("b")]
        );
    }

    #[test]
    fn test_blacklisted_fields_are_redacted() {
        let config = ApiConfig {
            blacklist: vec!["password".to_string()],
            ..Default::default()
        };
        let content = json!({"password": "secret", "email": "a@b.com"});

        let formatted =
            format(&get_request(), &ResponseParts::default(), Some(&content), &config).unwrap();

        assert_eq!(formatted.body, r#"{"email":"a@b.com"}"#);
        // The handler's value is untouched; redaction happened during
        // serialization only.
        assert_eq!(content["password"], "secret");
    }

    #[test]
    fn test_cors_headers_injected_even_on_empty_responses() {
        let config: ApiConfig = serde_json::from_value(json!({"cors": true})).unwrap();
        let mut request = get_request();
        request
            .headers
            .insert("origin".to_string(), "site.example".to_string());

        let response = Response::new();
        response.insert_header("x-baz", "baz");

        let formatted = format(&request, &response.snapshot(), None, &config).unwrap();

        assert_eq!(formatted.status_code, 204);
        assert_eq!(formatted.body, "");
        assert_eq!(
            formatted.headers["Access-Control-Allow-Origin"],
            HeaderScalar::from("site.example")
        );
        assert_eq!(
            formatted.headers["Access-Control-Expose-Headers"],
            HeaderScalar::from("x-baz")
        );
        assert_eq!(formatted.headers["x-baz"], HeaderScalar::from("baz"));
    }

    #[test]
    fn test_cors_overrides_accumulator_entries_of_same_name() {
        let config: ApiConfig = serde_json::from_value(json!({"cors": true})).unwrap();
        let response = Response::new();
        response.insert_header("Access-Control-Allow-Origin", "spoofed.example");

        let formatted = format(&get_request(), &response.snapshot(), None, &config).unwrap();
        assert_eq!(
            formatted.headers["Access-Control-Allow-Origin"],
            HeaderScalar::from("*")
        );
    }
}
