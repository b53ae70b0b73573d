//! HTTP helpers for the organizer calendar Lambda.

use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::json;

use crate::Error;

/// File name offered to clients downloading the feed.
pub const CALENDAR_FILENAME: &str = "eventbrite_organizer_events.ics";

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Build a response whose Content-Length matches the body exactly.
pub fn bytes_response(
    status: u16,
    content_type: &str,
    body: Vec<u8>,
) -> Result<Response<Body>, lambda_http::Error> {
    let length = body.len();
    let body = match String::from_utf8(body) {
        Ok(text) => Body::Text(text),
        Err(e) => Body::Binary(e.into_bytes()),
    };

    Ok(Response::builder()
        .status(status)
        .header("content-type", content_type)
        .header("content-length", length.to_string())
        .body(body)
        .map_err(Box::new)?)
}

/// Create a plain-text response.
pub fn text_response(
    status: u16,
    text: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    bytes_response(status, "text/plain", text.into().into_bytes())
}

/// Create a pretty-printed JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    bytes_response(status, "application/json", serde_json::to_vec_pretty(data)?)
}

/// Create the calendar download response.
pub fn calendar_response(document: Vec<u8>) -> Result<Response<Body>, lambda_http::Error> {
    let mut response = bytes_response(200, "text/calendar; charset=utf-8", document)?;
    response.headers_mut().insert(
        "content-disposition",
        format!("attachment; filename=\"{}\"", CALENDAR_FILENAME).parse()?,
    );
    Ok(response)
}

/// Diagnostic JSON body describing an upstream failure.
pub fn upstream_error_body(error: &Error) -> Option<serde_json::Value> {
    match error {
        Error::Upstream {
            url,
            code,
            reason,
            headers,
            body,
        } => Some(json!({
            "error": "error_from_eventbrite",
            "eb_error": {
                "url": url,
                "code": code,
                "reason": reason,
                "headers": headers,
                "body": body,
            }
        })),
        Error::Transport { url, message } => Some(json!({
            "error": "error_from_eventbrite",
            "eb_error": {
                "url": url,
                "code": null,
                "reason": message,
                "headers": {},
                "body": "",
            }
        })),
        Error::MalformedResponse { url, status, body } => Some(json!({
            "error": "error_parsing_eb_response",
            "eb_response": {
                "url": url,
                "status": status,
                "body": body,
            }
        })),
        _ => None,
    }
}

/// Map an error to the response the client sees.
pub fn error_response(error: &Error) -> Result<Response<Body>, lambda_http::Error> {
    if let Some(body) = upstream_error_body(error) {
        return json_response(error.status_code(), &body);
    }

    match error {
        Error::UnknownOrganizer => text_response(error.status_code(), error.to_string()),
        _ => json_response(error.status_code(), &ApiResponse::error(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn body_bytes(response: &Response<Body>) -> &[u8] {
        response.body().as_ref()
    }

    fn content_length(response: &Response<Body>) -> usize {
        response.headers()["content-length"]
            .to_str()
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_unknown_organizer_response() {
        let response = error_response(&Error::UnknownOrganizer).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(response.headers()["content-type"], "text/plain");
        assert_eq!(body_bytes(&response), b"Unknown Eventbrite Organization");
        assert_eq!(content_length(&response), 31);
    }

    #[test]
    fn test_upstream_error_response() {
        let mut headers = BTreeMap::new();
        headers.insert("server".to_string(), "nginx".to_string());
        let error = Error::Upstream {
            url: "https://www.eventbrite.com/org/1/showmore/?type=future&page=1".to_string(),
            code: 404,
            reason: "Not Found".to_string(),
            headers,
            body: "missing".to_string(),
        };

        let response = error_response(&error).unwrap();
        assert_eq!(response.status(), 502);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(content_length(&response), body_bytes(&response).len());

        let json: serde_json::Value = serde_json::from_slice(body_bytes(&response)).unwrap();
        assert_eq!(json["error"], "error_from_eventbrite");
        assert_eq!(json["eb_error"]["code"], 404);
        assert_eq!(json["eb_error"]["reason"], "Not Found");
        assert_eq!(json["eb_error"]["headers"]["server"], "nginx");
        assert_eq!(json["eb_error"]["body"], "missing");
    }

    #[test]
    fn test_internal_error_response() {
        let response = error_response(&Error::Internal("boom".to_string())).unwrap();
        assert_eq!(response.status(), 500);
        let json: serde_json::Value = serde_json::from_slice(body_bytes(&response)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Internal error: boom");
    }

    #[test]
    fn test_calendar_response_headers() {
        let response = calendar_response(b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n".to_vec()).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"],
            "text/calendar; charset=utf-8"
        );
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"eventbrite_organizer_events.ics\""
        );
        assert_eq!(content_length(&response), 32);
    }
}
