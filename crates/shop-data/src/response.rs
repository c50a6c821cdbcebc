//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Buffer a reqwest response.
    pub(crate) async fn from_reqwest(resp: reqwest::Response) -> Result<Self, FetchError> {
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(Self::new(status, body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The body becomes the error message.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = String::from_utf8_lossy(&self.body).into_owned();
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(304, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Page {
            total: i64,
        }

        let resp = make_response(200, br#"{"total": 194, "skip": 0}"#);
        let page: Page = resp.json().unwrap();
        assert_eq!(page, Page { total: 194 });
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"<html>");
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_error_for_status_keeps_body_as_message() {
        let err = make_response(404, b"Product with id '9999' not found")
            .error_for_status()
            .unwrap_err();
        match err {
            FetchError::HttpError { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("9999"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"{}").error_for_status().is_ok());
    }
}
