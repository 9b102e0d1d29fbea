//! Outbound response wrapper.
//!
//! `CapturedResponse` owns the response produced by the inner handler for the
//! duration of one request and records the status that will be written to
//! the client. The status is read from the response itself, so the captured
//! value cannot drift from what is sent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct CapturedResponse {
    response: Response,
    status: StatusCode,
}

impl CapturedResponse {
    pub fn new(response: Response) -> Self {
        let status = response.status();
        Self { response, status }
    }

    /// Status code that will be written to the client.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Replace the status code before the response is written.
    pub fn set_status(&mut self, status: StatusCode) {
        *self.response.status_mut() = status;
        self.status = status;
    }

    pub fn into_inner(self) -> Response {
        self.response
    }
}

impl From<Response> for CapturedResponse {
    fn from(response: Response) -> Self {
        Self::new(response)
    }
}

impl IntoResponse for CapturedResponse {
    fn into_response(self) -> Response {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ok() {
        let captured = CapturedResponse::new(().into_response());
        assert_eq!(captured.status(), StatusCode::OK);
    }

    #[test]
    fn test_captures_handler_status() {
        let captured = CapturedResponse::from((StatusCode::NOT_FOUND, "missing").into_response());
        assert_eq!(captured.status(), StatusCode::NOT_FOUND);
        assert_eq!(captured.into_inner().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_set_status_updates_written_status() {
        let mut captured = CapturedResponse::new("ok".into_response());
        captured.set_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(captured.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(captured.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
