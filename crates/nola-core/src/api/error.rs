use thiserror::Error;

/// Application error code the API uses to signal an expired session.
pub const SESSION_EXPIRED_CODE: i64 = 401;

/// Rejection value for every call that hit an expired session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired";

/// Shown when a request failed without any server response or transport code.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// A structured failure from the server, or a non-2xx status without one.
    #[error("{message}")]
    Application { code: i64, message: String },

    /// No server response at all: timeout, DNS, refused connection.
    #[error("{}", .code.unwrap_or(UNKNOWN_ERROR_MESSAGE))]
    Network {
        code: Option<&'static str>,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Classify a transport failure into a short code, if it has one.
    pub(crate) fn transport_code(error: &reqwest::Error) -> Option<&'static str> {
        if error.is_timeout() {
            Some("timeout")
        } else if error.is_connect() {
            Some("connect")
        } else if error.is_body() {
            Some("body")
        } else if error.is_decode() {
            Some("decode")
        } else if error.is_request() {
            Some("request")
        } else {
            None
        }
    }

    /// The human-readable rejection value.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::SessionExpired.message(), SESSION_EXPIRED_MESSAGE);
        let err = ApiError::Application {
            code: 400,
            message: "Slug already exists".to_string(),
        };
        assert_eq!(err.message(), "Slug already exists");
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(ApiError::truncate_body("short"), "short");

        let long = "é".repeat(400);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
    }
}
