//! Contact form submission to a third-party form endpoint.
//!
//! The fields are posted url-encoded; the endpoint answers JSON. Failures
//! are always turned into a status line for the page, never propagated.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{FolioError, Result};

pub const SUCCESS_MESSAGE: &str = "Thanks for your submission!";
pub const FAILURE_MESSAGE: &str = "Oops! There was a problem submitting your form";

/// Raw HTTP answer, already read to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Anything that can deliver the form body to the endpoint.
pub trait FormTransport {
    fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse>;
}

impl<T: FormTransport + ?Sized> FormTransport for &T {
    fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse> {
        (**self).post_form(endpoint, fields)
    }
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("folio-view/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| FolioError::Transport(format!("client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl FormTransport for HttpTransport {
    fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> Result<TransportResponse> {
        let url = url::Url::parse(endpoint)?;
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .form(fields)
            .send()
            .map_err(|e| FolioError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FolioError::Transport(format!("failed to read body: {}", e)))?;
        Ok(TransportResponse { status, body })
    }
}

/// What the page shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub success: bool,
    pub message: String,
}

impl FormOutcome {
    pub fn failure() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Option<Vec<ErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: Option<String>,
}

/// Map an endpoint response to the status line.
pub fn interpret_response(resp: &TransportResponse) -> FormOutcome {
    if (200..300).contains(&resp.status) {
        return FormOutcome {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        };
    }
    match serde_json::from_str::<ErrorBody>(&resp.body) {
        Ok(ErrorBody { errors: Some(errors) }) => FormOutcome {
            success: false,
            message: errors
                .into_iter()
                .filter_map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", "),
        },
        _ => FormOutcome::failure(),
    }
}

pub struct FormClient<T: FormTransport> {
    endpoint: String,
    transport: T,
}

impl FormClient<HttpTransport> {
    pub fn http(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self::new(endpoint, HttpTransport::new()?))
    }
}

impl<T: FormTransport> FormClient<T> {
    pub fn new(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Post once. No retry.
    pub fn submit(&self, fields: &[(String, String)]) -> FormOutcome {
        match self.transport.post_form(&self.endpoint, fields) {
            Ok(resp) => {
                let outcome = interpret_response(&resp);
                log::info!("form endpoint answered {} (success: {})", resp.status, outcome.success);
                outcome
            }
            Err(e) => {
                log::warn!("form submission failed: {}", e);
                FormOutcome::failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn joins_error_messages() {
        let out = interpret_response(&resp(
            422,
            r#"{"errors":[{"message":"Email is invalid"},{"message":"Message is required"}]}"#,
        ));
        assert!(!out.success);
        assert_eq!(out.message, "Email is invalid, Message is required");
    }

    #[test]
    fn non_json_error_is_generic() {
        assert_eq!(interpret_response(&resp(500, "<html>oops</html>")), FormOutcome::failure());
        assert_eq!(interpret_response(&resp(400, r#"{"error":"x"}"#)), FormOutcome::failure());
    }

    #[test]
    fn any_2xx_is_success() {
        assert!(interpret_response(&resp(204, "")).success);
    }
}
