use std::collections::HashMap;

use derive_more::Display;

/// Successful response: status, headers (lower-cased names) and body.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityResponse<T> {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<T>,
}

impl<T> EntityResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Failed call. Status 0 means the server could not be reached.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "Http failure response ({}): {}", status, message)]
pub struct HttpErrorResponse {
    pub status: u16,
    pub message: String,
    pub headers: HashMap<String, String>,
    pub error: Option<serde_json::Value>,
}

impl HttpErrorResponse {
    pub fn unreachable(message: impl ToString) -> Self {
        Self {
            status: 0,
            message: message.to_string(),
            headers: HashMap::new(),
            error: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Value of the first header whose name ends with `suffix`, e.g. `-error`
    /// for `X-reportApp-error`.
    pub fn header_ending_with(&self, suffix: &str) -> Option<&str> {
        let suffix = suffix.to_lowercase();
        self.headers
            .iter()
            .find(|(name, _)| name.starts_with("x-") && name.ends_with(&suffix))
            .map(|(_, value)| value.as_str())
    }
}

pub type HttpResult<T> = Result<EntityResponse<T>, HttpErrorResponse>;

pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_lowercase(), value.to_string()))
        })
        .collect()
}
