use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use super::http::HttpErrorResponse;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub alert_type: AlertType,
    pub msg: String,
    pub params: HashMap<String, String>,
    pub timeout: Option<Duration>,
    pub created: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.timeout {
            Some(timeout) => now.duration_since(self.created) >= timeout,
            None => false,
        }
    }
}

#[derive(Debug, Default)]
struct Alerts {
    next_id: u64,
    alerts: Vec<Alert>,
}

/// Queue of notifications shown to the user. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct AlertService {
    inner: Arc<Mutex<Alerts>>,
}

impl AlertService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Alerts> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_alert(
        &self,
        alert_type: AlertType,
        msg: &str,
        params: HashMap<String, String>,
        timeout: Option<Duration>,
    ) -> u64 {
        let mut alerts = self.lock();
        let id = alerts.next_id;
        alerts.next_id += 1;
        alerts.alerts.push(Alert {
            id,
            alert_type,
            msg: msg.to_string(),
            params,
            timeout,
            created: Instant::now(),
        });
        id
    }

    pub fn success(&self, msg: &str) -> u64 {
        self.add_alert(AlertType::Success, msg, HashMap::new(), Some(DEFAULT_TIMEOUT))
    }

    pub fn error(&self, msg: &str, params: HashMap<String, String>) -> u64 {
        self.add_alert(AlertType::Danger, msg, params, Some(DEFAULT_TIMEOUT))
    }

    pub fn warning(&self, msg: &str) -> u64 {
        self.add_alert(AlertType::Warning, msg, HashMap::new(), Some(DEFAULT_TIMEOUT))
    }

    pub fn info(&self, msg: &str) -> u64 {
        self.add_alert(AlertType::Info, msg, HashMap::new(), Some(DEFAULT_TIMEOUT))
    }

    pub fn close(&self, id: u64) {
        self.lock().alerts.retain(|alert| alert.id != id);
    }

    pub fn clear(&self) {
        self.lock().alerts.clear();
    }

    pub fn get(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    /// Drops alerts whose timeout has elapsed at `now`.
    pub fn prune(&self, now: Instant) {
        self.lock().alerts.retain(|alert| !alert.is_expired(now));
    }
}

/// Turns failed HTTP calls into error alerts.
#[derive(Debug, Clone)]
pub struct AlertError {
    alerts: AlertService,
}

impl AlertError {
    pub fn new(alerts: AlertService) -> Self {
        Self { alerts }
    }

    pub fn on_http_error(&self, response: &HttpErrorResponse) {
        match response.status {
            0 => {
                self.add_error_alert("Server not reachable", "error.server.not.reachable", None);
            }
            400 => {
                if let Some(error_header) = response.header_ending_with("-error") {
                    let entity_key = response.header_ending_with("-params").map(str::to_string);
                    self.add_error_alert(error_header, error_header, entity_key);
                } else if let Some(field_errors) = response
                    .error
                    .as_ref()
                    .and_then(|error| error.get("fieldErrors"))
                    .and_then(|errors| errors.as_array())
                {
                    for field_error in field_errors {
                        let field = field_error
                            .get("field")
                            .and_then(|field| field.as_str())
                            .unwrap_or_default();
                        let message = field_error
                            .get("message")
                            .and_then(|message| message.as_str())
                            .unwrap_or_default();
                        let key = format!("error.{}", message);
                        self.add_error_alert(
                            &format!("Error on field \"{}\"", field),
                            &key,
                            Some(field.to_string()),
                        );
                    }
                } else {
                    let message = body_message(response).unwrap_or(response.message.as_str());
                    self.add_error_alert(message, message, None);
                }
            }
            404 => {
                self.add_error_alert("Not found", "error.url.not.found", None);
            }
            _ => {
                let message = body_message(response).unwrap_or(response.message.as_str());
                self.add_error_alert(message, message, None);
            }
        }
    }

    fn add_error_alert(&self, message: &str, key: &str, param: Option<String>) {
        log::debug!("Adding error alert: {}", message);
        let mut params = HashMap::new();
        if let Some(param) = param {
            params.insert("param".to_string(), param);
        }
        self.alerts.error(key, params);
    }
}

fn body_message(response: &HttpErrorResponse) -> Option<&str> {
    response
        .error
        .as_ref()
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn error_response(status: u16, headers: &[(&str, &str)]) -> HttpErrorResponse {
        HttpErrorResponse {
            status,
            message: "failure".to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_lowercase(), value.to_string()))
                .collect(),
            error: None,
        }
    }

    #[test]
    fn alerts_can_be_closed_and_cleared() {
        let alerts = AlertService::new();
        let first = alerts.success("saved");
        alerts.info("hello");

        alerts.close(first);
        let remaining = alerts.get();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].alert_type, AlertType::Info);

        alerts.clear();
        assert!(alerts.get().is_empty());
    }

    #[test]
    fn expired_alerts_are_pruned() {
        let alerts = AlertService::new();
        alerts.success("saved");
        alerts.add_alert(AlertType::Warning, "sticky", HashMap::new(), None);

        alerts.prune(Instant::now() + DEFAULT_TIMEOUT);
        let remaining = alerts.get();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].msg, "sticky");
    }

    #[test]
    fn unreachable_server_is_reported() {
        let alerts = AlertService::new();
        AlertError::new(alerts.clone()).on_http_error(&HttpErrorResponse::unreachable("refused"));

        assert_eq!(alerts.get()[0].msg, "error.server.not.reachable");
        assert_eq!(alerts.get()[0].alert_type, AlertType::Danger);
    }

    #[test]
    fn bad_request_uses_the_error_header() {
        let alerts = AlertService::new();
        let response = error_response(
            400,
            &[
                ("X-reportApp-error", "error.idexists"),
                ("X-reportApp-params", "report"),
            ],
        );
        AlertError::new(alerts.clone()).on_http_error(&response);

        let alert = &alerts.get()[0];
        assert_eq!(alert.msg, "error.idexists");
        assert_eq!(alert.params.get("param").map(String::as_str), Some("report"));
    }

    #[test]
    fn field_errors_produce_one_alert_each() {
        let alerts = AlertService::new();
        let mut response = error_response(400, &[]);
        response.error = Some(json!({
            "fieldErrors": [
                {"field": "name", "message": "NotNull"},
                {"field": "logo", "message": "Size"}
            ]
        }));
        AlertError::new(alerts.clone()).on_http_error(&response);

        let messages: Vec<_> = alerts.get().into_iter().map(|alert| alert.msg).collect();
        assert_eq!(messages, vec!["error.NotNull", "error.Size"]);
    }

    #[test]
    fn not_found_and_other_statuses() {
        let alerts = AlertService::new();
        let handler = AlertError::new(alerts.clone());

        handler.on_http_error(&error_response(404, &[]));
        let mut response = error_response(500, &[]);
        response.error = Some(json!({"message": "error.http.500"}));
        handler.on_http_error(&response);

        let messages: Vec<_> = alerts.get().into_iter().map(|alert| alert.msg).collect();
        assert_eq!(messages, vec!["error.url.not.found", "error.http.500"]);
    }
}
