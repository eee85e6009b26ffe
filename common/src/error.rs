use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, HttpResponseBuilder,
};
use serde::Serialize;

use crate::{header_util, services::APPLICATION_NAME};

#[derive(Debug, Clone, PartialEq)]
pub struct AlertInfo {
    pub entity_name: String,
    pub error_key: String,
}

#[derive(Debug)]
pub struct ServiceError {
    pub code: u16,
    pub alert: Option<AlertInfo>,
    err: anyhow::Error,
}

impl ServiceError {
    pub fn message(&self) -> String {
        self.err.to_string()
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ServiceError({}): {}", self.code, self.err)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    title: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<String>,
}

impl actix_web::error::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponseBuilder::new(self.status_code());
        response.insert_header(ContentType::json());

        let problem = match &self.alert {
            Some(alert) => {
                for header in header_util::create_failure_alert(
                    APPLICATION_NAME.as_str(),
                    true,
                    &alert.entity_name,
                    &alert.error_key,
                    &self.message(),
                ) {
                    response.insert_header(header);
                }
                Problem {
                    title: self.message(),
                    status: self.code,
                    message: Some(format!("error.{}", alert.error_key)),
                    entity_name: Some(alert.entity_name.clone()),
                    error_key: Some(alert.error_key.clone()),
                    params: Some(alert.entity_name.clone()),
                }
            }
            None => Problem {
                title: self.message(),
                status: self.code,
                message: None,
                entity_name: None,
                error_key: None,
                params: None,
            },
        };

        response.json(problem)
    }
}

impl<E: Into<anyhow::Error>> From<E> for ServiceError {
    fn from(err: E) -> ServiceError {
        ServiceError {
            code: 500,
            alert: None,
            err: err.into(),
        }
    }
}

pub trait AddCode {
    fn code(self, code: u16) -> ServiceError;
}

impl AddCode for anyhow::Error {
    fn code(self, code: u16) -> ServiceError {
        ServiceError {
            code,
            alert: None,
            err: self,
        }
    }
}

impl AddCode for ServiceError {
    fn code(mut self, code: u16) -> ServiceError {
        self.code = code;
        self
    }
}

/// 400 carrying the entity name and error key the client turns into an alert.
pub fn bad_request_alert(title: &str, entity_name: &str, error_key: &str) -> ServiceError {
    ServiceError {
        code: 400,
        alert: Some(AlertInfo {
            entity_name: entity_name.to_string(),
            error_key: error_key.to_string(),
        }),
        err: anyhow::anyhow!(title.to_string()),
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod test {
    use actix_web::{body::to_bytes, ResponseError};

    use super::*;

    #[test]
    fn code_is_attached_to_anyhow_errors() {
        let err = anyhow::anyhow!("Report not found").code(404);
        assert_eq!(err.code, 404);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Report not found");
    }

    #[test]
    fn plain_conversions_are_internal_errors() {
        let err: ServiceError = "12x".parse::<i64>().unwrap_err().into();
        assert_eq!(err.code, 500);
        assert!(err.alert.is_none());
    }

    #[actix_web::test]
    async fn bad_request_alert_renders_problem_and_headers() {
        let err = bad_request_alert("Invalid id", "report", "idnull");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let app = APPLICATION_NAME.as_str();
        let headers = response.headers();
        assert_eq!(
            headers.get(format!("X-{}-error", app)).unwrap(),
            "error.idnull"
        );
        assert_eq!(headers.get(format!("X-{}-params", app)).unwrap(), "report");

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["title"], "Invalid id");
        assert_eq!(body["status"], 400);
        assert_eq!(body["errorKey"], "idnull");
        assert_eq!(body["entityName"], "report");
    }
}
