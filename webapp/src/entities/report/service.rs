use async_trait::async_trait;
use common::{
    api::report::PublicReport,
    auth::Auth,
    context::effectfull_context::ServiceRequest,
    error,
    pagination::Pageable,
    services::{API_PREFIX, PROTOCOL, REPORT_SERVICE},
};
use serde::de::DeserializeOwned;

use crate::shared::http::{collect_headers, EntityResponse, HttpErrorResponse, HttpResult};

#[async_trait]
pub trait ReportGateway: Send + Sync {
    async fn create(&self, report: &PublicReport) -> HttpResult<PublicReport>;
    async fn update(&self, report: &PublicReport) -> HttpResult<PublicReport>;
    async fn find(&self, id: i64) -> HttpResult<PublicReport>;
    async fn query(&self, pageable: &Pageable) -> HttpResult<Vec<PublicReport>>;
    async fn delete(&self, id: i64) -> HttpResult<()>;
}

pub struct ReportService {
    client: reqwest::Client,
    resource_url: String,
    token: Option<String>,
}

impl ReportService {
    pub fn new(server_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            resource_url: format!(
                "{}/{}/reports",
                server_url.trim_end_matches('/'),
                API_PREFIX.as_str()
            ),
            token,
        }
    }

    /// Service at `PROTOCOL://REPORT_SERVICE_URL`.
    pub fn from_env(token: Option<String>) -> Self {
        Self::new(
            &format!("{}://{}", PROTOCOL.as_str(), REPORT_SERVICE.as_str()),
            token,
        )
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn request<'a, 'b, T: serde::Serialize>(&'a self) -> ServiceRequest<'a, 'b, T> {
        ServiceRequest::new(&self.client, Auth::None).token(self.token.clone())
    }
}

async fn into_result<T: DeserializeOwned>(
    sent: error::Result<reqwest::Response>,
) -> HttpResult<T> {
    let response = sent.map_err(|err| HttpErrorResponse::unreachable(err.message()))?;

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let headers = collect_headers(response.headers());
    let bytes = response
        .bytes()
        .await
        .map_err(HttpErrorResponse::unreachable)?;

    if !(200..300).contains(&status) {
        return Err(HttpErrorResponse {
            status,
            message: format!("Http failure response for {}: {}", url, status),
            headers,
            error: serde_json::from_slice(&bytes).ok(),
        });
    }

    let body = if bytes.is_empty() {
        None
    } else {
        let body = serde_json::from_slice(&bytes).map_err(|err| HttpErrorResponse {
            status,
            message: format!("Http failure during parsing for {}: {}", url, err),
            headers: headers.clone(),
            error: None,
        })?;
        Some(body)
    };

    Ok(EntityResponse {
        status,
        headers,
        body,
    })
}

#[async_trait]
impl ReportGateway for ReportService {
    async fn create(&self, report: &PublicReport) -> HttpResult<PublicReport> {
        log::debug!("POST {}", self.resource_url);
        let sent = self
            .request()
            .post(self.resource_url.clone())
            .json(report)
            .send()
            .await;
        into_result(sent).await
    }

    async fn update(&self, report: &PublicReport) -> HttpResult<PublicReport> {
        log::debug!("PUT {}", self.resource_url);
        let sent = self
            .request()
            .put(self.resource_url.clone())
            .json(report)
            .send()
            .await;
        into_result(sent).await
    }

    async fn find(&self, id: i64) -> HttpResult<PublicReport> {
        let sent = self
            .request::<()>()
            .get(format!("{}/{}", self.resource_url, id))
            .send()
            .await;
        into_result(sent).await
    }

    async fn query(&self, pageable: &Pageable) -> HttpResult<Vec<PublicReport>> {
        let mut request = self
            .request::<()>()
            .get(self.resource_url.clone())
            .query("page", pageable.page)
            .query("size", pageable.size);
        if let Some(sort) = &pageable.sort {
            request = request.query("sort", sort);
        }
        into_result(request.send().await).await
    }

    async fn delete(&self, id: i64) -> HttpResult<()> {
        let sent = self
            .request::<()>()
            .delete(format!("{}/{}", self.resource_url, id))
            .send()
            .await;
        into_result(sent).await
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Mutex;

    use super::*;

    /// In-memory gateway recording which calls were made.
    #[derive(Default)]
    pub struct FakeGateway {
        pub reports: Mutex<Vec<PublicReport>>,
        pub calls: Mutex<Vec<(String, PublicReport)>>,
        pub fail: bool,
    }

    impl FakeGateway {
        fn record(&self, call: &str, report: &PublicReport) -> Result<(), HttpErrorResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((call.to_string(), report.clone()));
            if self.fail {
                Err(HttpErrorResponse {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                    headers: Default::default(),
                    error: None,
                })
            } else {
                Ok(())
            }
        }

        fn ok<T>(status: u16, body: Option<T>) -> HttpResult<T> {
            Ok(EntityResponse {
                status,
                headers: Default::default(),
                body,
            })
        }
    }

    #[async_trait]
    impl ReportGateway for FakeGateway {
        async fn create(&self, report: &PublicReport) -> HttpResult<PublicReport> {
            self.record("create", report)?;
            let mut reports = self.reports.lock().unwrap();
            let created = PublicReport {
                id: Some(reports.len() as i64 + 1),
                ..report.clone()
            };
            reports.push(created.clone());
            Self::ok(201, Some(created))
        }

        async fn update(&self, report: &PublicReport) -> HttpResult<PublicReport> {
            self.record("update", report)?;
            Self::ok(200, Some(report.clone()))
        }

        async fn find(&self, id: i64) -> HttpResult<PublicReport> {
            let found = self
                .reports
                .lock()
                .unwrap()
                .iter()
                .find(|report| report.id == Some(id))
                .cloned();
            match found {
                Some(report) => Self::ok(200, Some(report)),
                None => Err(HttpErrorResponse {
                    status: 404,
                    message: "Not Found".to_string(),
                    headers: Default::default(),
                    error: None,
                }),
            }
        }

        async fn query(&self, _pageable: &Pageable) -> HttpResult<Vec<PublicReport>> {
            Self::ok(200, Some(self.reports.lock().unwrap().clone()))
        }

        async fn delete(&self, id: i64) -> HttpResult<()> {
            self.reports
                .lock()
                .unwrap()
                .retain(|report| report.id != Some(id));
            Self::ok(204, None)
        }
    }

    #[test]
    fn resource_url_is_under_api() {
        assert_eq!(
            ReportService::new("http://localhost:3011/", None).resource_url(),
            "http://localhost:3011/api/reports"
        );
        assert!(ReportService::from_env(None)
            .resource_url()
            .ends_with("/api/reports"));
    }

    #[tokio::test]
    async fn unreachable_server_reports_status_zero() {
        let service = ReportService::new("http://127.0.0.1:1", Some("token".to_string()));

        let err = service.find(1).await.unwrap_err();

        assert_eq!(err.status, 0);
    }
}
