use std::sync::Arc;

use common::api::report::PublicReport;

use super::service::ReportGateway;
use crate::shared::http::HttpErrorResponse;

/// Data a report route hands to its page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteData {
    pub report: PublicReport,
}

pub struct ReportResolve {
    service: Arc<dyn ReportGateway>,
}

impl ReportResolve {
    pub fn new(service: Arc<dyn ReportGateway>) -> Self {
        Self { service }
    }

    /// The stored report for `id`, or a blank one for a new report.
    pub async fn resolve(&self, id: Option<i64>) -> Result<RouteData, HttpErrorResponse> {
        let Some(id) = id else {
            return Ok(RouteData::default());
        };

        let response = self.service.find(id).await?;
        Ok(RouteData {
            report: response.body.unwrap_or_default(),
        })
    }
}
