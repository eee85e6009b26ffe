use actix_web::{
    get,
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    HttpResponse,
};

use common::{context::GeneralContext, error};

use crate::service::report::ReportService;

pub const DOWNLOAD_FILE_NAME: &str = "reports.json";

/// All reports as a JSON attachment.
#[get("/api/download")]
pub async fn download_reports(context: GeneralContext) -> error::Result<HttpResponse> {
    log::debug!("REST request to download all Reports");
    let reports = ReportService::new(context).get_report().await?;
    let body = serde_json::to_vec(&reports)?;

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/json"))
        .insert_header((CACHE_CONTROL, "must-revalidate, post-check=0, pre-check=0"))
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename={}", DOWNLOAD_FILE_NAME),
        ))
        .body(body))
}
