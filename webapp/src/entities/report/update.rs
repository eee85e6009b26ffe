use std::{collections::HashMap, sync::Arc};

use common::{api::report::PublicReport, data_utils};
use derive_more::{Display, Error};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Map, Value};

use super::{resolve::RouteData, service::ReportGateway};
use crate::shared::{
    alert::AlertService,
    form::{FileInputEvent, FormGroup},
    http::{HttpErrorResponse, HttpResult},
    navigation::History,
};

pub const FORM_CONTROLS: [&str; 6] = [
    "id",
    "name",
    "logo",
    "logoContentType",
    "createdTime",
    "updatedTime",
];

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum UploadError {
    #[display(
        fmt = "Base64 data was not set as file could not be extracted from passed parameter: {}",
        _0
    )]
    NoFile(#[error(not(source))] String),
    #[display(fmt = "File was expected to be an image but was found to be {}", _0)]
    NotAnImage(#[error(not(source))] String),
}

/// Create/edit page for a single report.
pub struct ReportUpdate {
    pub is_saving: bool,
    pub edit_form: FormGroup,
    report_service: Arc<dyn ReportGateway>,
    history: Arc<dyn History>,
    alerts: AlertService,
}

impl ReportUpdate {
    pub fn new(
        report_service: Arc<dyn ReportGateway>,
        history: Arc<dyn History>,
        alerts: AlertService,
    ) -> Self {
        Self {
            is_saving: false,
            edit_form: FormGroup::group(&FORM_CONTROLS),
            report_service,
            history,
            alerts,
        }
    }

    pub fn init(&mut self, route: &RouteData) {
        self.is_saving = false;
        self.update_form(&route.report);
    }

    pub fn update_form(&mut self, report: &PublicReport) {
        self.edit_form.patch_value(json!({
            "id": report.id,
            "name": report.name,
            "logo": report.logo,
            "logoContentType": report.logo_content_type,
            "createdTime": report.created_time,
            "updatedTime": report.updated_time,
        }));
    }

    pub fn byte_size(&self, base64: &str) -> String {
        data_utils::byte_size(base64)
    }

    pub fn open_file(&self, content_type: &str, base64: &str) -> String {
        data_utils::open_file(content_type, base64)
    }

    /// Stores the first file of `event` base64-encoded in `field`, and its
    /// MIME type in `{field}ContentType`. Rejections also raise an error alert.
    pub fn set_file_data(
        &mut self,
        event: Option<&FileInputEvent>,
        field: &str,
        is_image: bool,
    ) -> Result<(), UploadError> {
        match self.read_file(event, field, is_image) {
            Ok(()) => {
                log::debug!("blob added");
                Ok(())
            }
            Err(err) => {
                self.on_error(&err.to_string());
                Err(err)
            }
        }
    }

    fn read_file(
        &mut self,
        event: Option<&FileInputEvent>,
        field: &str,
        is_image: bool,
    ) -> Result<(), UploadError> {
        let Some(file) = event.and_then(|event| event.files.first()) else {
            let passed = event
                .map(ToString::to_string)
                .unwrap_or_else(|| "undefined".to_string());
            return Err(UploadError::NoFile(passed));
        };
        if is_image && !file.content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(file.content_type.clone()));
        }

        let mut patch = Map::new();
        patch.insert(
            field.to_string(),
            Value::String(data_utils::to_base64(&file.data)),
        );
        patch.insert(
            format!("{}ContentType", field),
            Value::String(file.content_type.clone()),
        );
        self.edit_form.patch_value(Value::Object(patch));
        Ok(())
    }

    pub fn previous_state(&self) {
        self.history.back();
    }

    /// Marks the page as saving and starts the create or update call. Nothing
    /// stops a second call while one is still pending.
    pub fn begin_save(&mut self) -> BoxFuture<'static, HttpResult<PublicReport>> {
        self.is_saving = true;
        let report = self.create_from_form();
        let service = self.report_service.clone();
        async move {
            if report.id.is_some() {
                service.update(&report).await
            } else {
                service.create(&report).await
            }
        }
        .boxed()
    }

    pub fn on_save_response(&mut self, result: HttpResult<PublicReport>) {
        match result {
            Ok(_) => self.on_save_success(),
            Err(err) => self.on_save_error(&err),
        }
    }

    pub async fn save(&mut self) {
        let pending = self.begin_save();
        let result = pending.await;
        self.on_save_response(result);
    }

    fn create_from_form(&self) -> PublicReport {
        let text = |name: &str| {
            self.edit_form
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let number = |name: &str| self.edit_form.get(name).and_then(Value::as_i64);

        PublicReport {
            id: number("id"),
            name: text("name"),
            logo_content_type: text("logoContentType"),
            logo: text("logo"),
            created_time: number("createdTime"),
            updated_time: number("updatedTime"),
        }
    }

    fn on_save_success(&mut self) {
        self.is_saving = false;
        self.previous_state();
    }

    fn on_save_error(&mut self, err: &HttpErrorResponse) {
        log::debug!("Saving report failed: {}", err);
        self.is_saving = false;
    }

    fn on_error(&self, message: &str) {
        self.alerts.error(message, HashMap::new());
    }
}
