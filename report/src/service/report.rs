use anyhow::anyhow;
use mongodb::bson::{doc, Bson};

use common::{
    access_rules::{AccessRules, Delete, Download, Edit, Read},
    api::report::PublicReport,
    context::GeneralContext,
    default_timestamp,
    entities::report::Report,
    error::{self, bad_request_alert, AddCode},
    pagination::{Page, Pageable},
    repository::RepositoryObject,
    services::REPORT_ENTITY,
};

pub struct ReportService {
    context: GeneralContext,
}

fn unauthorized() -> error::ServiceError {
    anyhow!("Full authentication is required to access this resource").code(401)
}

impl ReportService {
    pub fn new(context: GeneralContext) -> Self {
        Self { context }
    }

    fn reports(&self) -> error::Result<RepositoryObject<Report>> {
        self.context.try_get_repository::<Report>()
    }

    pub async fn create(&self, report: PublicReport) -> error::Result<PublicReport> {
        if !Edit.get_access(&self.context.auth(), ()) {
            return Err(unauthorized());
        }

        if report.id.is_some() {
            return Err(bad_request_alert(
                "A new report cannot already have an ID",
                REPORT_ENTITY,
                "idexists",
            ));
        }

        self.save(report).await
    }

    pub async fn update(&self, report: PublicReport) -> error::Result<PublicReport> {
        if !Edit.get_access(&self.context.auth(), ()) {
            return Err(unauthorized());
        }

        if report.id.is_none() {
            return Err(bad_request_alert("Invalid id", REPORT_ENTITY, "idnull"));
        }

        self.save(report).await
    }

    /// Inserts reports without an id under a fresh one, replaces the others.
    pub async fn save(&self, report: PublicReport) -> error::Result<PublicReport> {
        let reports = self.reports()?;

        let Some(id) = report.id else {
            let id = reports.next_id().await?;
            let report = Report::from_public(id, report, default_timestamp());

            if !reports.insert(&report).await? {
                return Err(anyhow!("Report id {} is already in use", id).code(409));
            }

            return Ok(report.publish());
        };

        let Some(existing) = reports.find("id", &Bson::Int64(id)).await? else {
            return Err(bad_request_alert("Entity not found", REPORT_ENTITY, "idnotfound"));
        };

        if !Edit.get_access(&self.context.auth(), &existing) {
            return Err(anyhow!("User is not allowed to change this report").code(403));
        }

        let report = Report::from_public(id, report, existing.last_modified);
        let saved = reports.update_one(doc! {"id": id}, &report).await?;

        Ok(saved.publish())
    }

    pub async fn find_all(&self, pageable: &Pageable) -> error::Result<Page<PublicReport>> {
        if !Read.get_access(&self.context.auth(), ()) {
            return Err(unauthorized());
        }

        let reports = self.reports()?;
        let sort = pageable.sort_document(Report::stored_field)?;

        let total_elements = reports.count().await?;
        let content = reports
            .find_all(pageable.skip(), pageable.limit() as i64, sort)
            .await?
            .into_iter()
            .map(Report::publish)
            .collect();

        Ok(Page {
            content,
            number: pageable.page,
            size: pageable.limit(),
            total_elements,
        })
    }

    pub async fn find_one(&self, id: i64) -> error::Result<Option<PublicReport>> {
        let auth = self.context.auth();
        if !Read.get_access(&auth, ()) {
            return Err(unauthorized());
        }

        let reports = self.reports()?;

        let Some(report) = reports.find("id", &Bson::Int64(id)).await? else {
            return Ok(None);
        };

        if !Read.get_access(&auth, &report) {
            return Err(anyhow!("User is not allowed to read this report").code(403));
        }

        Ok(Some(report.publish()))
    }

    pub async fn delete(&self, id: i64) -> error::Result<()> {
        let auth = self.context.auth();
        if !auth.is_authenticated() {
            return Err(unauthorized());
        }

        let reports = self.reports()?;

        let Some(report) = reports.delete("id", &Bson::Int64(id)).await? else {
            log::debug!("Report {} was already absent", id);
            return Ok(());
        };

        if !Delete.get_access(&auth, &report) {
            reports.insert(&report).await?;
            return Err(anyhow!("User is not allowed to delete this report").code(403));
        }

        Ok(())
    }

    /// Every stored report, oldest id first.
    pub async fn get_report(&self) -> error::Result<Vec<PublicReport>> {
        if !Download.get_access(&self.context.auth(), ()) {
            return Err(unauthorized());
        }

        let reports = self.reports()?;
        let total = reports.count().await?;

        Ok(reports
            .find_all(0, total.max(1) as i64, Some(doc! {"id": 1}))
            .await?
            .into_iter()
            .map(Report::publish)
            .collect())
    }
}
