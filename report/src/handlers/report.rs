use actix_web::{
    delete, get, post, put,
    web::{Json, Path, Query},
    HttpRequest, HttpResponse,
};
use anyhow::anyhow;

use common::{
    api::report::PublicReport,
    context::GeneralContext,
    error::{self, AddCode},
    header_util,
    pagination::{generate_pagination_headers, Pageable},
    services::{APPLICATION_NAME, REPORT_ENTITY},
};

use crate::service::report::ReportService;

#[post("/api/reports")]
pub async fn create_report(
    context: GeneralContext,
    Json(report): Json<PublicReport>,
) -> error::Result<HttpResponse> {
    log::debug!("REST request to save Report : {:?}", report.name);
    let result = ReportService::new(context).create(report).await?;
    let id = result.id.ok_or(anyhow!("Saved report has no id").code(500))?;

    let mut response = HttpResponse::Created();
    response.insert_header(("Location", format!("/api/reports/{}", id)));
    for header in header_util::create_entity_creation_alert(
        APPLICATION_NAME.as_str(),
        true,
        REPORT_ENTITY,
        &id.to_string(),
    ) {
        response.insert_header(header);
    }
    Ok(response.json(result))
}

#[put("/api/reports")]
pub async fn update_report(
    context: GeneralContext,
    Json(report): Json<PublicReport>,
) -> error::Result<HttpResponse> {
    log::debug!("REST request to update Report : {:?}", report.id);
    let result = ReportService::new(context).update(report).await?;
    let id = result.id.ok_or(anyhow!("Saved report has no id").code(500))?;

    let mut response = HttpResponse::Ok();
    for header in header_util::create_entity_update_alert(
        APPLICATION_NAME.as_str(),
        true,
        REPORT_ENTITY,
        &id.to_string(),
    ) {
        response.insert_header(header);
    }
    Ok(response.json(result))
}

#[get("/api/reports")]
pub async fn get_all_reports(
    context: GeneralContext,
    req: HttpRequest,
    Query(pageable): Query<Pageable>,
) -> error::Result<HttpResponse> {
    log::debug!("REST request to get a page of Reports");
    let page = ReportService::new(context).find_all(&pageable).await?;

    let mut response = HttpResponse::Ok();
    for header in generate_pagination_headers(req.path(), pageable.sort.as_deref(), &page) {
        response.insert_header(header);
    }
    Ok(response.json(page.content))
}

#[get("/api/reports/{id}")]
pub async fn get_report(
    context: GeneralContext,
    id: Path<i64>,
) -> error::Result<Json<PublicReport>> {
    let id = id.into_inner();
    log::debug!("REST request to get Report : {}", id);
    match ReportService::new(context).find_one(id).await? {
        Some(report) => Ok(Json(report)),
        None => Err(anyhow!("Report not found").code(404)),
    }
}

#[delete("/api/reports/{id}")]
pub async fn delete_report(
    context: GeneralContext,
    id: Path<i64>,
) -> error::Result<HttpResponse> {
    let id = id.into_inner();
    log::debug!("REST request to delete Report : {}", id);
    ReportService::new(context).delete(id).await?;

    let mut response = HttpResponse::NoContent();
    for header in header_util::create_entity_deletion_alert(
        APPLICATION_NAME.as_str(),
        true,
        REPORT_ENTITY,
        &id.to_string(),
    ) {
        response.insert_header(header);
    }
    Ok(response.finish())
}

#[cfg(test)]
mod test {
    use actix_web::{
        http::StatusCode,
        test::{self, init_service},
    };
    use serde_json::json;

    use common::auth::Auth;

    use crate::test_utils::{bearer, test_state};
    use crate::create_app;

    #[actix_web::test]
    async fn test_create_report() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(Auth::User("user".to_string())))
            .set_json(json!({"name": "Q1", "logo": null}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers().get("Location").unwrap(), "/api/reports/1");
        assert_eq!(
            resp.headers().get("X-reportApp-alert").unwrap(),
            "reportApp.report.created"
        );
        assert_eq!(resp.headers().get("X-reportApp-params").unwrap(), "1");

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"id": 1, "name": "Q1"}));
    }

    #[actix_web::test]
    async fn test_create_report_with_id() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(Auth::User("user".to_string())))
            .set_json(json!({"id": 7, "name": "Q1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("X-reportApp-error").unwrap(),
            "error.idexists"
        );
    }

    #[actix_web::test]
    async fn test_update_report() {
        let app = init_service(create_app(test_state())).await;
        let auth = Auth::User("user".to_string());

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(auth.clone()))
            .set_json(json!({"name": "Q1"}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::put()
            .uri("/api/reports")
            .insert_header(bearer(auth.clone()))
            .set_json(json!({"id": 1, "name": "Q2", "logo": "aGk=", "logoContentType": "image/png"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("X-reportApp-alert").unwrap(),
            "reportApp.report.updated"
        );
        assert_eq!(resp.headers().get("X-reportApp-params").unwrap(), "1");

        let req = test::TestRequest::get()
            .uri("/api/reports/1")
            .insert_header(bearer(auth))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"id": 1, "name": "Q2", "logo": "aGk=", "logoContentType": "image/png"})
        );
    }

    #[actix_web::test]
    async fn test_update_report_without_id() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::put()
            .uri("/api/reports")
            .insert_header(bearer(Auth::User("user".to_string())))
            .set_json(json!({"name": "Q1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("X-reportApp-error").unwrap(),
            "error.idnull"
        );
    }

    #[actix_web::test]
    async fn test_get_missing_report() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::get()
            .uri("/api/reports/99")
            .insert_header(bearer(Auth::User("user".to_string())))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_get_all_reports() {
        let app = init_service(create_app(test_state())).await;
        let auth = Auth::Admin("admin".to_string());

        for name in ["Q1", "Q2", "Q3"] {
            let req = test::TestRequest::post()
                .uri("/api/reports")
                .insert_header(bearer(auth.clone()))
                .set_json(json!({ "name": name }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get()
            .uri("/api/reports?page=0&size=2&sort=id,desc")
            .insert_header(bearer(auth))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("X-Total-Count").unwrap(), "3");
        let link = resp.headers().get("Link").unwrap().to_str().unwrap().to_string();
        assert!(link.starts_with("</api/reports?page=1&size=2&sort=id%2Cdesc>; rel=\"next\""));

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([{"id": 3, "name": "Q3"}, {"id": 2, "name": "Q2"}]));
    }

    #[actix_web::test]
    async fn test_get_all_reports_past_the_last_page_number() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports?page={}", u64::MAX))
            .insert_header(bearer(Auth::User("user".to_string())))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let link = resp.headers().get("Link").unwrap().to_str().unwrap().to_string();
        assert!(!link.contains("rel=\"next\""));

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn test_delete_report() {
        let app = init_service(create_app(test_state())).await;
        let auth = Auth::User("user".to_string());

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(bearer(auth.clone()))
            .set_json(json!({"name": "Q1"}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::delete()
            .uri("/api/reports/1")
            .insert_header(bearer(auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers().get("X-reportApp-alert").unwrap(),
            "reportApp.report.deleted"
        );

        let req = test::TestRequest::get()
            .uri("/api/reports/1")
            .insert_header(bearer(auth))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_requests_without_token_are_unauthorized() {
        let app = init_service(create_app(test_state())).await;

        let req = test::TestRequest::get().uri("/api/reports").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
