use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;
use crate::handlers::form::SubmittedFields;
use crate::models::employee::{EmployeeRecord, EmployeeSubmission};
use crate::services::employee::EmployeeService;

pub const SAVED_MESSAGE: &str = "Employee data saved successfully to JSON file";

#[derive(Serialize)]
struct EmployeeSavedResponse<'a> {
    status: bool,
    message: &'a str,
    data: &'a EmployeeRecord,
}

pub async fn get_employees(service: web::Data<EmployeeService>) -> Result<HttpResponse, AppError> {
    let data = service.list().await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": true,
        "data": data,
    })))
}

pub async fn send_data_employee(
    service: web::Data<EmployeeService>,
    fields: SubmittedFields,
) -> Result<HttpResponse, AppError> {
    let submission = EmployeeSubmission::from_fields(fields.as_map());
    let record = service.register(submission).await?;

    Ok(HttpResponse::Ok().json(EmployeeSavedResponse {
        status: true,
        message: SAVED_MESSAGE,
        data: &record,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::Value;

    use super::*;
    use crate::handlers;
    use crate::models::employee::sample_fields;
    use crate::storage::{temp_data_file, JsonFileStore};

    fn service_data() -> web::Data<EmployeeService> {
        web::Data::new(EmployeeService::new(Arc::new(JsonFileStore::new(temp_data_file()))))
    }

    fn form_body(overrides: &[(&str, &str)]) -> String {
        let mut fields = sample_fields();
        for (key, value) in overrides {
            fields.insert(key.to_string(), value.to_string());
        }
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish()
    }

    fn post_form(body: String) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/sendDataEmployee")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn listing_without_file_is_not_found() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": false, "message": "File not found" }));
    }

    #[actix_web::test]
    async fn valid_submission_returns_normalized_record() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let resp = test::call_service(&app, post_form(form_body(&[])).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], true);
        assert_eq!(body["message"], SAVED_MESSAGE);
        assert_eq!(body["data"]["dob"], "04-07-1990");
        assert_eq!(body["data"]["hireDate"], "15-01-2021");
        assert_eq!(body["data"]["maritalStatus"], "married");
    }

    #[actix_web::test]
    async fn invalid_gender_is_unprocessable() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let resp = test::call_service(&app, post_form(form_body(&[("gender", "robot")])).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["errors"]["gender"][0], "The selected gender is invalid.");
    }

    #[actix_web::test]
    async fn invalid_phone_is_unprocessable() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        for phone in ["01234abc", "12345", "1234567890123456"] {
            let resp = test::call_service(&app, post_form(form_body(&[("phone", phone)])).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{phone}");

            let body: Value = test::read_body_json(resp).await;
            assert!(body["errors"]["phone"].is_array(), "{phone}");
        }
    }

    #[actix_web::test]
    async fn submissions_are_listed_in_order_as_returned() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let mut returned = Vec::new();
        for name in ["Farid", "Grace", "Hana"] {
            let resp = test::call_service(&app, post_form(form_body(&[("name", name)])).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            returned.push(body["data"].clone());
        }

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], true);
        assert_eq!(body["data"], Value::Array(returned));
    }

    #[actix_web::test]
    async fn rejected_submission_does_not_create_file() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let resp = test::call_service(&app, post_form(form_body(&[("email", "nope")])).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn empty_request_reports_every_field_required() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let req = test::TestRequest::post().uri("/api/sendDataEmployee").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["errors"].as_object().unwrap().len(), 10);
        assert_eq!(body["errors"]["name"][0], "The name field is required.");
    }

    #[actix_web::test]
    async fn unsupported_content_type_is_rejected() {
        let app = test::init_service(App::new().app_data(service_data()).configure(handlers::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/sendDataEmployee")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("hello")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
