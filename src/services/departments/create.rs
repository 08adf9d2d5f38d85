use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::DepartmentService;
use crate::errors::MutaError;
use crate::models::departments::requests::DepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{field_error, internal_error, validation_response};
use crate::storage::Storage;

pub(super) const CODE_IN_USE: &str = "Code is already in use.";

pub async fn create_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department: DepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let department = department.normalize();
    if let Err(errors) = department.validate() {
        return Ok(validation_response(errors));
    }

    if let Err(response) = ensure_code_available(&storage, department.code.as_deref(), None).await {
        return Ok(response);
    }

    match storage.create_department(department).await {
        Ok(department) => {
            info!("Department {} ({}) created", department.id, department.name_en);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(MutaError::Conflict(_)) => Ok(code_in_use_response()),
        Err(e) => Ok(internal_error("Failed to create department", e)),
    }
}

/// 代码为空时不检查；比较忽略大小写
pub(super) async fn ensure_code_available(
    storage: &Arc<dyn Storage>,
    code: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(code) = code else {
        return Ok(());
    };
    match storage.find_department_by_code(code, exclude_id).await {
        Ok(Some(_)) => Err(code_in_use_response()),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error("Failed to check department code", e)),
    }
}

pub(super) fn code_in_use_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::DepartmentCodeInUse,
        field_error("code", CODE_IN_USE),
        "Department code is already in use",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use actix_web::http::StatusCode;

    fn civil(code: &str) -> DepartmentRequest {
        DepartmentRequest {
            code: Some(code.to_string()),
            name_ar: "الهندسة المدنية".to_string(),
            name_en: "Civil Engineering".to_string(),
            description_ar: None,
            description_en: None,
        }
    }

    #[actix_web::test]
    async fn test_duplicate_code_is_rejected_with_field_error() {
        let storage = memory_storage().await;
        let request = request_with(&storage);
        let service = DepartmentService::new_lazy();

        let resp = create_department(&service, &request, civil("CIV")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = create_department(&service, &request, civil(" civ ")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::DepartmentCodeInUse as i32);
        assert_eq!(body["data"][0]["field"], "code");
        assert_eq!(body["data"][0]["message"], CODE_IN_USE);

        assert_eq!(storage.list_departments(None).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_invalid_request_returns_422() {
        let storage = memory_storage().await;
        let request = request_with(&storage);
        let mut department = civil("CIV");
        department.name_en = "   ".to_string();

        let resp = create_department(&DepartmentService::new_lazy(), &request, department)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["data"][0]["field"], "name_en");
    }
}
