use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use crate::models::departments::responses::DepartmentDeleteOutcome;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::upload::{UploadKind, delete_old_file};

pub async fn delete_department(
    service: &DepartmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_department(id).await {
        Ok(DepartmentDeleteOutcome::Deleted(department)) => {
            delete_old_file(UploadKind::DepartmentImage, department.image_path.as_deref());
            info!("Department {} ({}) deleted", department.id, department.name_en);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Department deleted successfully",
            )))
        }
        Ok(DepartmentDeleteOutcome::InUse { faculty, exams }) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DepartmentInUse,
                format!(
                    "Department cannot be deleted while {faculty} faculty member(s) and {exams} exam(s) reference it. Reassign or delete them first."
                ),
            )))
        }
        Ok(DepartmentDeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::DepartmentNotFound, "Department not found"),
        )),
        Err(e) => Ok(internal_error("Failed to delete department", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::departments::requests::DepartmentRequest;
    use crate::models::faculty::requests::FacultyMemberInput;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_department_with_faculty_is_not_deleted() {
        let storage = memory_storage().await;
        let department = storage
            .create_department(DepartmentRequest {
                code: Some("MECH".to_string()),
                name_ar: "الهندسة الميكانيكية".to_string(),
                name_en: "Mechanical Engineering".to_string(),
                description_ar: None,
                description_en: None,
            })
            .await
            .unwrap();
        storage
            .create_faculty_member(FacultyMemberInput {
                full_name_ar: "د. سامي خليل".to_string(),
                full_name_en: "Dr. Sami Khalil".to_string(),
                title_ar: None,
                title_en: None,
                email: None,
                office: None,
                department_id: department.id,
            })
            .await
            .unwrap();

        let request = request_with(&storage);
        let resp = delete_department(&DepartmentService::new_lazy(), &request, department.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("1 faculty member"));

        assert!(storage.get_department_by_id(department.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_missing_department_is_404() {
        let storage = memory_storage().await;
        let request = request_with(&storage);
        let resp = delete_department(&DepartmentService::new_lazy(), &request, 99)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
