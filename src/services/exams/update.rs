use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, business_id_in_use_response, check_input, not_found};
use crate::errors::MutaError;
use crate::models::ApiResponse;
use crate::models::exams::requests::ExamRequest;
use crate::services::internal_error;

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
    exam: ExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_exam_by_id(id).await {
        Ok(Some(existing)) => existing,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to get exam", e)),
    };

    // 提交的业务编号为空时沿用原值
    let input = exam.normalize_for_update(&existing.exam.business_id);
    if let Err(response) = check_input(&storage, &input, Some(id)).await {
        return Ok(response);
    }

    match storage.update_exam(id, input).await {
        Ok(Some(exam)) => {
            info!("Exam {} updated", exam.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                exam,
                "Exam updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(MutaError::Conflict(_)) => Ok(business_id_in_use_response()),
        Err(e) => Ok(internal_error("Failed to update exam", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::departments::requests::DepartmentRequest;
    use crate::models::exams::entities::ExamMode;
    use crate::services::exams::create::create_exam;
    use crate::services::test_support::{body_json, memory_storage, request_with};
    use actix_web::http::StatusCode;
    use chrono::{TimeZone, Utc};

    fn exam(business_id: Option<&str>, department_id: i64) -> ExamRequest {
        ExamRequest {
            business_id: business_id.map(str::to_string),
            course_code: "CE201".to_string(),
            course_name_ar: None,
            course_name_en: "Statics".to_string(),
            year: 2,
            date_time: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            mode: ExamMode::InPerson,
            location: Some("Hall B".to_string()),
            lms_url: None,
            lms_how_to: None,
            instructions: None,
            has_stego_protection: false,
            department_id,
        }
    }

    async fn department_id(storage: &std::sync::Arc<dyn crate::storage::Storage>) -> i64 {
        storage
            .create_department(DepartmentRequest {
                code: Some("CIV".to_string()),
                name_ar: "الهندسة المدنية".to_string(),
                name_en: "Civil Engineering".to_string(),
                description_ar: None,
                description_en: None,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_blank_business_id_keeps_existing_value() {
        let storage = memory_storage().await;
        let dep = department_id(&storage).await;
        let request = request_with(&storage);
        let service = ExamService::new_lazy();

        let resp = create_exam(&service, &request, exam(Some("EXAM-2025-001"), dep))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

        let mut edited = exam(Some("   "), dep);
        edited.location = Some("Hall C".to_string());
        let resp = update_exam(&service, &request, id, edited).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["business_id"], "EXAM-2025-001");
        assert_eq!(body["data"]["location"], "Hall C");
    }

    #[actix_web::test]
    async fn test_business_id_taken_by_another_exam_conflicts() {
        let storage = memory_storage().await;
        let dep = department_id(&storage).await;
        let request = request_with(&storage);
        let service = ExamService::new_lazy();

        create_exam(&service, &request, exam(Some("A-1"), dep)).await.unwrap();
        let resp = create_exam(&service, &request, exam(Some("B-1"), dep)).await.unwrap();
        let id = body_json(resp).await["data"]["id"].as_i64().unwrap();

        let resp = update_exam(&service, &request, id, exam(Some("A-1"), dep))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["data"][0]["field"], "business_id");

        let resp = create_exam(&service, &request, exam(Some(" A-1 "), dep))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
