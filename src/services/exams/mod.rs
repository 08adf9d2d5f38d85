pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{ExamInput, ExamListParams, ExamRequest};
use crate::models::faculty::requests::SELECT_DEPARTMENT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{field_error, internal_error, validation_response};
use crate::storage::Storage;

pub(super) const BUSINESS_ID_IN_USE: &str = "Business id is already in use.";

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        params: ExamListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, params).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, id).await
    }

    pub async fn get_exam_by_business_id(
        &self,
        request: &HttpRequest,
        business_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_exam_by_business_id(self, request, business_id).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam: ExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, exam).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        exam: ExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, id, exam).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, id).await
    }
}

/// 校验输入、所选系与业务编号唯一性；`current_id` 为编辑中的考试
pub(super) async fn check_input(
    storage: &Arc<dyn Storage>,
    input: &ExamInput,
    current_id: Option<i64>,
) -> Result<(), HttpResponse> {
    input.validate().map_err(validation_response)?;

    match storage.get_department_by_id(input.department_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(validation_response(field_error(
                "department_id",
                SELECT_DEPARTMENT,
            )));
        }
        Err(e) => return Err(internal_error("Failed to check department", e)),
    }

    match storage.get_exam_by_business_id(&input.business_id).await {
        Ok(Some(existing)) if Some(existing.exam.id) != current_id => {
            Err(business_id_in_use_response())
        }
        Ok(_) => Ok(()),
        Err(e) => Err(internal_error("Failed to check business id", e)),
    }
}

pub(super) fn business_id_in_use_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::ExamBusinessIdInUse,
        field_error("business_id", BUSINESS_ID_IN_USE),
        "Exam business id is already in use",
    ))
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ExamNotFound,
        "Exam not found",
    ))
}
