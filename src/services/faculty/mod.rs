pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::faculty::requests::{
    FacultyListParams, FacultyMemberInput, FacultyMemberRequest, SELECT_DEPARTMENT,
};
use crate::services::{field_error, internal_error, validation_response};
use crate::storage::Storage;

pub struct FacultyService {
    storage: Option<Arc<dyn Storage>>,
}

impl FacultyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_faculty(
        &self,
        request: &HttpRequest,
        params: FacultyListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_faculty(self, request, params).await
    }

    pub async fn get_faculty_member(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_faculty_member(self, request, id).await
    }

    pub async fn create_faculty_member(
        &self,
        request: &HttpRequest,
        member: FacultyMemberRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_faculty_member(self, request, member).await
    }

    pub async fn update_faculty_member(
        &self,
        request: &HttpRequest,
        id: i64,
        member: FacultyMemberRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_faculty_member(self, request, id, member).await
    }

    pub async fn delete_faculty_member(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_faculty_member(self, request, id).await
    }

    pub async fn upload_photo(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_faculty_photo(self, request, id, payload).await
    }
}

/// 规范化、校验并确认所选系存在
pub(super) async fn prepare_input(
    storage: &Arc<dyn Storage>,
    member: FacultyMemberRequest,
) -> Result<FacultyMemberInput, HttpResponse> {
    let input = member.normalize();
    input.validate().map_err(validation_response)?;

    match storage.get_department_by_id(input.department_id).await {
        Ok(Some(_)) => Ok(input),
        Ok(None) => Err(validation_response(field_error(
            "department_id",
            SELECT_DEPARTMENT,
        ))),
        Err(e) => Err(internal_error("Failed to check department", e)),
    }
}
