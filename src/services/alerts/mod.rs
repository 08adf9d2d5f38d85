pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::alerts::requests::{
    AlertInput, AlertListParams, AlertRequest, LatestAlertsParams,
};
use crate::models::faculty::requests::SELECT_DEPARTMENT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{field_error, internal_error, validation_response};
use crate::storage::Storage;

pub struct AlertService {
    storage: Option<Arc<dyn Storage>>,
}

impl AlertService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_alerts(
        &self,
        request: &HttpRequest,
        params: AlertListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_alerts(self, request, params).await
    }

    // 首页最新通知
    pub async fn latest_alerts(
        &self,
        request: &HttpRequest,
        params: LatestAlertsParams,
    ) -> ActixResult<HttpResponse> {
        list::latest_alerts(self, request, params).await
    }

    pub async fn get_alert(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_alert(self, request, id).await
    }

    pub async fn create_alert(
        &self,
        request: &HttpRequest,
        alert: AlertRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_alert(self, request, alert).await
    }

    pub async fn update_alert(
        &self,
        request: &HttpRequest,
        id: i64,
        alert: AlertRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_alert(self, request, id, alert).await
    }

    pub async fn delete_alert(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_alert(self, request, id).await
    }
}

/// 规范化并校验；关联的系必须存在
pub(super) async fn prepare_input(
    storage: &Arc<dyn Storage>,
    alert: AlertRequest,
) -> Result<AlertInput, HttpResponse> {
    let input = alert.normalize();
    input.validate().map_err(validation_response)?;

    if let Some(department_id) = input.department_id {
        match storage.get_department_by_id(department_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(validation_response(field_error(
                    "department_id",
                    SELECT_DEPARTMENT,
                )));
            }
            Err(e) => return Err(internal_error("Failed to check department", e)),
        }
    }
    Ok(input)
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AlertNotFound,
        "Alert not found",
    ))
}
