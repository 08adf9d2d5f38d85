use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径参数 `{id}` 的安全提取器：必须是正整数，否则直接返回 400
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req.match_info().get("id")).map(SafeIDI64))
    }
}

fn parse_positive_id(raw: Option<&str>) -> Result<i64, actix_web::Error> {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Invalid id in path",
            ));
            Err(InternalError::from_response("invalid path id", response).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("42")).ok(), Some(42));
        assert!(parse_positive_id(Some("0")).is_err());
        assert!(parse_positive_id(Some("-1")).is_err());
        assert!(parse_positive_id(Some("abc")).is_err());
        assert!(parse_positive_id(None).is_err());
    }
}
