use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldError;
use crate::models::common::validation::{FieldErrors, normalize_optional, normalize_required};

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_archive.ts")]
pub struct ArchiveListParams {
    pub q: Option<String>,
}

// 创建与编辑共用，文件通过单独的上传接口提交
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_archive.ts")]
pub struct ExamArchiveRequest {
    pub course_code: String,
    pub course_name_ar: String,
    pub course_name_en: String,
    pub term: Option<String>,
    /// 编辑时删除已有答案文件
    #[serde(default)]
    pub clear_solution: bool,
}

impl ExamArchiveRequest {
    pub fn normalize(self) -> Self {
        Self {
            course_code: normalize_required(self.course_code),
            course_name_ar: normalize_required(self.course_name_ar),
            course_name_en: normalize_required(self.course_name_en),
            term: normalize_optional(self.term),
            clear_solution: self.clear_solution,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        errors
            .required_max("course_code", &self.course_code, 20)
            .required_max("course_name_ar", &self.course_name_ar, 200)
            .required_max("course_name_en", &self.course_name_en, 200)
            .max_len_opt("term", self.term.as_deref(), 50);
        errors.into_result()
    }
}

// 上传的是试题还是答案
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam_archive.ts")]
pub enum ArchiveFileKind {
    #[default]
    Exam,
    Solution,
}

#[derive(Debug, Deserialize)]
pub struct ArchiveUploadParams {
    #[serde(default)]
    pub kind: ArchiveFileKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_course_names_are_required() {
        let req = ExamArchiveRequest {
            course_code: "CE301".into(),
            course_name_ar: " ".into(),
            course_name_en: "Structures".into(),
            term: Some(" ".into()),
            clear_solution: false,
        }
        .normalize();
        assert_eq!(req.term, None);
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "course_name_ar");
    }

    #[test]
    fn test_upload_kind_parses_from_query() {
        let p: ArchiveUploadParams =
            serde_json::from_value(serde_json::json!({"kind": "solution"})).unwrap();
        assert_eq!(p.kind, ArchiveFileKind::Solution);
        let p: ArchiveUploadParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.kind, ArchiveFileKind::Exam);
    }
}
