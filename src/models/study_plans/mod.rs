use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlanDepartment {
    pub slug: String,
    pub name_ar: String,
    pub name_en: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlan {
    pub department_slug: String,
    pub year: i32,
    pub title_ar: String,
    pub title_en: String,
    pub pdf_path: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_plan.ts")]
pub struct StudyPlansResponse {
    pub departments: Vec<StudyPlanDepartment>,
    /// 按年份降序
    pub plans: Vec<StudyPlan>,
}
