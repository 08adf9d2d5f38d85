//! 启动种子数据
//!
//! 管理员账号按登录名检查；各内容表只在为空时写入示例数据。
//! 任何一步失败都只记录日志，不影响启动。

use chrono::{Duration, NaiveTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::alerts::requests::AlertInput;
use crate::models::departments::requests::DepartmentRequest;
use crate::models::exam_archive::requests::{ArchiveFileKind, ExamArchiveRequest};
use crate::models::exams::entities::ExamMode;
use crate::models::exams::requests::ExamInput;
use crate::models::faculty::requests::FacultyMemberInput;
use crate::models::news::entities::NewsCategory;
use crate::models::news::requests::NewsItemInput;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{ContentTable, Storage};
use crate::utils::password::hash_password;

fn generate_password(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 某天的固定时刻（UTC）
fn days_from_now_at(days: i64, hour: u32) -> chrono::DateTime<Utc> {
    let date = (Utc::now() + Duration::days(days)).date_naive();
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default())
        .and_utc()
}

async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let admin = &AppConfig::get().admin;
    if storage.get_user_by_username(&admin.username).await?.is_some() {
        return Ok(());
    }

    let password = if admin.password.trim().is_empty() {
        let generated = generate_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Username: {}", admin.username);
        warn!("  Generated password: {}", generated);
        warn!("  Set admin.password (or MUTA_ADMIN__PASSWORD) to choose one");
        warn!("==========================================================");
        generated
    } else {
        admin.password.clone()
    };

    let user = storage
        .create_user(CreateUserRequest {
            username: admin.username.clone(),
            full_name: Some(admin.full_name.clone()),
            password_hash: Some(hash_password(&password)?),
            role: UserRole::Admin,
            provider: None,
            provider_key: None,
        })
        .await?;
    info!("Admin account created (ID: {}, username: {})", user.id, user.username);
    Ok(())
}

async fn seed_departments(storage: &Arc<dyn Storage>) -> Result<()> {
    let departments = [
        ("CIV", "الهندسة المدنية", "Civil Engineering"),
        ("MECH", "الهندسة الميكانيكية", "Mechanical Engineering"),
        ("ELEC", "الهندسة الكهربائية", "Electrical Engineering"),
        ("COMP", "هندسة الحاسوب", "Computer Engineering"),
        ("IND", "الهندسة الصناعية", "Industrial Engineering"),
        ("CHEM", "الهندسة الكيميائية", "Chemical Engineering"),
    ];
    for (code, name_ar, name_en) in departments {
        storage
            .create_department(DepartmentRequest {
                code: Some(code.to_string()),
                name_ar: name_ar.to_string(),
                name_en: name_en.to_string(),
                description_ar: None,
                description_en: None,
            })
            .await?;
    }
    Ok(())
}

async fn department_id(storage: &Arc<dyn Storage>, code: &str) -> Result<Option<i64>> {
    Ok(storage
        .find_department_by_code(code, None)
        .await?
        .map(|department| department.id))
}

async fn seed_faculty(storage: &Arc<dyn Storage>) -> Result<()> {
    let members = [
        ("د. أحمد علي", "Dr. Ahmad Ali", "أستاذ مشارك", "Associate Professor", "ahmad.ali@mutah.edu.jo", "C-115", "ELEC"),
        ("د. هبة زيدان", "Dr. Heba Zeidan", "أستاذ مساعد", "Assistant Professor", "heba.zeidan@mutah.edu.jo", "A-210", "COMP"),
        ("د. رنيم أسعد", "Dr. Raneem Asaad", "أستاذ مساعد", "Assistant Professor", "raneem@mutah.edu.jo", "A-210", "COMP"),
    ];
    for (name_ar, name_en, title_ar, title_en, email, office, code) in members {
        let Some(department_id) = department_id(storage, code).await? else {
            continue;
        };
        storage
            .create_faculty_member(FacultyMemberInput {
                full_name_ar: name_ar.to_string(),
                full_name_en: name_en.to_string(),
                title_ar: Some(title_ar.to_string()),
                title_en: Some(title_en.to_string()),
                email: Some(email.to_string()),
                office: Some(office.to_string()),
                department_id,
            })
            .await?;
    }
    Ok(())
}

async fn seed_exams(storage: &Arc<dyn Storage>) -> Result<()> {
    let (Some(elec), Some(comp), Some(civ)) = (
        department_id(storage, "ELEC").await?,
        department_id(storage, "COMP").await?,
        department_id(storage, "CIV").await?,
    ) else {
        return Ok(());
    };

    let exams = [
        ExamInput {
            business_id: "ee-201-circuits-fall-2025".to_string(),
            course_code: "EE201".to_string(),
            course_name_ar: "دوائر كهربائية (1)".to_string(),
            course_name_en: "Electric Circuits I".to_string(),
            year: 2,
            date_time: days_from_now_at(20, 9),
            mode: ExamMode::InPerson,
            location: Some("C-115".to_string()),
            lms_url: None,
            lms_how_to: None,
            instructions: Some("احضر قبل الامتحان بـ 15 دقيقة، الهوية الجامعية مطلوبة.".to_string()),
            has_stego_protection: true,
            department_id: elec,
        },
        ExamInput {
            business_id: "cs-101-prog-online-fall-2025".to_string(),
            course_code: "CS101".to_string(),
            course_name_ar: "البرمجة (1)".to_string(),
            course_name_en: "Programming I".to_string(),
            year: 1,
            date_time: days_from_now_at(12, 11),
            mode: ExamMode::Online,
            location: None,
            lms_url: Some("https://lms.mutah.edu.jo/course/CS101/exam".to_string()),
            lms_how_to: Some("سجّل دخولك بحساب الجامعة > اختر المقرر > تبويب الامتحانات.".to_string()),
            instructions: Some("ممنوع فتح تبويبات أخرى؛ الوقت محسوب تلقائيًا.".to_string()),
            has_stego_protection: false,
            department_id: comp,
        },
        ExamInput {
            business_id: "ce-210-materials-fall-2025".to_string(),
            course_code: "CE210".to_string(),
            course_name_ar: "مواد إنشائية".to_string(),
            course_name_en: "Construction Materials".to_string(),
            year: 2,
            date_time: days_from_now_at(16, 13),
            mode: ExamMode::InPerson,
            location: Some("A-310".to_string()),
            lms_url: None,
            lms_how_to: None,
            instructions: None,
            has_stego_protection: false,
            department_id: civ,
        },
    ];
    for exam in exams {
        storage.create_exam(exam).await?;
    }
    Ok(())
}

async fn seed_archive(storage: &Arc<dyn Storage>) -> Result<()> {
    let items = [
        (
            "EE201",
            "دوائر كهربائية (1)",
            "Electric Circuits I",
            "Spring 2024",
            "/docs/archive/ee201-f25-mid.pdf",
            Some("/docs/archive/ee201-f25-mid-sol.pdf"),
        ),
        (
            "CS101",
            "البرمجة (1)",
            "Programming I",
            "Fall 2023",
            "/docs/archive/cs101-f23.pdf",
            None,
        ),
    ];
    for (code, name_ar, name_en, term, pdf, solution) in items {
        let item = storage
            .create_archive_item(ExamArchiveRequest {
                course_code: code.to_string(),
                course_name_ar: name_ar.to_string(),
                course_name_en: name_en.to_string(),
                term: Some(term.to_string()),
                clear_solution: false,
            })
            .await?;
        storage
            .set_archive_file(item.id, ArchiveFileKind::Exam, pdf)
            .await?;
        if let Some(solution) = solution {
            storage
                .set_archive_file(item.id, ArchiveFileKind::Solution, solution)
                .await?;
        }
    }
    Ok(())
}

async fn seed_alerts(storage: &Arc<dyn Storage>) -> Result<()> {
    let alerts = [
        AlertInput {
            title_ar: "إعلان موعد امتحان مختبر الدوائر".to_string(),
            title_en: "Circuit Lab Exam Date".to_string(),
            location: Some("Hall 202".to_string()),
            date: Some(Utc::now() + Duration::days(12)),
            is_important: true,
            department_id: department_id(storage, "ELEC").await?,
        },
        AlertInput {
            title_ar: "ورشة: كتابة تقرير مشروع التخرج".to_string(),
            title_en: "Workshop: Graduation Project Report".to_string(),
            location: Some("Hall 105".to_string()),
            date: Some(days_from_now_at(5, 11)),
            is_important: false,
            department_id: department_id(storage, "IND").await?,
        },
    ];
    for alert in alerts {
        storage.create_alert(alert).await?;
    }
    Ok(())
}

async fn seed_news(storage: &Arc<dyn Storage>) -> Result<()> {
    let items = [
        NewsItemInput {
            title_ar: "افتتاح مختبر النظم الذكية".to_string(),
            title_en: "Opening of the Smart Systems Lab".to_string(),
            body_ar: Some("تم افتتاح مختبر النظم الذكية في الكلية...".to_string()),
            body_en: Some("The Smart Systems Lab has been opened...".to_string()),
            category: NewsCategory::Announcement,
            publish_date: Utc::now() - Duration::days(2),
            is_published: true,
        },
        NewsItemInput {
            title_ar: "ورشة تعلم الآلة".to_string(),
            title_en: "Machine Learning Workshop".to_string(),
            body_ar: Some("تنظم الكلية ورشة حول تعلم الآلة...".to_string()),
            body_en: Some("The Faculty will host a workshop on Machine Learning...".to_string()),
            category: NewsCategory::Workshop,
            publish_date: Utc::now() - Duration::days(7),
            is_published: true,
        },
    ];
    for item in items {
        storage.create_news_item(item).await?;
    }
    Ok(())
}

async fn seed_table(storage: &Arc<dyn Storage>, table: ContentTable) -> Result<bool> {
    if !storage.is_table_empty(table).await? {
        return Ok(false);
    }
    match table {
        ContentTable::Departments => seed_departments(storage).await?,
        ContentTable::FacultyMembers => seed_faculty(storage).await?,
        ContentTable::Exams => seed_exams(storage).await?,
        ContentTable::ExamArchiveItems => seed_archive(storage).await?,
        ContentTable::AcademicAlerts => seed_alerts(storage).await?,
        ContentTable::NewsItems => seed_news(storage).await?,
    }
    Ok(true)
}

/// 写入管理员与示例内容；系必须最先写入
pub async fn seed_database(storage: &Arc<dyn Storage>) {
    if let Err(e) = seed_admin(storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let tables = [
        ContentTable::Departments,
        ContentTable::FacultyMembers,
        ContentTable::Exams,
        ContentTable::ExamArchiveItems,
        ContentTable::AcademicAlerts,
        ContentTable::NewsItems,
    ];
    for table in tables {
        match seed_table(storage, table).await {
            Ok(true) => info!("Seeded sample data for {:?}", table),
            Ok(false) => {}
            Err(e) => warn!("Failed to seed {:?}: {}", table, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[actix_web::test]
    async fn test_seed_is_idempotent() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());

        seed_database(&storage).await;
        let counts = storage.dashboard_counts().await.unwrap();
        assert_eq!(counts.departments, 6);
        assert_eq!(counts.faculty, 3);
        assert_eq!(counts.exams, 3);
        assert_eq!(counts.news, 2);

        seed_database(&storage).await;
        let counts = storage.dashboard_counts().await.unwrap();
        assert_eq!(counts.departments, 6);
        assert_eq!(counts.alerts, 2);

        let admin = storage
            .get_user_by_username(&AppConfig::get().admin.username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.has_local_password());

        let archive = storage.list_archive_items(None).await.unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_generated_password_length() {
        assert_eq!(generate_password(16).chars().count(), 16);
    }
}
