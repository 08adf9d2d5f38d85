use crate::models::study_plans::{StudyPlan, StudyPlanDepartment};

/// (slug, 阿语名, 英文名)
const DEPARTMENTS: [(&str, &str, &str); 6] = [
    ("civil", "الهندسة المدنية", "Civil Engineering"),
    ("mech", "الهندسة الميكانيكية", "Mechanical Engineering"),
    ("elec", "الهندسة الكهربائية", "Electrical Engineering"),
    ("comp", "هندسة الحاسوب", "Computer Engineering"),
    ("indus", "الهندسة الصناعية", "Industrial Engineering"),
    ("chem", "الهندسة الكيميائية", "Chemical Engineering"),
];

const PLAN_YEARS: [i32; 2] = [2025, 2024];

pub fn departments() -> Vec<StudyPlanDepartment> {
    DEPARTMENTS
        .iter()
        .map(|(slug, name_ar, name_en)| StudyPlanDepartment {
            slug: slug.to_string(),
            name_ar: name_ar.to_string(),
            name_en: name_en.to_string(),
        })
        .collect()
}

fn plan(slug: &str, year: i32) -> StudyPlan {
    StudyPlan {
        department_slug: slug.to_string(),
        year,
        title_ar: format!("الخطة الدراسية {year}"),
        title_en: format!("Study Plan {year}"),
        pdf_path: format!("/docs/plans/{slug}/plan-{year}.pdf"),
    }
}

/// 按年份降序，同一年按院系顺序
pub fn plans() -> Vec<StudyPlan> {
    PLAN_YEARS
        .iter()
        .flat_map(|year| DEPARTMENTS.iter().map(move |(slug, _, _)| plan(slug, *year)))
        .collect()
}

pub fn find(department_slug: &str, year: i32) -> Option<StudyPlan> {
    let slug = department_slug.trim().to_ascii_lowercase();
    DEPARTMENTS
        .iter()
        .any(|(s, _, _)| *s == slug)
        .then_some(())
        .filter(|_| PLAN_YEARS.contains(&year))
        .map(|_| plan(&slug, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plans_are_newest_first() {
        let plans = plans();
        assert_eq!(plans.len(), 12);
        assert!(plans.windows(2).all(|w| w[0].year >= w[1].year));
        assert_eq!(plans[0].pdf_path, "/docs/plans/civil/plan-2025.pdf");
    }

    #[test]
    fn test_find_plan() {
        let plan = find("COMP", 2024).unwrap();
        assert_eq!(plan.department_slug, "comp");
        assert_eq!(plan.title_en, "Study Plan 2024");
        assert!(find("comp", 1999).is_none());
        assert!(find("arch", 2024).is_none());
    }
}
