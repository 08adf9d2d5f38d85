use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(120)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string_len(200).null())
                    .col(ColumnDef::new(Users::PasswordHash).string().null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .col(ColumnDef::new(Users::Provider).string_len(20).null())
                    .col(ColumnDef::new(Users::ProviderKey).string_len(200).null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 系表
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Code).string_len(10).null())
                    .col(ColumnDef::new(Departments::NameAr).string_len(200).not_null())
                    .col(ColumnDef::new(Departments::NameEn).string_len(200).not_null())
                    .col(ColumnDef::new(Departments::DescriptionAr).string_len(1000).null())
                    .col(ColumnDef::new(Departments::DescriptionEn).string_len(1000).null())
                    .col(ColumnDef::new(Departments::ImagePath).string_len(260).null())
                    .col(ColumnDef::new(Departments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Departments::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师表，删除系时若仍有教师则拒绝
        manager
            .create_table(
                Table::create()
                    .table(FacultyMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FacultyMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FacultyMembers::FullNameAr)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FacultyMembers::FullNameEn)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FacultyMembers::TitleAr).string_len(120).null())
                    .col(ColumnDef::new(FacultyMembers::TitleEn).string_len(120).null())
                    .col(ColumnDef::new(FacultyMembers::Email).string_len(320).null())
                    .col(ColumnDef::new(FacultyMembers::Office).string_len(100).null())
                    .col(ColumnDef::new(FacultyMembers::PhotoPath).string_len(260).null())
                    .col(
                        ColumnDef::new(FacultyMembers::DepartmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FacultyMembers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FacultyMembers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FacultyMembers::Table, FacultyMembers::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Exams::BusinessId)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Exams::CourseCode).string_len(20).not_null())
                    .col(ColumnDef::new(Exams::CourseNameAr).string_len(200).not_null())
                    .col(ColumnDef::new(Exams::CourseNameEn).string_len(200).not_null())
                    .col(ColumnDef::new(Exams::Year).integer().not_null())
                    .col(ColumnDef::new(Exams::DateTime).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Mode).string_len(20).not_null())
                    .col(ColumnDef::new(Exams::Location).string_len(120).null())
                    .col(ColumnDef::new(Exams::LmsUrl).string_len(500).null())
                    .col(ColumnDef::new(Exams::LmsHowTo).string_len(500).null())
                    .col(ColumnDef::new(Exams::Instructions).string_len(1200).null())
                    .col(
                        ColumnDef::new(Exams::HasStegoProtection)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Exams::DepartmentId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 往年试题表
        manager
            .create_table(
                Table::create()
                    .table(ExamArchiveItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamArchiveItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExamArchiveItems::CourseCode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamArchiveItems::CourseNameAr)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamArchiveItems::CourseNameEn)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamArchiveItems::Term).string_len(50).null())
                    .col(ColumnDef::new(ExamArchiveItems::PdfUrl).string_len(260).null())
                    .col(
                        ColumnDef::new(ExamArchiveItems::SolutionUrl)
                            .string_len(260)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExamArchiveItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamArchiveItems::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 学术通知表，删除系时置空
        manager
            .create_table(
                Table::create()
                    .table(AcademicAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicAlerts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AcademicAlerts::TitleAr).string_len(300).not_null())
                    .col(ColumnDef::new(AcademicAlerts::TitleEn).string_len(300).not_null())
                    .col(ColumnDef::new(AcademicAlerts::Location).string_len(150).null())
                    .col(ColumnDef::new(AcademicAlerts::Date).big_integer().null())
                    .col(
                        ColumnDef::new(AcademicAlerts::IsImportant)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AcademicAlerts::DepartmentId).big_integer().null())
                    .col(
                        ColumnDef::new(AcademicAlerts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AcademicAlerts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AcademicAlerts::Table, AcademicAlerts::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 新闻表
        manager
            .create_table(
                Table::create()
                    .table(NewsItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsItems::TitleAr).string_len(250).not_null())
                    .col(ColumnDef::new(NewsItems::TitleEn).string_len(250).not_null())
                    .col(ColumnDef::new(NewsItems::BodyAr).text().null())
                    .col(ColumnDef::new(NewsItems::BodyEn).text().null())
                    .col(ColumnDef::new(NewsItems::Category).string_len(20).not_null())
                    .col(ColumnDef::new(NewsItems::PublishDate).big_integer().not_null())
                    .col(ColumnDef::new(NewsItems::ImagePath).string_len(260).null())
                    .col(
                        ColumnDef::new(NewsItems::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(NewsItems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(NewsItems::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_provider_key")
                    .table(Users::Table)
                    .col(Users::Provider)
                    .col(Users::ProviderKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_departments_code")
                    .table(Departments::Table)
                    .col(Departments::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_faculty_members_department_id")
                    .table(FacultyMembers::Table)
                    .col(FacultyMembers::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_department_id")
                    .table(Exams::Table)
                    .col(Exams::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_date_time")
                    .table(Exams::Table)
                    .col(Exams::DateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_academic_alerts_department_id")
                    .table(AcademicAlerts::Table)
                    .col(AcademicAlerts::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_items_publish_date")
                    .table(NewsItems::Table)
                    .col(NewsItems::PublishDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(NewsItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamArchiveItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FacultyMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    FullName,
    PasswordHash,
    Role,
    Provider,
    ProviderKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Code,
    NameAr,
    NameEn,
    DescriptionAr,
    DescriptionEn,
    ImagePath,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FacultyMembers {
    #[sea_orm(iden = "faculty_members")]
    Table,
    Id,
    FullNameAr,
    FullNameEn,
    TitleAr,
    TitleEn,
    Email,
    Office,
    PhotoPath,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    BusinessId,
    CourseCode,
    CourseNameAr,
    CourseNameEn,
    Year,
    DateTime,
    Mode,
    Location,
    LmsUrl,
    LmsHowTo,
    Instructions,
    HasStegoProtection,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamArchiveItems {
    #[sea_orm(iden = "exam_archive_items")]
    Table,
    Id,
    CourseCode,
    CourseNameAr,
    CourseNameEn,
    Term,
    PdfUrl,
    SolutionUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AcademicAlerts {
    #[sea_orm(iden = "academic_alerts")]
    Table,
    Id,
    TitleAr,
    TitleEn,
    Location,
    Date,
    IsImportant,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NewsItems {
    #[sea_orm(iden = "news_items")]
    Table,
    Id,
    TitleAr,
    TitleEn,
    BodyAr,
    BodyEn,
    Category,
    PublishDate,
    ImagePath,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}
