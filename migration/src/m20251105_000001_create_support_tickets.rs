use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SupportTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupportTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupportTickets::FullName).string_len(200).not_null())
                    .col(ColumnDef::new(SupportTickets::UniversityId).string_len(50).null())
                    .col(ColumnDef::new(SupportTickets::Email).string_len(320).not_null())
                    .col(ColumnDef::new(SupportTickets::CourseExam).string_len(200).null())
                    .col(
                        ColumnDef::new(SupportTickets::IssueType)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SupportTickets::Description)
                            .string_len(2000)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupportTickets::ScreenshotPath)
                            .string_len(260)
                            .null(),
                    )
                    .col(ColumnDef::new(SupportTickets::AdminReply).string_len(4000).null())
                    .col(
                        ColumnDef::new(SupportTickets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupportTickets::RepliedAt).big_integer().null())
                    .col(
                        ColumnDef::new(SupportTickets::IsResolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_support_tickets_created_at")
                    .table(SupportTickets::Table)
                    .col(SupportTickets::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportTickets::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SupportTickets {
    #[sea_orm(iden = "support_tickets")]
    Table,
    Id,
    FullName,
    UniversityId,
    Email,
    CourseExam,
    IssueType,
    Description,
    ScreenshotPath,
    AdminReply,
    CreatedAt,
    RepliedAt,
    IsResolved,
}
