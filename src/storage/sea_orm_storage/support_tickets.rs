use super::{SeaOrmStorage, map_read_err, map_write_err};
use crate::entity::support_tickets::{ActiveModel, Column, Entity as SupportTickets};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    support_tickets::{
        entities::SupportTicket,
        requests::{SupportTicketForm, TicketListQuery},
        responses::SupportTicketListResponse,
    },
};
use crate::utils::{lower_contains, normalize_search};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_support_ticket_impl(
        &self,
        form: SupportTicketForm,
        screenshot_path: Option<String>,
    ) -> Result<SupportTicket> {
        let model = ActiveModel {
            full_name: Set(form.full_name),
            university_id: Set(form.university_id),
            email: Set(form.email),
            course_exam: Set(form.course_exam),
            issue_type: Set(form.issue_type.code()),
            description: Set(form.description),
            screenshot_path: Set(screenshot_path),
            admin_reply: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            replied_at: Set(None),
            is_resolved: Set(false),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err("创建工单", e))?;

        Ok(result.into_ticket())
    }

    /// 分页列出工单，最新的在前
    pub async fn list_support_tickets_impl(
        &self,
        query: TicketListQuery,
    ) -> Result<SupportTicketListResponse> {
        let page = query.page.max(1);
        let size = query.page_size.max(1);
        let search = normalize_search(query.search.as_deref());

        let mut select = SupportTickets::find();

        if let Some(ref term) = search {
            select = select.filter(
                Condition::any()
                    .add(lower_contains(Column::FullName, term))
                    .add(lower_contains(Column::Email, term))
                    .add(lower_contains(Column::CourseExam, term))
                    .add(lower_contains(Column::Description, term)),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| map_read_err("查询工单总数", e))?;

        // 超出末页时直接返回空页
        let tickets = if (page - 1).saturating_mul(size) >= total {
            Vec::new()
        } else {
            paginator
                .fetch_page(page - 1)
                .await
                .map_err(|e| map_read_err("查询工单列表", e))?
        };

        Ok(SupportTicketListResponse {
            items: tickets.into_iter().map(|m| m.into_ticket()).collect(),
            pagination: PaginationInfo::new(page, size, total),
            query: search,
        })
    }

    pub async fn get_support_ticket_impl(&self, id: i64) -> Result<Option<SupportTicket>> {
        let result = SupportTickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询工单", e))?;

        Ok(result.map(|m| m.into_ticket()))
    }

    /// 保存管理员回复
    pub async fn reply_support_ticket_impl(
        &self,
        id: i64,
        reply: &str,
        mark_resolved: bool,
    ) -> Result<Option<SupportTicket>> {
        let existing = SupportTickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询工单", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.admin_reply = Set(Some(reply.to_string()));
        active.replied_at = Set(Some(chrono::Utc::now().timestamp()));
        if mark_resolved {
            active.is_resolved = Set(true);
        }

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| map_write_err("保存工单回复", e))?;

        Ok(Some(result.into_ticket()))
    }

    pub async fn delete_support_ticket_impl(&self, id: i64) -> Result<Option<SupportTicket>> {
        let existing = SupportTickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_read_err("查询工单", e))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        SupportTickets::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err("删除工单", e))?;

        Ok(Some(model.into_ticket()))
    }
}
