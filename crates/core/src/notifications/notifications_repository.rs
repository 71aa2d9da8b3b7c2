use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::notifications;

use super::notifications_model::{NewNotification, Notification, NotificationDB};
use super::notifications_traits::NotificationRepositoryTrait;

/// Repository for managing notification records in the database
pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        NotificationRepository { pool }
    }
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
        let mut notification_db: NotificationDB = new_notification.into();
        notification_db.id = Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(notifications::table)
            .values(&notification_db)
            .execute(&mut conn)?;

        Ok(notification_db.into())
    }

    fn exists_active(
        &self,
        user_id: &str,
        source_type: &str,
        source_id: &str,
        category: &str,
    ) -> Result<bool> {
        use diesel::dsl::count_star;

        let mut conn = get_connection(&self.pool)?;
        let matches: i64 = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::deleted.eq(false))
            .filter(notifications::source_type.eq(source_type))
            .filter(notifications::source_id.eq(source_id))
            .filter(notifications::category.eq(category))
            .select(count_star())
            .first(&mut conn)?;

        Ok(matches > 0)
    }

    fn list_active(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let records = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::deleted.eq(false))
            .order(notifications::created_at.desc())
            .select(NotificationDB::as_select())
            .load::<NotificationDB>(&mut conn)?;

        Ok(records.into_iter().map(Notification::from).collect())
    }

    fn soft_delete_by_source(
        &self,
        user_id: &str,
        source_type: &str,
        source_ids: &[String],
    ) -> Result<usize> {
        if source_ids.is_empty() {
            return Ok(0);
        }

        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::deleted.eq(false))
                .filter(notifications::source_type.eq(source_type))
                .filter(notifications::source_id.eq_any(source_ids)),
        )
        .set((
            notifications::deleted.eq(true),
            notifications::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn soft_delete_by_categories(&self, user_id: &str, categories: &[&str]) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::deleted.eq(false))
                .filter(notifications::category.eq_any(categories.iter().copied())),
        )
        .set((
            notifications::deleted.eq(true),
            notifications::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn mark_read(&self, notification_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(notifications::table.find(notification_id))
            .set((
                notifications::is_read.eq(true),
                notifications::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let affected = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::is_read.eq(false))
                .filter(notifications::deleted.eq(false)),
        )
        .set((
            notifications::is_read.eq(true),
            notifications::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
