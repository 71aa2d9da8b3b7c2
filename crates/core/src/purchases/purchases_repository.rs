use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::purchases;

use super::purchases_model::{NewPurchase, Purchase, PurchaseDB, PurchaseStatus};
use super::purchases_traits::PurchaseRepositoryTrait;

/// Repository for managing planned purchases in the database
pub struct PurchaseRepository {
    pool: Arc<DbPool>,
}

impl PurchaseRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PurchaseRepository { pool }
    }
}

impl PurchaseRepositoryTrait for PurchaseRepository {
    fn create(&self, new_purchase: NewPurchase) -> Result<Purchase> {
        new_purchase.validate()?;

        let mut purchase_db: PurchaseDB = new_purchase.into();
        purchase_db.id = Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(purchases::table)
            .values(&purchase_db)
            .execute(&mut conn)?;

        Ok(purchase_db.into())
    }

    fn list_planned(&self, user_id: &str) -> Result<Vec<Purchase>> {
        let mut conn = get_connection(&self.pool)?;
        let records = purchases::table
            .filter(purchases::user_id.eq(user_id))
            .filter(purchases::status.eq(PurchaseStatus::Planned.as_str()))
            .order(purchases::planned_date.asc())
            .select(PurchaseDB::as_select())
            .load::<PurchaseDB>(&mut conn)?;

        Ok(records.into_iter().map(Purchase::from).collect())
    }

    fn list_inactive(&self, user_id: &str) -> Result<Vec<Purchase>> {
        let mut conn = get_connection(&self.pool)?;
        let records = purchases::table
            .filter(purchases::user_id.eq(user_id))
            .filter(purchases::status.ne(PurchaseStatus::Planned.as_str()))
            .select(PurchaseDB::as_select())
            .load::<PurchaseDB>(&mut conn)?;

        Ok(records.into_iter().map(Purchase::from).collect())
    }

    fn update_status(&self, purchase_id: &str, status: PurchaseStatus) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::update(purchases::table.find(purchase_id))
            .set((
                purchases::status.eq(status.as_str()),
                purchases::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
