use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::StoreError;
use crate::schema::user_preferences;

use super::preferences_traits::PreferenceStoreTrait;

/// Diesel-backed store for preference documents.
pub struct PreferenceRepository {
    pool: Arc<DbPool>,
}

impl PreferenceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PreferenceRepository { pool }
    }
}

impl PreferenceStoreTrait for PreferenceRepository {
    fn fetch(&self, user_id: &str, preference_key: &str) -> Result<String, StoreError> {
        let mut conn = get_connection(&self.pool).map_err(|e| StoreError::Other(e.to_string()))?;
        user_preferences::table
            .find((user_id, preference_key))
            .select(user_preferences::preference_value)
            .first(&mut conn)
            .map_err(StoreError::from)
    }

    fn upsert(
        &self,
        user_id: &str,
        preference_key: &str,
        document: &str,
    ) -> Result<(), StoreError> {
        let mut conn = get_connection(&self.pool).map_err(|e| StoreError::Other(e.to_string()))?;
        let now = chrono::Utc::now().naive_utc();

        diesel::insert_into(user_preferences::table)
            .values((
                user_preferences::user_id.eq(user_id),
                user_preferences::preference_key.eq(preference_key),
                user_preferences::preference_value.eq(document),
                user_preferences::created_at.eq(now),
                user_preferences::updated_at.eq(now),
            ))
            .on_conflict((user_preferences::user_id, user_preferences::preference_key))
            .do_update()
            .set((
                user_preferences::preference_value.eq(document),
                user_preferences::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(StoreError::from)
            .map(|_| ())
    }

    fn update(
        &self,
        user_id: &str,
        preference_key: &str,
        document: &str,
    ) -> Result<usize, StoreError> {
        let mut conn = get_connection(&self.pool).map_err(|e| StoreError::Other(e.to_string()))?;

        diesel::update(user_preferences::table.find((user_id, preference_key)))
            .set((
                user_preferences::preference_value.eq(document),
                user_preferences::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .map_err(StoreError::from)
    }

    fn insert(
        &self,
        user_id: &str,
        preference_key: &str,
        document: &str,
    ) -> Result<(), StoreError> {
        let mut conn = get_connection(&self.pool).map_err(|e| StoreError::Other(e.to_string()))?;
        let now = chrono::Utc::now().naive_utc();

        diesel::insert_into(user_preferences::table)
            .values((
                user_preferences::user_id.eq(user_id),
                user_preferences::preference_key.eq(preference_key),
                user_preferences::preference_value.eq(document),
                user_preferences::created_at.eq(now),
                user_preferences::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .map_err(StoreError::from)
            .map(|_| ())
    }
}
