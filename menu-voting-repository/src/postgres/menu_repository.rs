//! PostgreSQL implementation of the menu voting repository.
//!
//! Provides a production PostgreSQL backend for the `MenuRepository` trait
//! with connection pooling and transaction safety.
//!
//! ## Database Tables
//!
//! - `menu_items`: Proposed dishes with their vote counters
//! - `user_votes`: Individual vote records, one per (user, item) pair
//! - `menu_state`: The weekly finalized-flag singleton
use crate::{MenuRepository, MenuRepositoryError, StateTransition, VoteDelete, VoteInsert};
use async_trait::async_trait;
use menu_voting_shared::types::{
    DayOfWeek, DietaryInfo, MenuCategory, MenuItem, MenuItemId, MenuItemPatch, MenuState,
    NewMenuItem, UserId, VoteRecord,
};
use sqlx::postgres::PgRow;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

const STATE_KEY: &str = "weekly";

/// PostgreSQL implementation of the menu voting repository.
///
/// The vote operations run their existence check and counter update inside a
/// single transaction, with the voted item's row locked for the duration, so
/// concurrent casts and revokes on the same (user, item) pair serialize at
/// the database.
pub struct PostgresMenuRepository {
    pool: sqlx::PgPool,
}

impl PostgresMenuRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, MenuRepositoryError> {
        Ok(Self { pool })
    }

    /// Runs the embedded schema migrations against the pool.
    pub async fn migrate(&self) -> Result<(), MenuRepositoryError> {
        sqlx::migrate!("src/postgres/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| MenuRepositoryError::Database(e.into()))?;
        Ok(())
    }

    fn item_from_row(row: &PgRow) -> Result<MenuItem, MenuRepositoryError> {
        let category: String = row.try_get("category")?;
        let day: String = row.try_get("day")?;
        let dietary_info: String = row.try_get("dietary_info")?;
        Ok(MenuItem {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            category: MenuCategory::parse(&category)
                .ok_or_else(|| MenuRepositoryError::InvalidValue(category))?,
            day: DayOfWeek::parse(&day).ok_or_else(|| MenuRepositoryError::InvalidValue(day))?,
            dietary_info: DietaryInfo::parse(&dietary_info)
                .ok_or_else(|| MenuRepositoryError::InvalidValue(dietary_info))?,
            ingredients: row.try_get("ingredients")?,
            image_url: row.try_get("image_url")?,
            votes: row.try_get("votes")?,
        })
    }
}

#[async_trait]
impl MenuRepository for PostgresMenuRepository {
    async fn insert_item(&self, item: NewMenuItem) -> Result<MenuItem, MenuRepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO menu_items (id, title, category, day, dietary_info, ingredients, image_url, votes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0)
            RETURNING id, title, category, day, dietary_info, ingredients, image_url, votes
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&item.title)
        .bind(item.category.as_str())
        .bind(item.day.as_str())
        .bind(item.dietary_info.as_str())
        .bind(&item.ingredients)
        .bind(&item.image_url)
        .fetch_one(&self.pool)
        .await?;

        Self::item_from_row(&row)
    }

    async fn update_item(
        &self,
        item_id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, MenuRepositoryError> {
        // COALESCE keeps unpatched columns; the vote counter is not listed.
        let row = sqlx::query(
            r#"
            UPDATE menu_items
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                day = COALESCE($4, day),
                dietary_info = COALESCE($5, dietary_info),
                ingredients = COALESCE($6, ingredients),
                image_url = COALESCE($7, image_url)
            WHERE id = $1
            RETURNING id, title, category, day, dietary_info, ingredients, image_url, votes
            "#,
        )
        .bind(item_id)
        .bind(patch.title)
        .bind(patch.category.map(|c| c.as_str()))
        .bind(patch.day.map(|d| d.as_str()))
        .bind(patch.dietary_info.map(|d| d.as_str()))
        .bind(patch.ingredients)
        .bind(patch.image_url)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::item_from_row(&row),
            None => Err(MenuRepositoryError::ItemNotFound(item_id)),
        }
    }

    async fn delete_item(&self, item_id: MenuItemId) -> Result<(), MenuRepositoryError> {
        let deleted = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }
        Ok(())
    }

    async fn get_item(&self, item_id: MenuItemId) -> Result<Option<MenuItem>, MenuRepositoryError> {
        let row = sqlx::query(
            "SELECT id, title, category, day, dietary_info, ingredients, image_url, votes
             FROM menu_items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::item_from_row).transpose()
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let rows = sqlx::query(
            "SELECT id, title, category, day, dietary_info, ingredients, image_url, votes
             FROM menu_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::item_from_row).collect()
    }

    async fn items_for_slot(
        &self,
        day: DayOfWeek,
        category: MenuCategory,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let rows = sqlx::query(
            "SELECT id, title, category, day, dietary_info, ingredients, image_url, votes
             FROM menu_items WHERE day = $1 AND category = $2 ORDER BY id",
        )
        .bind(day.as_str())
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::item_from_row).collect()
    }

    async fn cast_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
        voted_at: OffsetDateTime,
    ) -> Result<VoteInsert, MenuRepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the item row so the existence check, the conditional insert,
        // and the increment are indivisible with respect to other votes on
        // the same item.
        let item: Option<i64> =
            sqlx::query_scalar("SELECT votes FROM menu_items WHERE id = $1 FOR UPDATE")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?;
        if item.is_none() {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }

        let inserted = sqlx::query(
            "INSERT INTO user_votes (user_id, item_id, voted_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, item_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(voted_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if inserted == 0 {
            // Dropping the transaction rolls back; nothing was written.
            return Ok(VoteInsert::Duplicate);
        }

        let votes: i64 =
            sqlx::query_scalar("UPDATE menu_items SET votes = votes + 1 WHERE id = $1 RETURNING votes")
                .bind(item_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit()
            .await
            .map_err(|e| MenuRepositoryError::TransactionAborted(e.to_string()))?;
        Ok(VoteInsert::Recorded { votes })
    }

    async fn revoke_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<VoteDelete, MenuRepositoryError> {
        let mut tx = self.pool.begin().await?;

        let item: Option<i64> =
            sqlx::query_scalar("SELECT votes FROM menu_items WHERE id = $1 FOR UPDATE")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?;
        if item.is_none() {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }

        let deleted = sqlx::query("DELETE FROM user_votes WHERE user_id = $1 AND item_id = $2")
            .bind(user_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(VoteDelete::Missing);
        }

        let votes: i64 = sqlx::query_scalar(
            "UPDATE menu_items SET votes = GREATEST(votes - 1, 0) WHERE id = $1 RETURNING votes",
        )
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| MenuRepositoryError::TransactionAborted(e.to_string()))?;
        Ok(VoteDelete::Removed { votes })
    }

    async fn get_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<Option<VoteRecord>, MenuRepositoryError> {
        let row = sqlx::query(
            "SELECT user_id, item_id, voted_at FROM user_votes
             WHERE user_id = $1 AND item_id = $2",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(VoteRecord {
                user_id: row.try_get("user_id")?,
                item_id: row.try_get("item_id")?,
                voted_at: row.try_get("voted_at")?,
            })
        })
        .transpose()
    }

    async fn menu_state(&self) -> Result<MenuState, MenuRepositoryError> {
        let is_finalized: Option<bool> =
            sqlx::query_scalar("SELECT is_finalized FROM menu_state WHERE id = $1")
                .bind(STATE_KEY)
                .fetch_optional(&self.pool)
                .await?;

        Ok(MenuState {
            is_finalized: is_finalized.unwrap_or(false),
        })
    }

    async fn transition_state(
        &self,
        from: bool,
        to: bool,
    ) -> Result<StateTransition, MenuRepositoryError> {
        // A missing singleton row reads as open, so the precondition is
        // checked with COALESCE(.., FALSE); the conflict arm re-checks it
        // against the locked row, which keeps concurrent writers to a single
        // Applied outcome.
        let applied = sqlx::query(
            "INSERT INTO menu_state (id, is_finalized)
             SELECT $1, $3
             WHERE COALESCE(
                 (SELECT is_finalized FROM menu_state WHERE id = $1), FALSE
             ) = $2
             ON CONFLICT (id) DO UPDATE SET is_finalized = EXCLUDED.is_finalized
             WHERE menu_state.is_finalized = $2",
        )
        .bind(STATE_KEY)
        .bind(from)
        .bind(to)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(if applied > 0 {
            StateTransition::Applied
        } else {
            StateTransition::Unchanged
        })
    }
}
