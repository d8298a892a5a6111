//! PostgreSQL adapter for the storage traits.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::order::{OrderRow, ORDER_STATUS_COMPLETED, ORDER_STATUS_PENDING};
use crate::models::reading::ReadingRow;
use crate::readings::assembler::ReadingSections;
use crate::storage::{CompletionOutcome, NewReading, OrderStore, ReadingStore, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgStore {
    async fn save(&self, owner_id: Uuid, reading: NewReading) -> Result<ReadingRow, StoreError> {
        let row = sqlx::query_as::<_, ReadingRow>(
            r#"
            INSERT INTO readings
                (owner_id, birth_date, birth_time, birth_place,
                 foundational_overview, career_and_wealth, health_and_vitality,
                 love_and_relationships, personality_and_inner_growth,
                 life_path_and_timeline, guidance_and_remedies)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(reading.birth_date)
        .bind(&reading.birth_time)
        .bind(&reading.birth_place)
        .bind(&reading.sections.foundational_overview)
        .bind(&reading.sections.career_and_wealth)
        .bind(&reading.sections.health_and_vitality)
        .bind(&reading.sections.love_and_relationships)
        .bind(&reading.sections.personality_and_inner_growth)
        .bind(&reading.sections.life_path_and_timeline)
        .bind(&reading.sections.guidance_and_remedies)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<ReadingRow>, StoreError> {
        let rows = sqlx::query_as::<_, ReadingRow>(
            "SELECT * FROM readings WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ReadingRow, StoreError> {
        let row = sqlx::query_as::<_, ReadingRow>(
            "SELECT * FROM readings WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| StoreError::NotFound(format!("Reading {id} not found")))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM readings WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Reading {id} not found")));
        }
        Ok(())
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE readings SET name = $3 WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Reading {id} not found")));
        }
        Ok(())
    }

    async fn cache_translation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        language: &str,
        sections: &ReadingSections,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(sections)
            .map_err(|e| StoreError::Unexpected(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE readings
            SET translations = jsonb_set(COALESCE(translations, '{}'::jsonb), ARRAY[$3], $4)
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(language)
        .bind(value)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Reading {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create(
        &self,
        owner_id: Uuid,
        amount: i64,
        currency: &str,
        external_order_id: &str,
    ) -> Result<OrderRow, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (owner_id, amount, currency, status, external_order_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(amount)
        .bind(currency)
        .bind(ORDER_STATUS_PENDING)
        .bind(external_order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn complete(
        &self,
        external_order_id: &str,
        payment_id: &str,
    ) -> Result<CompletionOutcome, StoreError> {
        // Guarding on status makes the transition exactly-once: a duplicate
        // delivery matches zero rows.
        let completed: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE orders
            SET status = $1, payment_id = $2
            WHERE external_order_id = $3 AND status = $4
            RETURNING id
            "#,
        )
        .bind(ORDER_STATUS_COMPLETED)
        .bind(payment_id)
        .bind(external_order_id)
        .bind(ORDER_STATUS_PENDING)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((id,)) = completed {
            return Ok(CompletionOutcome::Completed(id));
        }

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM orders WHERE external_order_id = $1")
                .bind(external_order_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(match existing {
            Some(_) => CompletionOutcome::AlreadyCompleted,
            None => CompletionOutcome::NotFound,
        })
    }
}
