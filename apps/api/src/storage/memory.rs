//! In-memory fake backing unit tests. Mirrors the Postgres adapter's
//! observable behavior, including ownership scoping and the exactly-once
//! order transition.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::order::{OrderRow, ORDER_STATUS_COMPLETED, ORDER_STATUS_PENDING};
use crate::models::reading::ReadingRow;
use crate::readings::assembler::ReadingSections;
use crate::storage::{CompletionOutcome, NewReading, OrderStore, ReadingStore, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    readings: Mutex<Vec<ReadingRow>>,
    orders: Mutex<Vec<OrderRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: a snapshot of one order by its external id.
    pub fn order_by_external_id(&self, external_order_id: &str) -> Option<OrderRow> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.external_order_id == external_order_id)
            .cloned()
    }
}

#[async_trait]
impl ReadingStore for InMemoryStore {
    async fn save(&self, owner_id: Uuid, reading: NewReading) -> Result<ReadingRow, StoreError> {
        let mut readings = self.readings.lock().unwrap();
        // Server-assigned timestamps are strictly increasing so insertion
        // order stays observable through created_at.
        let mut created_at = Utc::now();
        if let Some(last) = readings.last() {
            if created_at <= last.created_at {
                created_at = last.created_at + chrono::Duration::microseconds(1);
            }
        }
        let row = ReadingRow {
            id: Uuid::new_v4(),
            owner_id,
            name: None,
            birth_date: reading.birth_date,
            birth_time: reading.birth_time,
            birth_place: reading.birth_place,
            foundational_overview: reading.sections.foundational_overview,
            career_and_wealth: reading.sections.career_and_wealth,
            health_and_vitality: reading.sections.health_and_vitality,
            love_and_relationships: reading.sections.love_and_relationships,
            personality_and_inner_growth: reading.sections.personality_and_inner_growth,
            life_path_and_timeline: reading.sections.life_path_and_timeline,
            guidance_and_remedies: reading.sections.guidance_and_remedies,
            translations: None,
            created_at,
        };
        readings.push(row.clone());
        Ok(row)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<ReadingRow>, StoreError> {
        let mut rows: Vec<ReadingRow> = self
            .readings
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ReadingRow, StoreError> {
        self.readings
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Reading {id} not found")))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut readings = self.readings.lock().unwrap();
        let before = readings.len();
        readings.retain(|r| !(r.id == id && r.owner_id == owner_id));
        if readings.len() == before {
            return Err(StoreError::NotFound(format!("Reading {id} not found")));
        }
        Ok(())
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> Result<(), StoreError> {
        let mut readings = self.readings.lock().unwrap();
        let row = readings
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .ok_or_else(|| StoreError::NotFound(format!("Reading {id} not found")))?;
        row.name = Some(name.to_string());
        Ok(())
    }

    async fn cache_translation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        language: &str,
        sections: &ReadingSections,
    ) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(sections).map_err(|e| StoreError::Unexpected(e.to_string()))?;
        let mut readings = self.readings.lock().unwrap();
        let row = readings
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .ok_or_else(|| StoreError::NotFound(format!("Reading {id} not found")))?;
        let mut cache = match row.translations.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        cache.insert(language.to_string(), value);
        row.translations = Some(Value::Object(cache));
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn create(
        &self,
        owner_id: Uuid,
        amount: i64,
        currency: &str,
        external_order_id: &str,
    ) -> Result<OrderRow, StoreError> {
        let row = OrderRow {
            id: Uuid::new_v4(),
            owner_id,
            amount,
            currency: currency.to_string(),
            status: ORDER_STATUS_PENDING.to_string(),
            external_order_id: external_order_id.to_string(),
            payment_id: None,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn complete(
        &self,
        external_order_id: &str,
        payment_id: &str,
    ) -> Result<CompletionOutcome, StoreError> {
        let mut orders = self.orders.lock().unwrap();
        match orders
            .iter_mut()
            .find(|o| o.external_order_id == external_order_id)
        {
            Some(order) if order.status == ORDER_STATUS_PENDING => {
                order.status = ORDER_STATUS_COMPLETED.to_string();
                order.payment_id = Some(payment_id.to_string());
                Ok(CompletionOutcome::Completed(order.id))
            }
            Some(_) => Ok(CompletionOutcome::AlreadyCompleted),
            None => Ok(CompletionOutcome::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_reading(place: &str) -> NewReading {
        NewReading {
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            birth_time: "08:30".to_string(),
            birth_place: place.to_string(),
            sections: ReadingSections {
                foundational_overview: Some("A steady life theme.".to_string()),
                career_and_wealth: Some("Growth in the third decade.".to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_save_then_list_round_trips_fields() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let saved = store.save(owner, sample_reading("Mumbai, India")).await.unwrap();
        let listed = store.list(owner).await.unwrap();

        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row.id, saved.id);
        assert_eq!(row.birth_place, "Mumbai, India");
        assert_eq!(row.birth_time, "08:30");
        assert_eq!(
            row.foundational_overview.as_deref(),
            Some("A steady life theme.")
        );
        assert_eq!(row.health_and_vitality, None);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_monotonic_timestamps() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let first = store.save(owner, sample_reading("Pune")).await.unwrap();
        let second = store.save(owner, sample_reading("Delhi")).await.unwrap();

        assert!(second.created_at >= first.created_at);

        let listed = store.list(owner).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_list_unknown_owner_is_empty_not_an_error() {
        let store = InMemoryStore::new();
        assert!(store.list(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_saves_create_duplicates() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        store.save(owner, sample_reading("Mumbai")).await.unwrap();
        store.save(owner, sample_reading("Mumbai")).await.unwrap();

        assert_eq!(store.list(owner).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_target_record() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let doomed = store.save(owner, sample_reading("Mumbai")).await.unwrap();
        let kept = store.save(owner, sample_reading("Delhi")).await.unwrap();

        store.delete(owner, doomed.id).await.unwrap();

        let listed = store.list(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);

        // Deleting again errors without touching the survivor.
        assert!(matches!(
            store.delete(owner, doomed.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.list(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_their_owner() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let saved = store.save(owner, sample_reading("Mumbai")).await.unwrap();

        assert!(store.list(stranger).await.unwrap().is_empty());
        assert!(matches!(
            store.get(stranger, saved.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(stranger, saved.id).await,
            Err(StoreError::NotFound(_))
        ));
        // Still present for the real owner.
        assert_eq!(store.list(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_updates_display_name_only() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let saved = store.save(owner, sample_reading("Mumbai")).await.unwrap();
        store.rename(owner, saved.id, "My first reading").await.unwrap();

        let row = store.get(owner, saved.id).await.unwrap();
        assert_eq!(row.name.as_deref(), Some("My first reading"));
        assert_eq!(row.birth_place, "Mumbai");
        assert_eq!(row.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn test_cache_translation_merges_languages() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let saved = store.save(owner, sample_reading("Mumbai")).await.unwrap();

        let hindi = ReadingSections {
            foundational_overview: Some("एक स्थिर जीवन विषय।".to_string()),
            ..Default::default()
        };
        let french = ReadingSections {
            foundational_overview: Some("Un thème de vie stable.".to_string()),
            ..Default::default()
        };

        store.cache_translation(owner, saved.id, "Hindi", &hindi).await.unwrap();
        store.cache_translation(owner, saved.id, "French", &french).await.unwrap();

        let row = store.get(owner, saved.id).await.unwrap();
        let cache = row.translations.unwrap();
        assert!(cache.get("Hindi").is_some());
        assert!(cache.get("French").is_some());
    }

    #[tokio::test]
    async fn test_order_completion_is_exactly_once() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let order = store
            .create(owner, 49900, "INR", "order_razorpay_123")
            .await
            .unwrap();
        assert_eq!(order.status, ORDER_STATUS_PENDING);

        let first = store.complete("order_razorpay_123", "pay_abc").await.unwrap();
        assert_eq!(first, CompletionOutcome::Completed(order.id));

        let row = store.order_by_external_id("order_razorpay_123").unwrap();
        assert_eq!(row.status, ORDER_STATUS_COMPLETED);
        assert_eq!(row.payment_id.as_deref(), Some("pay_abc"));

        // Duplicate delivery: no mutation, distinct outcome.
        let second = store.complete("order_razorpay_123", "pay_other").await.unwrap();
        assert_eq!(second, CompletionOutcome::AlreadyCompleted);
        let row = store.order_by_external_id("order_razorpay_123").unwrap();
        assert_eq!(row.payment_id.as_deref(), Some("pay_abc"));
    }

    #[tokio::test]
    async fn test_completing_unknown_order_reports_not_found() {
        let store = InMemoryStore::new();
        let outcome = store.complete("order_missing", "pay_abc").await.unwrap();
        assert_eq!(outcome, CompletionOutcome::NotFound);
    }
}
