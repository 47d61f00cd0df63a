//! In-memory implementation of the menu voting repository.
//!
//! Backs the core service tests and local runs without a database. A single
//! async mutex guards the whole store, so every trait method is atomic with
//! respect to every other, which satisfies the same contract the PostgreSQL
//! implementation provides with row locks and transactions.
use crate::{MenuRepository, MenuRepositoryError, StateTransition, VoteDelete, VoteInsert};
use async_trait::async_trait;
use menu_voting_shared::types::{
    DayOfWeek, MenuCategory, MenuItem, MenuItemId, MenuItemPatch, MenuState, NewMenuItem, UserId,
    VoteRecord,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct MemoryStore {
    items: HashMap<MenuItemId, MenuItem>,
    votes: HashMap<(UserId, MenuItemId), VoteRecord>,
    state: MenuState,
}

/// Mutex-guarded in-memory menu store.
#[derive(Default)]
pub struct MemoryMenuRepository {
    store: Mutex<MemoryStore>,
}

impl MemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for MemoryMenuRepository {
    async fn insert_item(&self, item: NewMenuItem) -> Result<MenuItem, MenuRepositoryError> {
        let mut store = self.store.lock().await;
        let stored = MenuItem {
            id: Uuid::new_v4(),
            title: item.title,
            category: item.category,
            day: item.day,
            dietary_info: item.dietary_info,
            ingredients: item.ingredients,
            image_url: item.image_url,
            votes: 0,
        };
        store.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_item(
        &self,
        item_id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, MenuRepositoryError> {
        let mut store = self.store.lock().await;
        let item = store
            .items
            .get_mut(&item_id)
            .ok_or(MenuRepositoryError::ItemNotFound(item_id))?;
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(day) = patch.day {
            item.day = day;
        }
        if let Some(dietary_info) = patch.dietary_info {
            item.dietary_info = dietary_info;
        }
        if let Some(ingredients) = patch.ingredients {
            item.ingredients = ingredients;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = Some(image_url);
        }
        Ok(item.clone())
    }

    async fn delete_item(&self, item_id: MenuItemId) -> Result<(), MenuRepositoryError> {
        let mut store = self.store.lock().await;
        if store.items.remove(&item_id).is_none() {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }
        // Cascade, matching the ON DELETE CASCADE in the Postgres schema.
        store.votes.retain(|(_, voted_item), _| *voted_item != item_id);
        Ok(())
    }

    async fn get_item(&self, item_id: MenuItemId) -> Result<Option<MenuItem>, MenuRepositoryError> {
        let store = self.store.lock().await;
        Ok(store.items.get(&item_id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let store = self.store.lock().await;
        let mut items: Vec<MenuItem> = store.items.values().cloned().collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn items_for_slot(
        &self,
        day: DayOfWeek,
        category: MenuCategory,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let store = self.store.lock().await;
        let mut items: Vec<MenuItem> = store
            .items
            .values()
            .filter(|item| item.day == day && item.category == category)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn cast_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
        voted_at: OffsetDateTime,
    ) -> Result<VoteInsert, MenuRepositoryError> {
        let mut store = self.store.lock().await;
        if !store.items.contains_key(&item_id) {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }
        let key = (user_id.clone(), item_id);
        if store.votes.contains_key(&key) {
            return Ok(VoteInsert::Duplicate);
        }
        store.votes.insert(
            key,
            VoteRecord {
                user_id: user_id.clone(),
                item_id,
                voted_at,
            },
        );
        let item = store
            .items
            .get_mut(&item_id)
            .ok_or(MenuRepositoryError::ItemNotFound(item_id))?;
        item.votes += 1;
        Ok(VoteInsert::Recorded { votes: item.votes })
    }

    async fn revoke_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<VoteDelete, MenuRepositoryError> {
        let mut store = self.store.lock().await;
        if !store.items.contains_key(&item_id) {
            return Err(MenuRepositoryError::ItemNotFound(item_id));
        }
        if store.votes.remove(&(user_id.clone(), item_id)).is_none() {
            return Ok(VoteDelete::Missing);
        }
        let item = store
            .items
            .get_mut(&item_id)
            .ok_or(MenuRepositoryError::ItemNotFound(item_id))?;
        item.votes = (item.votes - 1).max(0);
        Ok(VoteDelete::Removed { votes: item.votes })
    }

    async fn get_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<Option<VoteRecord>, MenuRepositoryError> {
        let store = self.store.lock().await;
        Ok(store.votes.get(&(user_id.clone(), item_id)).cloned())
    }

    async fn menu_state(&self) -> Result<MenuState, MenuRepositoryError> {
        let store = self.store.lock().await;
        Ok(store.state)
    }

    async fn transition_state(
        &self,
        from: bool,
        to: bool,
    ) -> Result<StateTransition, MenuRepositoryError> {
        let mut store = self.store.lock().await;
        if store.state.is_finalized != from {
            return Ok(StateTransition::Unchanged);
        }
        store.state.is_finalized = to;
        Ok(StateTransition::Applied)
    }
}
