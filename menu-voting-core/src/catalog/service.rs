//! This module defines the `MenuCatalogService`, the management-only surface
//! for maintaining the set of proposed dishes. Vote counters are owned by the
//! voting protocol and are never writable from here.
use crate::errors::CatalogError;
use menu_voting_repository::{MenuRepository, MenuRepositoryError};
use menu_voting_shared::types::{MenuItem, MenuItemId, MenuItemPatch, NewMenuItem, Principal};
use std::sync::Arc;
use tracing::info;

/// `MenuCatalogService` manages the menu item catalog.
pub struct MenuCatalogService {
    repository: Arc<dyn MenuRepository>,
}

impl MenuCatalogService {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self { repository }
    }

    /// Proposes a new dish (management only). The vote counter starts at zero.
    pub async fn propose_item(
        &self,
        principal: &Principal,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogError> {
        if !principal.is_management() {
            return Err(CatalogError::PermissionDenied);
        }
        let stored = self.repository.insert_item(item).await?;
        info!(item = %stored.id, title = %stored.title, "menu item proposed");
        Ok(stored)
    }

    /// Edits an existing dish (management only). The patch cannot touch the
    /// vote counter.
    pub async fn edit_item(
        &self,
        principal: &Principal,
        item_id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, CatalogError> {
        if !principal.is_management() {
            return Err(CatalogError::PermissionDenied);
        }
        self.repository
            .update_item(item_id, patch)
            .await
            .map_err(remap_item_error)
    }

    /// Deletes a dish (management only), cascading its vote records.
    pub async fn delete_item(
        &self,
        principal: &Principal,
        item_id: MenuItemId,
    ) -> Result<(), CatalogError> {
        if !principal.is_management() {
            return Err(CatalogError::PermissionDenied);
        }
        self.repository
            .delete_item(item_id)
            .await
            .map_err(remap_item_error)?;
        info!(item = %item_id, "menu item deleted");
        Ok(())
    }

    /// Seeds the catalog with `items` when it is currently empty.
    ///
    /// Returns the number of items inserted; an already-populated catalog is
    /// left untouched and reports zero.
    pub async fn seed_if_empty(
        &self,
        principal: &Principal,
        items: Vec<NewMenuItem>,
    ) -> Result<usize, CatalogError> {
        if !principal.is_management() {
            return Err(CatalogError::PermissionDenied);
        }
        if !self.repository.list_items().await?.is_empty() {
            return Ok(0);
        }
        let count = items.len();
        for item in items {
            self.repository.insert_item(item).await?;
        }
        info!(count, "menu catalog seeded");
        Ok(count)
    }
}

fn remap_item_error(err: MenuRepositoryError) -> CatalogError {
    match err {
        MenuRepositoryError::ItemNotFound(id) => CatalogError::ItemNotFound(id),
        other => CatalogError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_voting_repository::MemoryMenuRepository;
    use menu_voting_shared::types::{DayOfWeek, DietaryInfo, MenuCategory, Role};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn student() -> Principal {
        Principal {
            id: "s1".to_string(),
            email: "s1@psgitech.ac.in".to_string(),
            display_name: "Student One".to_string(),
            role: Role::Student,
        }
    }

    fn management() -> Principal {
        Principal {
            id: "mgmt-1".to_string(),
            email: "management@psgitech.ac.in".to_string(),
            display_name: "Mess Management".to_string(),
            role: Role::Management,
        }
    }

    fn new_item(title: &str) -> NewMenuItem {
        NewMenuItem {
            title: title.to_string(),
            category: MenuCategory::Dinner,
            day: DayOfWeek::Friday,
            dietary_info: DietaryInfo::NonVeg,
            ingredients: vec!["chicken".to_string()],
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_propose_and_edit() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let service = MenuCatalogService::new(repo);
        let mgmt = management();

        let item = service
            .propose_item(&mgmt, new_item("Chicken Curry"))
            .await
            .unwrap();
        assert_eq!(item.votes, 0);

        let patched = service
            .edit_item(
                &mgmt,
                item.id,
                MenuItemPatch {
                    dietary_info: Some(DietaryInfo::Veg),
                    title: Some("Paneer Curry".to_string()),
                    ..MenuItemPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.title, "Paneer Curry");
        assert_eq!(patched.dietary_info, DietaryInfo::Veg);
    }

    #[tokio::test]
    async fn test_students_cannot_manage_catalog() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let service = MenuCatalogService::new(repo);

        assert!(matches!(
            service.propose_item(&student(), new_item("Dosa")).await.unwrap_err(),
            CatalogError::PermissionDenied
        ));
        assert!(matches!(
            service.delete_item(&student(), Uuid::new_v4()).await.unwrap_err(),
            CatalogError::PermissionDenied
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_item_and_votes() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let service = MenuCatalogService::new(repo.clone());
        let mgmt = management();

        let item = service.propose_item(&mgmt, new_item("Dosa")).await.unwrap();
        repo.cast_vote(&"s1".to_string(), item.id, OffsetDateTime::now_utc())
            .await
            .unwrap();

        service.delete_item(&mgmt, item.id).await.unwrap();
        assert!(repo.get_item(item.id).await.unwrap().is_none());
        assert!(repo
            .get_vote(&"s1".to_string(), item.id)
            .await
            .unwrap()
            .is_none());

        let err = service.delete_item(&mgmt, item.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::ItemNotFound(_)));
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let service = MenuCatalogService::new(repo);
        let mgmt = management();

        let seeded = service
            .seed_if_empty(&mgmt, vec![new_item("Dosa"), new_item("Pongal")])
            .await
            .unwrap();
        assert_eq!(seeded, 2);

        let again = service
            .seed_if_empty(&mgmt, vec![new_item("Upma")])
            .await
            .unwrap();
        assert_eq!(again, 0);
    }
}
