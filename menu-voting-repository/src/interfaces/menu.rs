//! This module defines the `MenuRepository` trait, which provides an interface
//! for interacting with the underlying data store for menu items, vote records,
//! and the weekly menu state. It abstracts the database operations for
//! persistence and retrieval.
use crate::errors::MenuRepositoryError;
use menu_voting_shared::types::{
    DayOfWeek, MenuCategory, MenuItem, MenuItemId, MenuItemPatch, MenuState, NewMenuItem, UserId,
    VoteRecord,
};
use time::OffsetDateTime;

/// Outcome of an atomic vote insert at the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInsert {
    /// The vote record was created and the counter incremented; `votes` is
    /// the counter value after the increment.
    Recorded { votes: i64 },
    /// A record for the (user, item) pair already existed; nothing changed.
    Duplicate,
}

/// Outcome of an atomic vote delete at the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelete {
    /// The vote record was deleted and the counter decremented; `votes` is
    /// the counter value after the decrement.
    Removed { votes: i64 },
    /// No record existed for the (user, item) pair; nothing changed.
    Missing,
}

/// Outcome of a conditional menu state write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    /// The state matched the expected value and was flipped.
    Applied,
    /// The state did not match the expected value; nothing changed.
    Unchanged,
}

/// A trait that defines the interface for interacting with the menu data store.
///
/// Implementors provide methods for managing menu items, casting and revoking
/// votes, and transitioning the weekly menu state. The vote operations carry
/// the atomicity contract the voting protocol depends on.
#[async_trait::async_trait]
pub trait MenuRepository: Send + Sync {
    /// Inserts a newly proposed menu item with a fresh id and a vote counter
    /// of zero.
    ///
    /// # Arguments
    ///
    /// * `item` - The fields of the dish being proposed.
    ///
    /// # Returns
    ///
    /// The stored `MenuItem`, or a `MenuRepositoryError` if the insert fails.
    async fn insert_item(&self, item: NewMenuItem) -> Result<MenuItem, MenuRepositoryError>;

    /// Applies a partial update to an existing menu item.
    ///
    /// The vote counter is never touched by a patch.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item to update.
    /// * `patch` - Fields to change; `None` fields are left as they are.
    ///
    /// # Returns
    ///
    /// The updated `MenuItem`, or `MenuRepositoryError::ItemNotFound` if the
    /// item does not exist.
    async fn update_item(
        &self,
        item_id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, MenuRepositoryError>;

    /// Deletes a menu item and every vote record that references it.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item to delete.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `MenuRepositoryError::ItemNotFound` if the
    /// item does not exist.
    async fn delete_item(&self, item_id: MenuItemId) -> Result<(), MenuRepositoryError>;

    /// Fetches a single menu item by id.
    async fn get_item(&self, item_id: MenuItemId) -> Result<Option<MenuItem>, MenuRepositoryError>;

    /// Lists every menu item, ordered by id for deterministic reads.
    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuRepositoryError>;

    /// Lists the menu items competing in one (day, category) slot, ordered
    /// by id.
    async fn items_for_slot(
        &self,
        day: DayOfWeek,
        category: MenuCategory,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError>;

    /// Atomically records a vote for the (user, item) pair.
    ///
    /// Within a single transaction: if a vote record already exists the call
    /// is a no-op returning `VoteInsert::Duplicate`; otherwise the item's
    /// counter is incremented by exactly one and the record is created.
    /// Concurrent calls for the same pair never produce more than one counted
    /// vote.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The voting principal.
    /// * `item_id` - The item voted for.
    /// * `voted_at` - Timestamp stored on the vote record.
    ///
    /// # Returns
    ///
    /// A `VoteInsert` outcome, `MenuRepositoryError::ItemNotFound` if the
    /// item does not exist, or `MenuRepositoryError::TransactionAborted` if
    /// the store could not complete the transaction.
    async fn cast_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
        voted_at: OffsetDateTime,
    ) -> Result<VoteInsert, MenuRepositoryError>;

    /// Atomically revokes a vote for the (user, item) pair.
    ///
    /// Within a single transaction: if no vote record exists the call is a
    /// no-op returning `VoteDelete::Missing`; otherwise the record is deleted
    /// and the item's counter decremented, floored at zero.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The principal revoking their vote.
    /// * `item_id` - The item the vote was cast for.
    ///
    /// # Returns
    ///
    /// A `VoteDelete` outcome or a `MenuRepositoryError` on failure.
    async fn revoke_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<VoteDelete, MenuRepositoryError>;

    /// Fetches the vote record for a (user, item) pair, if one exists.
    async fn get_vote(
        &self,
        user_id: &UserId,
        item_id: MenuItemId,
    ) -> Result<Option<VoteRecord>, MenuRepositoryError>;

    /// Reads the weekly menu state singleton.
    ///
    /// A missing singleton reads as the default open state.
    async fn menu_state(&self) -> Result<MenuState, MenuRepositoryError>;

    /// Conditionally flips the finalized flag.
    ///
    /// The write only happens when the current flag equals `from`; otherwise
    /// the state is left untouched and `StateTransition::Unchanged` is
    /// returned. This is the idempotence gate for finalize and reset under
    /// concurrent sessions.
    ///
    /// # Arguments
    ///
    /// * `from` - Expected current value of the finalized flag.
    /// * `to` - Value to write when the expectation holds.
    ///
    /// # Returns
    ///
    /// A `StateTransition` outcome or a `MenuRepositoryError` on failure.
    async fn transition_state(
        &self,
        from: bool,
        to: bool,
    ) -> Result<StateTransition, MenuRepositoryError>;
}
