use crate::types::{MenuItemId, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Represents a principal's vote for a menu item.
///
/// The (user, item) pair is the identity of the record; at most one exists
/// for a given pair at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub user_id: UserId,
    pub item_id: MenuItemId,
    #[serde(with = "time::serde::rfc3339")]
    pub voted_at: OffsetDateTime,
}
