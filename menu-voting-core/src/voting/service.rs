//! This module defines the `VotingService`, the entry point for casting and
//! revoking votes and for reading vote tallies. Preconditions (role, voting
//! window) are checked here; the atomicity of the vote itself is delegated to
//! the repository's transactional contract.
use crate::errors::VotingError;
use menu_voting_repository::{MenuRepository, MenuRepositoryError, VoteDelete, VoteInsert};
use menu_voting_shared::types::{DayOfWeek, MenuCategory, MenuItem, MenuItemId, Principal};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Outcome of a cast-vote call.
///
/// `AlreadyVoted` is a soft rejection surfaced as an outcome rather than an
/// error: nothing changed and the caller can tell the user so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastVoteOutcome {
    Accepted { votes: i64 },
    AlreadyVoted,
}

/// Outcome of a revoke-vote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeVoteOutcome {
    Revoked { votes: i64 },
    NotVoted,
}

/// `VotingService` implements the per-user, per-item voting protocol.
///
/// The repository is injected; no ambient store handle exists.
pub struct VotingService {
    repository: Arc<dyn MenuRepository>,
}

impl VotingService {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self { repository }
    }

    /// Casts a vote by `principal` for `item_id`.
    ///
    /// Students only, and only while voting is open. The existence check,
    /// counter increment, and vote-record insert happen in one repository
    /// transaction, so concurrent casts for the same pair count at most once.
    ///
    /// # Returns
    ///
    /// `CastVoteOutcome::Accepted` with the new counter value, the soft
    /// `CastVoteOutcome::AlreadyVoted`, or a `VotingError`.
    pub async fn cast_vote(
        &self,
        principal: &Principal,
        item_id: MenuItemId,
    ) -> Result<CastVoteOutcome, VotingError> {
        if !principal.is_student() {
            return Err(VotingError::PermissionDenied);
        }
        if self.repository.menu_state().await?.is_finalized {
            return Err(VotingError::VotingClosed);
        }

        let outcome = self
            .repository
            .cast_vote(&principal.id, item_id, OffsetDateTime::now_utc())
            .await
            .map_err(remap_vote_error)?;

        match outcome {
            VoteInsert::Recorded { votes } => {
                info!(user = %principal.id, item = %item_id, votes, "vote recorded");
                Ok(CastVoteOutcome::Accepted { votes })
            }
            VoteInsert::Duplicate => {
                debug!(user = %principal.id, item = %item_id, "duplicate vote ignored");
                Ok(CastVoteOutcome::AlreadyVoted)
            }
        }
    }

    /// Revokes the vote cast by `principal` for `item_id`.
    ///
    /// Runs under the same transaction discipline as casting: the record
    /// delete and the floored decrement are indivisible.
    pub async fn revoke_vote(
        &self,
        principal: &Principal,
        item_id: MenuItemId,
    ) -> Result<RevokeVoteOutcome, VotingError> {
        if !principal.is_student() {
            return Err(VotingError::PermissionDenied);
        }
        if self.repository.menu_state().await?.is_finalized {
            return Err(VotingError::VotingClosed);
        }

        let outcome = self
            .repository
            .revoke_vote(&principal.id, item_id)
            .await
            .map_err(remap_vote_error)?;

        match outcome {
            VoteDelete::Removed { votes } => {
                info!(user = %principal.id, item = %item_id, votes, "vote revoked");
                Ok(RevokeVoteOutcome::Revoked { votes })
            }
            VoteDelete::Missing => Ok(RevokeVoteOutcome::NotVoted),
        }
    }

    /// Returns whether `principal` has an extant vote for `item_id`.
    pub async fn has_voted(
        &self,
        principal: &Principal,
        item_id: MenuItemId,
    ) -> Result<bool, VotingError> {
        Ok(self
            .repository
            .get_vote(&principal.id, item_id)
            .await?
            .is_some())
    }

    /// Tallies one (day, category) slot for a management view.
    ///
    /// Pure read: items ordered by vote count descending, ties broken by
    /// ascending item id so the ordering is stable across recomputation.
    pub async fn tally(
        &self,
        principal: &Principal,
        day: DayOfWeek,
        category: MenuCategory,
    ) -> Result<Vec<MenuItem>, VotingError> {
        if !principal.is_management() {
            return Err(VotingError::PermissionDenied);
        }
        let mut items = self.repository.items_for_slot(day, category).await?;
        items.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
        Ok(items)
    }
}

fn remap_vote_error(err: MenuRepositoryError) -> VotingError {
    match err {
        MenuRepositoryError::ItemNotFound(id) => VotingError::ItemNotFound(id),
        MenuRepositoryError::TransactionAborted(reason) => VotingError::TransactionAborted(reason),
        other => VotingError::Repository(other),
    }
}
