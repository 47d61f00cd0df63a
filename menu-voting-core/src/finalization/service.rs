//! This module defines the `FinalizationService`, the state machine over the
//! weekly menu singleton. Finalize and reset are conditional single-field
//! writes at the repository, which makes both idempotent under concurrent
//! management sessions; winners are always computed on read from live vote
//! counts, never stored.
use crate::errors::FinalizationError;
use menu_voting_repository::{MenuRepository, StateTransition};
use menu_voting_shared::types::{
    DayOfWeek, MenuCategory, MenuItem, MenuSlotWinner, Principal, WeeklyMenu,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a finalize call.
///
/// Finalizing an already-finalized menu is a no-op returning the current
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Finalized(WeeklyMenu),
    AlreadyFinalized,
}

/// Outcome of a reset call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Open,
    AlreadyOpen,
}

/// What a student sees: the full voting view while open, only the frozen
/// winners once finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentMenu {
    Voting(Vec<MenuItem>),
    Finalized(WeeklyMenu),
}

/// A menu item with its rank in the management view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItem {
    pub rank: usize,
    pub item: MenuItem,
}

/// `FinalizationService` drives the Open/Finalized state machine and serves
/// the state-dependent menu read paths.
pub struct FinalizationService {
    repository: Arc<dyn MenuRepository>,
}

impl FinalizationService {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self { repository }
    }

    /// Finalizes the weekly menu (management only).
    ///
    /// Transitions Open to Finalized through a conditional write; only the
    /// winning writer computes and returns the frozen menu, every other
    /// caller observes `AlreadyFinalized`. Vote counts are untouched.
    pub async fn finalize(
        &self,
        principal: &Principal,
    ) -> Result<FinalizeOutcome, FinalizationError> {
        if !principal.is_management() {
            return Err(FinalizationError::PermissionDenied);
        }
        self.finalize_inner().await
    }

    /// Finalizes without a principal, for the scheduled trigger.
    ///
    /// Returns `true` when this call performed the transition.
    pub async fn finalize_if_open(&self) -> Result<bool, FinalizationError> {
        match self.finalize_inner().await? {
            FinalizeOutcome::Finalized(_) => Ok(true),
            FinalizeOutcome::AlreadyFinalized => Ok(false),
        }
    }

    async fn finalize_inner(&self) -> Result<FinalizeOutcome, FinalizationError> {
        match self.repository.transition_state(false, true).await? {
            StateTransition::Applied => {
                let menu = self.weekly_menu().await?;
                info!(winners = menu.winners.len(), "weekly menu finalized");
                Ok(FinalizeOutcome::Finalized(menu))
            }
            StateTransition::Unchanged => {
                debug!("finalize skipped, menu already finalized");
                Ok(FinalizeOutcome::AlreadyFinalized)
            }
        }
    }

    /// Reopens voting (management only).
    ///
    /// Clears the finalized flag and nothing else; items and vote counts are
    /// left exactly as they were.
    pub async fn reset(&self, principal: &Principal) -> Result<ResetOutcome, FinalizationError> {
        if !principal.is_management() {
            return Err(FinalizationError::PermissionDenied);
        }
        match self.repository.transition_state(true, false).await? {
            StateTransition::Applied => {
                info!("weekly menu reset, voting reopened");
                Ok(ResetOutcome::Open)
            }
            StateTransition::Unchanged => Ok(ResetOutcome::AlreadyOpen),
        }
    }

    /// Computes the weekly menu winners from the current vote counts.
    ///
    /// One item per (day, category) slot that has any items: the highest
    /// vote count, ties broken by lowest item id. The computation reads the
    /// item list once, so a concurrent cast is either fully counted or not
    /// counted at all.
    pub async fn weekly_menu(&self) -> Result<WeeklyMenu, FinalizationError> {
        let items = self.repository.list_items().await?;
        let mut winners = Vec::new();
        for day in DayOfWeek::ALL {
            for category in MenuCategory::ALL {
                let winner = items
                    .iter()
                    .filter(|item| item.day == day && item.category == category)
                    .min_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
                if let Some(item) = winner {
                    winners.push(MenuSlotWinner {
                        day,
                        category,
                        item: item.clone(),
                    });
                }
            }
        }
        Ok(WeeklyMenu { winners })
    }

    /// The student read path: winners only once finalized, the full voting
    /// view otherwise.
    pub async fn student_menu(&self, principal: &Principal) -> Result<StudentMenu, FinalizationError> {
        if !principal.is_student() {
            return Err(FinalizationError::PermissionDenied);
        }
        if self.repository.menu_state().await?.is_finalized {
            Ok(StudentMenu::Finalized(self.weekly_menu().await?))
        } else {
            Ok(StudentMenu::Voting(self.repository.list_items().await?))
        }
    }

    /// The management read path: every item ranked by vote count descending
    /// (ties by ascending id), in any state.
    pub async fn management_menu(
        &self,
        principal: &Principal,
    ) -> Result<Vec<RankedItem>, FinalizationError> {
        if !principal.is_management() {
            return Err(FinalizationError::PermissionDenied);
        }
        let mut items = self.repository.list_items().await?;
        items.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
        Ok(items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| RankedItem { rank: idx + 1, item })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_voting_repository::MemoryMenuRepository;
    use menu_voting_shared::types::{
        DayOfWeek, DietaryInfo, MenuCategory, NewMenuItem, Role,
    };
    use time::OffsetDateTime;

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

    fn new_item(title: &str, day: DayOfWeek, category: MenuCategory) -> NewMenuItem {
        NewMenuItem {
            title: title.to_string(),
            category,
            day,
            dietary_info: DietaryInfo::Veg,
            ingredients: vec![],
            image_url: None,
        }
    }

    async fn seed_votes(repo: &MemoryMenuRepository, item: &MenuItem, count: usize) {
        for n in 0..count {
            repo.cast_vote(&format!("voter-{}-{n}", item.title), item.id, OffsetDateTime::now_utc())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_finalize_picks_highest_voted_item() {
        // Scenario B: I1 with 3 votes, I2 with 5 votes, same slot.
        let repo = Arc::new(MemoryMenuRepository::new());
        let i1 = repo
            .insert_item(new_item("Chapati", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        let i2 = repo
            .insert_item(new_item("Veg Biryani", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        seed_votes(&repo, &i1, 3).await;
        seed_votes(&repo, &i2, 5).await;

        let service = FinalizationService::new(repo);
        let outcome = service.finalize(&management()).await.unwrap();
        let FinalizeOutcome::Finalized(menu) = outcome else {
            panic!("expected a fresh finalize");
        };
        assert_eq!(
            menu.winner_for(DayOfWeek::Monday, MenuCategory::Lunch).unwrap().id,
            i2.id
        );
    }

    #[tokio::test]
    async fn test_tie_breaks_by_lowest_id() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let a = repo
            .insert_item(new_item("Chapati", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        let b = repo
            .insert_item(new_item("Veg Biryani", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        seed_votes(&repo, &a, 2).await;
        seed_votes(&repo, &b, 2).await;
        let expected = a.id.min(b.id);

        let service = FinalizationService::new(repo);
        for _ in 0..3 {
            let menu = service.weekly_menu().await.unwrap();
            assert_eq!(
                menu.winner_for(DayOfWeek::Monday, MenuCategory::Lunch).unwrap().id,
                expected
            );
        }
    }

    #[tokio::test]
    async fn test_finalize_reset_round_trip() {
        // Scenario C: Open -> Finalized -> Open -> Finalized.
        let repo = Arc::new(MemoryMenuRepository::new());
        let item = repo
            .insert_item(new_item("Idli Sambar", DayOfWeek::Monday, MenuCategory::Breakfast))
            .await
            .unwrap();
        seed_votes(&repo, &item, 2).await;
        let service = FinalizationService::new(repo.clone());
        let mgmt = management();

        assert!(matches!(
            service.finalize(&mgmt).await.unwrap(),
            FinalizeOutcome::Finalized(_)
        ));
        assert!(repo.menu_state().await.unwrap().is_finalized);
        assert_eq!(
            service.finalize(&mgmt).await.unwrap(),
            FinalizeOutcome::AlreadyFinalized
        );

        assert_eq!(service.reset(&mgmt).await.unwrap(), ResetOutcome::Open);
        assert!(!repo.menu_state().await.unwrap().is_finalized);
        assert_eq!(service.reset(&mgmt).await.unwrap(), ResetOutcome::AlreadyOpen);

        // Votes survive the round trip untouched.
        assert_eq!(repo.get_item(item.id).await.unwrap().unwrap().votes, 2);

        assert!(matches!(
            service.finalize(&mgmt).await.unwrap(),
            FinalizeOutcome::Finalized(_)
        ));
    }

    #[tokio::test]
    async fn test_students_cannot_finalize_or_reset() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let service = FinalizationService::new(repo);

        assert!(matches!(
            service.finalize(&student()).await.unwrap_err(),
            FinalizationError::PermissionDenied
        ));
        assert!(matches!(
            service.reset(&student()).await.unwrap_err(),
            FinalizationError::PermissionDenied
        ));
    }

    #[tokio::test]
    async fn test_student_menu_follows_state() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let i1 = repo
            .insert_item(new_item("Chapati", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        let i2 = repo
            .insert_item(new_item("Veg Biryani", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        seed_votes(&repo, &i2, 1).await;
        let service = FinalizationService::new(repo);

        match service.student_menu(&student()).await.unwrap() {
            StudentMenu::Voting(items) => assert_eq!(items.len(), 2),
            StudentMenu::Finalized(_) => panic!("menu should still be open"),
        }

        service.finalize(&management()).await.unwrap();
        match service.student_menu(&student()).await.unwrap() {
            StudentMenu::Finalized(menu) => {
                assert_eq!(menu.winners.len(), 1);
                assert_eq!(
                    menu.winner_for(DayOfWeek::Monday, MenuCategory::Lunch).unwrap().id,
                    i2.id
                );
                assert!(menu.winner_for(DayOfWeek::Monday, MenuCategory::Lunch).unwrap().id != i1.id);
            }
            StudentMenu::Voting(_) => panic!("menu should be finalized"),
        }
    }

    #[tokio::test]
    async fn test_management_menu_ranks_in_any_state() {
        let repo = Arc::new(MemoryMenuRepository::new());
        let i1 = repo
            .insert_item(new_item("Chapati", DayOfWeek::Monday, MenuCategory::Lunch))
            .await
            .unwrap();
        let i2 = repo
            .insert_item(new_item("Veg Biryani", DayOfWeek::Tuesday, MenuCategory::Dinner))
            .await
            .unwrap();
        seed_votes(&repo, &i2, 4).await;
        seed_votes(&repo, &i1, 1).await;
        let service = FinalizationService::new(repo);

        service.finalize(&management()).await.unwrap();
        let ranked = service.management_menu(&management()).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].item.id, i2.id);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].item.id, i1.id);

        assert!(matches!(
            service.management_menu(&student()).await.unwrap_err(),
            FinalizationError::PermissionDenied
        ));
    }
}
