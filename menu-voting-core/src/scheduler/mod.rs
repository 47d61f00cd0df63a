//! The automatic finalization trigger.
//!
//! A periodic task that finalizes the weekly menu on Mondays. Idempotence is
//! guaranteed server-side: the trigger goes through the same conditional
//! state transition as a management finalize, so re-firing within the day,
//! across restarts, or from concurrent sessions transitions at most once
//! until the next reset.
use crate::finalization::FinalizationService;
use chrono::{DateTime, Datelike, Utc, Weekday};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Periodically finalizes the weekly menu on the scheduled day.
pub struct FinalizeScheduler {
    finalization: Arc<FinalizationService>,
    interval: Duration,
}

impl FinalizeScheduler {
    pub fn new(finalization: Arc<FinalizationService>, interval: Duration) -> Self {
        Self {
            finalization,
            interval,
        }
    }

    /// Runs the scheduler loop.
    ///
    /// Tick failures are logged and the loop keeps going; a missed tick is
    /// retried on the next interval.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            if let Err(error) = self.tick_at(Utc::now()).await {
                warn!(%error, "scheduled finalize tick failed");
            }
        }
    }

    /// Executes one tick against the given wall-clock instant.
    ///
    /// Returns `true` when this tick performed the finalize transition.
    pub async fn tick_at(&self, now: DateTime<Utc>) -> Result<bool, crate::FinalizationError> {
        if now.weekday() != Weekday::Mon {
            return Ok(false);
        }
        let fired = self.finalization.finalize_if_open().await?;
        if fired {
            info!("scheduled weekly finalize fired");
        } else {
            debug!("scheduled finalize skipped, menu already finalized");
        }
        Ok(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use menu_voting_repository::{MemoryMenuRepository, MenuRepository};

    fn scheduler() -> (FinalizeScheduler, Arc<MemoryMenuRepository>) {
        let repo = Arc::new(MemoryMenuRepository::new());
        let finalization = Arc::new(FinalizationService::new(
            repo.clone() as Arc<dyn MenuRepository>
        ));
        (
            FinalizeScheduler::new(finalization, Duration::from_secs(3600)),
            repo,
        )
    }

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 9, 0, 0).unwrap()
    }

    fn tuesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_fires_once_on_monday() {
        let (scheduler, repo) = scheduler();

        assert!(scheduler.tick_at(monday()).await.unwrap());
        assert!(repo.menu_state().await.unwrap().is_finalized);

        // A second tick within the same window is a guarded no-op.
        assert!(!scheduler.tick_at(monday()).await.unwrap());
    }

    #[tokio::test]
    async fn test_skips_other_days() {
        let (scheduler, repo) = scheduler();

        assert!(!scheduler.tick_at(tuesday()).await.unwrap());
        assert!(!repo.menu_state().await.unwrap().is_finalized);
    }

    #[tokio::test]
    async fn test_fires_again_after_reset() {
        let (scheduler, repo) = scheduler();

        assert!(scheduler.tick_at(monday()).await.unwrap());
        repo.transition_state(true, false).await.unwrap();
        assert!(scheduler.tick_at(monday()).await.unwrap());
    }
}
