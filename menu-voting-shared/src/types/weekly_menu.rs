use crate::types::{DayOfWeek, MenuCategory, MenuItem};
use serde::{Deserialize, Serialize};

/// The winning item for one (day, category) slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuSlotWinner {
    pub day: DayOfWeek,
    pub category: MenuCategory,
    pub item: MenuItem,
}

/// The computed weekly menu: one winner per slot that has at least one item.
///
/// This is a read-time view over live vote counts, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyMenu {
    pub winners: Vec<MenuSlotWinner>,
}

impl WeeklyMenu {
    pub fn winner_for(&self, day: DayOfWeek, category: MenuCategory) -> Option<&MenuItem> {
        self.winners
            .iter()
            .find(|w| w.day == day && w.category == category)
            .map(|w| &w.item)
    }
}
