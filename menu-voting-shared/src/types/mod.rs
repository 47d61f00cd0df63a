mod menu_item;
mod menu_state;
mod principal;
mod vote_record;
mod weekly_menu;

pub use menu_item::{DayOfWeek, DietaryInfo, MenuCategory, MenuItem, MenuItemPatch, NewMenuItem};
pub use menu_state::MenuState;
pub use principal::{Principal, Role};
pub use vote_record::VoteRecord;
pub use weekly_menu::{MenuSlotWinner, WeeklyMenu};

use uuid::Uuid;

/// Unique identifier of a menu item.
pub type MenuItemId = Uuid;

/// Stable identifier issued by the identity provider for an account.
pub type UserId = String;
