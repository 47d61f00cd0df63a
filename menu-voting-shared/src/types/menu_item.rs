use crate::types::MenuItemId;
use serde::{Deserialize, Serialize};

/// Meal slot a menu item competes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MenuCategory {
    /// Every meal slot, in serving order.
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Day of the week a menu item is proposed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Every day of the week, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

/// Dietary classification of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryInfo {
    Veg,
    NonVeg,
}

impl DietaryInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "veg" => Some(Self::Veg),
            "non-veg" => Some(Self::NonVeg),
            _ => None,
        }
    }
}

/// A proposed dish occupying a (day, category) slot.
///
/// The vote counter is non-negative and is only ever adjusted through the
/// voting protocol; management edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    pub category: MenuCategory,
    pub day: DayOfWeek,
    pub dietary_info: DietaryInfo,
    pub ingredients: Vec<String>,
    pub image_url: Option<String>,
    pub votes: i64,
}

/// Fields supplied by management when proposing a new dish.
///
/// The id is assigned by the repository and the vote counter starts at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMenuItem {
    pub title: String,
    pub category: MenuCategory,
    pub day: DayOfWeek,
    pub dietary_info: DietaryInfo,
    pub ingredients: Vec<String>,
    pub image_url: Option<String>,
}

/// Partial update applied to an existing dish by management.
///
/// `None` leaves the corresponding field untouched. The vote counter is not
/// editable through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub title: Option<String>,
    pub category: Option<MenuCategory>,
    pub day: Option<DayOfWeek>,
    pub dietary_info: Option<DietaryInfo>,
    pub ingredients: Option<Vec<String>>,
    pub image_url: Option<String>,
}
