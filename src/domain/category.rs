//! Record categories and date window names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record category fetched from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Reservation records
    Reservations,
    /// Sales records
    Sales,
    /// Room records
    Rooms,
}

impl Category {
    /// All categories in export order
    pub const ALL: [Category; 3] = [Category::Reservations, Category::Sales, Category::Rooms];

    /// Returns the lowercase name used in paths and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reservations => "reservations",
            Category::Sales => "sales",
            Category::Rooms => "rooms",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reservations" => Ok(Category::Reservations),
            "sales" => Ok(Category::Sales),
            "rooms" => Ok(Category::Rooms),
            other => Err(format!(
                "Unknown category '{other}'. Must be one of: reservations, sales, rooms"
            )),
        }
    }
}

/// Named date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowName {
    /// Past, already-finalized records
    History,
    /// Current and future bookable records
    Onhand,
}

impl WindowName {
    /// All windows in export order
    pub const ALL: [WindowName; 2] = [WindowName::History, WindowName::Onhand];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowName::History => "history",
            WindowName::Onhand => "onhand",
        }
    }
}

impl fmt::Display for WindowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic artifact name for a category/window pair, e.g. `rooms_onhand`
pub fn artifact_name(category: Category, window: WindowName) -> String {
    format!("{}_{}", category.as_str(), window.as_str())
}
