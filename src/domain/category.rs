//! The closed set of labels classifying an expense's purpose.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classifies expenses for summaries and reporting.
///
/// The set is closed: consumers treat it as exhaustive, and labels outside it
/// are bucketed into [`Category::Other`] by [`Category::parse_lossy`] rather
/// than crashing anything.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Travel,
    Education,
    Personal,
    Gifts,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Travel,
        Category::Education,
        Category::Personal,
        Category::Gifts,
        Category::Other,
    ];

    /// Fixed presentation color for charts and badges.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#FF6B6B",
            Category::Transportation => "#4CAF50",
            Category::Housing => "#2196F3",
            Category::Utilities => "#9C27B0",
            Category::Entertainment => "#FF9800",
            Category::Shopping => "#FFC107",
            Category::Healthcare => "#00BCD4",
            Category::Travel => "#3F51B5",
            Category::Education => "#8BC34A",
            Category::Personal => "#E91E63",
            Category::Gifts => "#CDDC39",
            Category::Other => "#607D8B",
        }
    }

    /// Parses a label, mapping anything unrecognized to [`Category::Other`].
    pub fn parse_lossy(label: &str) -> Category {
        label.parse().unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::Personal => "Personal",
            Category::Gifts => "Gifts",
            Category::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Returned by the strict parser when a label is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);
