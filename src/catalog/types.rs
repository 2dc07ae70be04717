//! Catalog Domain Types
//!
//! The read model the discovery core works on: identifiers, the closed
//! enumerations, and the `Recipe` projection itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Numeric recipe identifier, assigned by the store in insertion order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an authenticated user, as resolved by the upstream auth layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned when a string does not name a member of a closed enumeration.
#[derive(Debug, Error, PartialEq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Cake,
    Pasta,
    Rice,
    Meat,
    Vegetarian,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cake,
        Category::Pasta,
        Category::Rice,
        Category::Meat,
        Category::Vegetarian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cake => "CAKE",
            Category::Pasta => "PASTA",
            Category::Rice => "RICE",
            Category::Meat => "MEAT",
            Category::Vegetarian => "VEGETARIAN",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DifficultyLevel::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "difficulty level",
                value: s.to_string(),
            })
    }
}

/// A persisted recipe as seen by the discovery core.
///
/// `view_count` only ever grows and `created_at` is fixed at insertion;
/// the store is the only writer of either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub price: f64,
    /// Preparation time in minutes.
    pub duration: u32,
    pub difficulty_level: DifficultyLevel,
    pub category: Category,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub owner_id: UserId,
}

/// The owner-editable attributes of a recipe. Applying one never touches the
/// id, owner, creation time or view count.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeUpdate {
    pub name: String,
    pub price: f64,
    pub duration: u32,
    pub difficulty_level: DifficultyLevel,
    pub category: Category,
}

impl RecipeUpdate {
    pub fn apply_to(self, recipe: &mut Recipe) {
        recipe.name = self.name;
        recipe.price = self.price;
        recipe.duration = self.duration;
        recipe.difficulty_level = self.difficulty_level;
        recipe.category = self.category;
    }

    pub fn with_owner(self, owner_id: UserId) -> NewRecipe {
        NewRecipe {
            name: self.name,
            price: self.price,
            duration: self.duration,
            difficulty_level: self.difficulty_level,
            category: self.category,
            owner_id,
        }
    }
}

/// A recipe that has not been stored yet; the store assigns id, timestamp
/// and the initial view count.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub price: f64,
    pub duration: u32,
    pub difficulty_level: DifficultyLevel,
    pub category: Category,
    pub owner_id: UserId,
}
