//! Catalog Module
//!
//! The persistence side of the service, seen through the narrow read model the
//! discovery core needs.
//!
//! ## Submodules
//! - **`types`**: Identifiers, the closed `Category` / `DifficultyLevel` sets, the `Recipe`
//!   projection and the owner-editable `RecipeUpdate`.
//! - **`store`**: Storage collaborator traits (`RecipeStore`, `RatingStore`, `FavoriteStore`),
//!   the filter predicate and pagination types they accept, and `StoreError`.
//! - **`memory`**: `MemoryCatalog`, a concurrent `DashMap` implementation of all three traits.

pub mod memory;
pub mod store;
pub mod types;
