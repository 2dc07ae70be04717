//! Recipe Discovery & Ranking Module
//!
//! Decides which recipes a viewer sees and in what order, given filters and a
//! sort mode.
//!
//! ## Overview
//! A request is validated and turned into a storage predicate, then either
//! ordered by storage (attribute sorts) or scored and paged in memory
//! (`sortBy=popular`). Every returned recipe is decorated with its rating
//! summary and the viewer's favorite flag. No state survives a request: rating
//! summaries and popularity scores are computed fresh each time.
//!
//! ## Submodules
//! - **`ratings`**: Rating Aggregator, `(average, count)` per recipe.
//! - **`favorites`**: Favorite Resolver, anonymous viewers never see favorites.
//! - **`filter`**: Filter Predicate Builder, `cheap`/`quick` tiers and enum parsing.
//! - **`scorer`**: Popularity Scorer, weighted rating/views/freshness.
//! - **`ranker`**: Ranker/Paginator, the request orchestrator.
//! - **`views`**: View Counter, atomic per-recipe view increments.
//! - **`service`**: Facade used by the HTTP layer, including the single-recipe and write paths.
//! - **`handlers`**: Axum endpoints.
//! - **`config`**, **`error`**, **`types`**: Tunables, error taxonomy, request/response shapes.

pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod handlers;
pub mod ranker;
pub mod ratings;
pub mod scorer;
pub mod service;
pub mod types;
pub mod views;
