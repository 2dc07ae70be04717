//! Recipe Catalog Library
//!
//! This library crate holds the recipe discovery and ranking subsystem. It
//! serves as the foundation for the binary executable (`main.rs`), which wires
//! it to an HTTP router.
//!
//! ## Architecture Modules
//! The system is split into two layers:
//!
//! - **`catalog`**: The storage layer. Domain types (`Recipe`, `Category`,
//!   `DifficultyLevel`), the storage traits the core reads through, and a
//!   concurrent in-memory implementation (`MemoryCatalog`).
//! - **`discovery`**: The read path. Filter validation, rating aggregation,
//!   favorite resolution, popularity scoring, ranking and pagination, view
//!   counting, plus the HTTP handlers that expose them.

pub mod catalog;
pub mod discovery;
