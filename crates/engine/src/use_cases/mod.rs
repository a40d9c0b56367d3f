//! Use cases - orchestration over ports.

pub mod favorites;

pub use favorites::{FavoritesError, FavoritesOps};
