//! Favorites use cases.

mod favorites_ops;

pub use favorites_ops::{FavoritesError, FavoritesOps};
