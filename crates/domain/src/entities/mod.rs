//! Domain entities

mod favorite;

pub use favorite::{FavoriteDraft, FavoriteEvent, ADDED_AT_FIELD, ID_FIELD};
