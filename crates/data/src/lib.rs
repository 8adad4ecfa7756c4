//! Catalog loading and deck files.

pub mod decks;
pub mod load;
pub mod schema;

pub use decks::*;
pub use load::*;
pub use schema::*;
