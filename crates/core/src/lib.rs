//! Deck engine: card resolution, Faint Memory scoring and deck editing.
//! Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod edit;
pub mod ledger;
pub mod resolve;
pub mod scoring;

pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use edit::*;
pub use ledger::*;
pub use resolve::*;
pub use scoring::*;
