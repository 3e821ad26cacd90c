//! Mini-game catalog: definitions and registry.
//!
//! ## Key Types
//!
//! - `MiniGameId`: closed set of game keys
//! - `Difficulty`: tier 1–3
//! - `MiniGameDefinition`: static game data
//! - `MiniGameRegistry`: definition lookup plus widget factories
//! - `ConsentArticle`: terms text shown with the opening games

pub mod definition;
pub mod registry;
pub mod terms;

pub use definition::{Difficulty, MiniGameDefinition, MiniGameId};
pub use crate::error::UnknownGameId;
pub use registry::{MiniGameRegistry, WidgetFactory};
pub use terms::{article_for, ConsentArticle, TERMS};
