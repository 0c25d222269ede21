//! Core card model

pub mod card;
pub mod influence;
pub mod types;

pub use card::{CardRecord, CardType};
pub use influence::{Faction, Influence};
pub use types::{lookup_key, CardName};
