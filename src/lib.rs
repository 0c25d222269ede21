//! Eternal deck tooling
//!
//! Parses free-form deck lists (hand-written, client exports, AI-generated
//! pipe dumps), validates them against construction rules and converts them
//! to the game client's import format.

pub mod batch;
pub mod core;
pub mod decklist;
pub mod error;
pub mod loader;
pub mod logger;

pub use error::{DeckError, Result};
