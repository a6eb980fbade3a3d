// Pocket Rogue Schema - Shared type definitions
// This crate contains the immutable data records and static enums that are
// shared between the battle core and the tooling that authors its data files.

// Re-export the main types
pub use battle_types::*;
pub use skill::*;
pub use species::*;

pub mod battle_types;
pub mod skill;
pub mod species;
