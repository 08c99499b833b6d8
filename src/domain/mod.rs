//! Domain layer - Core bot objects and the seams to the outside world
//! 
//! This layer contains:
//! - Entities: Messages, commands, directory entries
//! - Traits: Abstractions for infrastructure (Bot, Directory)

pub mod entities;
pub mod traits;
