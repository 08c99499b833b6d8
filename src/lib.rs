//! crymp-bot - chat bot reporting who is playing on the game-server directory

pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;
