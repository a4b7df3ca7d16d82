pub mod authorization;
mod direct;
pub mod ban;
pub(crate) mod embeds;
pub mod gateway;
pub mod kick;
pub mod mute;
pub(crate) mod target;
pub mod unmute;
pub mod warn;
pub mod warnings;

pub use gateway::SerenityGateway;
