pub mod moderation;
pub mod utility;

use warden_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::start::META,
    utility::help::META,
    utility::ping::META,
    utility::roll::META,
    utility::rules::RULES_META,
    utility::rules::SETRULES_META,
    moderation::warn::META,
    moderation::warnings::META,
    moderation::ban::META,
    moderation::kick::META,
    moderation::mute::META,
    moderation::unmute::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::start::start(),
        utility::help::help(),
        utility::ping::ping(),
        utility::roll::roll(),
        utility::rules::rules(),
        utility::rules::setrules(),
        moderation::warn::warn(),
        moderation::warnings::warnings(),
        moderation::ban::ban(),
        moderation::kick::kick(),
        moderation::mute::mute(),
        moderation::unmute::unmute(),
    ]
}
