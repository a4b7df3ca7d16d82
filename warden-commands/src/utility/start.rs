use warden_core::{Context, Error};
use warden_utils::COMMAND_PREFIX;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "start",
    desc: "Introduce the bot.",
    category: "utility",
    usage: "!start",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn start(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(format!(
        "👋 Welcome to Warden!\nUse `{COMMAND_PREFIX}help` for available commands."
    ))
    .await?;
    Ok(())
}
