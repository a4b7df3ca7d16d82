use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::direct::{DirectAction, run_direct_action};
use warden_core::{Context, Error};
use warden_engine::ModerationAction;

pub const META: CommandMeta = CommandMeta {
    name: "unmute",
    desc: "Lift a user's mute.",
    category: "moderation",
    usage: "!unmute <user>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "The user to unmute"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::MODERATE_MEMBERS).await?
    else {
        return Ok(());
    };

    run_direct_action(
        ctx,
        guild_id,
        user,
        ModerationAction::Unmute,
        DirectAction {
            verb: "unmute",
            past_tense: "unmuted",
            usage: META.usage,
            reason: None,
            duration_label: None,
        },
    )
    .await
}
