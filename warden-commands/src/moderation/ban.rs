use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::direct::{DirectAction, run_direct_action};
use warden_core::{Context, Error};
use warden_engine::{DEFAULT_WARNING_REASON, ModerationAction};

pub const META: CommandMeta = CommandMeta {
    name: "ban",
    desc: "Ban a user from the server.",
    category: "moderation",
    usage: "!ban <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The user to ban"] user: Option<serenity::User>,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::BAN_MEMBERS).await? else {
        return Ok(());
    };

    let reason = reason.unwrap_or_else(|| DEFAULT_WARNING_REASON.to_owned());
    run_direct_action(
        ctx,
        guild_id,
        user,
        ModerationAction::Ban {
            reason: reason.clone(),
        },
        DirectAction {
            verb: "ban",
            past_tense: "banned",
            usage: META.usage,
            reason: Some(&reason),
            duration_label: None,
        },
    )
    .await
}
