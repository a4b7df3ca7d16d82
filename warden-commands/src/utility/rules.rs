use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::embeds::{guild_only_message, usage_message};
use warden_core::{Context, Error};
use warden_database::impls::rules::{get_rules, set_rules};
use warden_utils::COMMAND_PREFIX;
use warden_utils::embed::titled_embed;
use warden_utils::formatting::sanitize_mentions;
use warden_utils::time::now_unix_secs;

pub const RULES_META: CommandMeta = CommandMeta {
    name: "rules",
    desc: "Show the server rules.",
    category: "utility",
    usage: "!rules",
};

pub const SETRULES_META: CommandMeta = CommandMeta {
    name: "setrules",
    desc: "Replace the server rules.",
    category: "moderation",
    usage: "!setrules <text>",
};

/// Embed descriptions are capped at 4096 characters.
const MAX_RULES_CHARS: usize = 4_000;

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn rules(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    match get_rules(&ctx.data().db, guild_id.get()).await? {
        Some(rules) => {
            let embed = titled_embed("📜 Server Rules", sanitize_mentions(&rules.rules))
                .footer(serenity::CreateEmbedFooter::new("Last updated"))
                .timestamp(serenity::Timestamp::from_unix_timestamp(
                    i64::try_from(rules.updated_at).unwrap_or_default(),
                )?);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        None => {
            ctx.say(format!(
                "No rules have been set yet. Admins can use `{COMMAND_PREFIX}setrules <text>`."
            ))
            .await?;
        }
    }

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn setrules(
    ctx: Context<'_>,
    #[description = "The new rules"]
    #[rest]
    text: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::MANAGE_GUILD).await? else {
        return Ok(());
    };

    let Some(text) = text.map(|text| text.trim().to_owned()).filter(|text| !text.is_empty()) else {
        ctx.say(usage_message(SETRULES_META.usage)).await?;
        return Ok(());
    };

    if text.chars().count() > MAX_RULES_CHARS {
        ctx.say(format!("Rules must be at most {MAX_RULES_CHARS} characters."))
            .await?;
        return Ok(());
    }

    set_rules(
        &ctx.data().db,
        guild_id.get(),
        &text,
        ctx.author().id.get(),
        now_unix_secs(),
    )
    .await?;

    ctx.say("✅ Rules updated.").await?;
    Ok(())
}
