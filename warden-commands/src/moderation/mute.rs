use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::authorization::require_permission;
use crate::moderation::direct::{DirectAction, run_direct_action};
use warden_core::{Context, Error};
use warden_engine::ModerationAction;
use warden_utils::formatting::format_compact_duration;
use warden_utils::parse::parse_duration_seconds;

pub const META: CommandMeta = CommandMeta {
    name: "mute",
    desc: "Mute a user for a duration (default: 10m).",
    category: "moderation",
    usage: "!mute <user> [duration] [reason]",
};

const DEFAULT_MUTE_SECS: u64 = 10 * 60;
/// Discord rejects communication timeouts longer than 28 days.
const MAX_MUTE_SECS: u64 = 28 * 86_400;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "The user to mute"] user: Option<serenity::User>,
    #[description = "Duration (e.g. 10m, 2h)"] duration: Option<String>,
    #[description = "Reason for the mute"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = require_permission(ctx, serenity::Permissions::MODERATE_MEMBERS).await?
    else {
        return Ok(());
    };

    let Some(seconds) = mute_seconds(duration.as_deref()) else {
        ctx.say(format!(
            "Invalid duration. Usage: `{}` (examples: 30s, 10m, 2h, 1d; max 28d)",
            META.usage
        ))
        .await?;
        return Ok(());
    };
    let duration_label = format_compact_duration(seconds);

    run_direct_action(
        ctx,
        guild_id,
        user,
        ModerationAction::Mute {
            duration: Duration::from_secs(seconds),
        },
        DirectAction {
            verb: "mute",
            past_tense: "muted",
            usage: META.usage,
            reason: reason.as_deref(),
            duration_label: Some(&duration_label),
        },
    )
    .await
}

fn mute_seconds(raw: Option<&str>) -> Option<u64> {
    match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            parse_duration_seconds(raw).filter(|seconds| *seconds <= MAX_MUTE_SECS)
        }
        _ => Some(DEFAULT_MUTE_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MUTE_SECS, mute_seconds};

    #[test]
    fn missing_duration_uses_default() {
        assert_eq!(mute_seconds(None), Some(DEFAULT_MUTE_SECS));
        assert_eq!(mute_seconds(Some("  ")), Some(DEFAULT_MUTE_SECS));
    }

    #[test]
    fn duration_is_bounded() {
        assert_eq!(mute_seconds(Some("2h")), Some(7_200));
        assert_eq!(mute_seconds(Some("28d")), Some(28 * 86_400));
        assert_eq!(mute_seconds(Some("29d")), None);
        assert_eq!(mute_seconds(Some("soon")), None);
    }
}
