use poise::serenity_prelude as serenity;
use tracing::warn;

use warden_core::Data;
use warden_utils::COMMAND_PREFIX;

/// Greet a member who just joined, in the group's system channel.
pub async fn handle_member_join_welcome(data: &Data, member: &serenity::Member) {
    if !data.welcome_enabled || member.user.bot {
        return;
    }

    let text = welcome_message(member.user.id.get());
    if let Err(source) = data
        .gateway
        .send_message(member.guild_id.get(), &text)
        .await
    {
        warn!(?source, guild_id = %member.guild_id, user_id = %member.user.id, "failed to send welcome message");
    }
}

fn welcome_message(user_id: u64) -> String {
    format!("👋 Welcome <@{user_id}>! Please read the rules with `{COMMAND_PREFIX}rules`.")
}
