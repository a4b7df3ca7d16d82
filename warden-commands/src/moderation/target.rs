use poise::serenity_prelude as serenity;

use warden_core::Context;

/// Author of the message the command replied to (prefix commands only).
pub fn replied_user(ctx: Context<'_>) -> Option<serenity::User> {
    match ctx {
        poise::Context::Prefix(prefix) => prefix
            .msg
            .referenced_message
            .as_deref()
            .map(|message| message.author.clone()),
        poise::Context::Application(_) => None,
    }
}

/// The replied-to author wins over an explicit user argument.
pub fn pick_target<T>(replied: Option<T>, explicit: Option<T>) -> Option<T> {
    replied.or(explicit)
}

pub fn resolve_target(ctx: Context<'_>, explicit: Option<serenity::User>) -> Option<serenity::User> {
    pick_target(replied_user(ctx), explicit)
}

#[cfg(test)]
mod tests {
    use super::pick_target;

    #[test]
    fn reply_takes_precedence() {
        assert_eq!(pick_target(Some(1), Some(2)), Some(1));
        assert_eq!(pick_target(None, Some(2)), Some(2));
        assert_eq!(pick_target::<u64>(None, None), None);
    }
}
