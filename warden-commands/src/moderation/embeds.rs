use poise::serenity_prelude as serenity;

use warden_engine::{ModerationAction, WarningOutcome, WarningRecord};
use warden_utils::embed::DEFAULT_EMBED_COLOR;
use warden_utils::formatting::{sanitize_mentions, warning_progress};

pub fn display_name(user: &serenity::User) -> String {
    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}

pub fn moderation_action_embed(
    target: &serenity::User,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> serenity::CreateEmbed {
    let mut lines = vec![format!("**Target :** <@{}>", target.id.get())];
    if let Some(reason) = reason {
        lines.push(format!("**Reason :** {}", sanitize_mentions(reason)));
    }
    if let Some(duration) = duration {
        lines.push(format!("**Duration :** {duration}"));
    }

    serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .author(
            serenity::CreateEmbedAuthor::new(format!(
                "{} has been {}",
                display_name(target),
                action_past_tense
            ))
            .icon_url(target.face()),
        )
        .description(lines.join("\n"))
}

/// Reply text for the admin who issued a warning.
pub fn warning_outcome_message(target_user_id: u64, outcome: &WarningOutcome) -> String {
    match outcome {
        WarningOutcome::Warned { count, threshold } => format!(
            "⚠️ Warning issued to <@{target_user_id}> ({})",
            warning_progress(*count, *threshold)
        ),
        WarningOutcome::Escalated {
            action,
            triggering_count,
            action_failed: false,
            ..
        } => format!(
            "⛔ <@{target_user_id}> reached {triggering_count} warnings and was {}.",
            action_past_tense(action)
        ),
        WarningOutcome::Escalated {
            action,
            triggering_count,
            failure,
            ..
        } => format!(
            "⛔ <@{target_user_id}> reached {triggering_count} warnings, but the {} failed ({}). Their warnings have already been reset.",
            action.name(),
            failure.as_deref().unwrap_or("unknown error")
        ),
    }
}

pub fn warning_history_lines(records: &[WarningRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "#{} • by <@{}>\n**Reason :** {}\n**When :** <t:{}:R>",
                index + 1,
                record.issuer_id,
                sanitize_mentions(&record.reason),
                record.timestamp
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn action_past_tense(action: &ModerationAction) -> &'static str {
    match action {
        ModerationAction::Warn { .. } => "warned",
        ModerationAction::Ban { .. } => "banned",
        ModerationAction::Mute { .. } => "muted",
        ModerationAction::Unmute => "unmuted",
        ModerationAction::Kick { .. } => "kicked",
    }
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn reply_required_message() -> &'static str {
    "⚠️ Reply to a message to warn user"
}

pub fn moderation_self_action_message(action: &str) -> String {
    format!("You can't {action} yourself.")
}

pub fn moderation_bot_target_message() -> &'static str {
    "You can't use moderation actions on bots or application accounts."
}

pub fn gateway_failure_message(action: &str) -> String {
    format!("I couldn't {action} that user. Check role hierarchy and permissions.")
}

#[cfg(test)]
mod tests {
    use warden_engine::{ModerationAction, Pair, WarningOutcome, WarningRecord};

    use super::{warning_history_lines, warning_outcome_message};

    fn ban() -> ModerationAction {
        ModerationAction::Ban {
            reason: "Reached 3 warnings".to_owned(),
        }
    }

    #[test]
    fn warned_message_shows_progress() {
        let message = warning_outcome_message(
            5,
            &WarningOutcome::Warned {
                count: 1,
                threshold: 3,
            },
        );
        assert_eq!(message, "⚠️ Warning issued to <@5> (Total: 1/3)");
    }

    #[test]
    fn escalation_message_reports_ban() {
        let message = warning_outcome_message(
            5,
            &WarningOutcome::Escalated {
                action: ban(),
                triggering_count: 3,
                action_failed: false,
                failure: None,
            },
        );
        assert_eq!(message, "⛔ <@5> reached 3 warnings and was banned.");
    }

    #[test]
    fn partial_failure_is_not_hidden() {
        let message = warning_outcome_message(
            5,
            &WarningOutcome::Escalated {
                action: ban(),
                triggering_count: 3,
                action_failed: true,
                failure: Some("ban failed: Missing Permissions".to_owned()),
            },
        );
        assert!(message.contains("the ban failed (ban failed: Missing Permissions)"));
        assert!(message.contains("already been reset"));
    }

    #[test]
    fn history_is_numbered_and_sanitized() {
        let pair = Pair::new(1, 2);
        let records = vec![
            WarningRecord::new(pair, 7, Some("spam"), 100),
            WarningRecord::new(pair, 8, Some("@everyone ping"), 200),
        ];
        let lines = warning_history_lines(&records);
        assert!(lines.starts_with("#1 • by <@7>"));
        assert!(lines.contains("#2 • by <@8>"));
        assert!(lines.contains("@\u{200B}everyone"));
        assert!(lines.contains("<t:200:R>"));
    }
}
