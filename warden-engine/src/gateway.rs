use std::time::Duration;

use async_trait::async_trait;
use tracing::error;

use crate::error::EscalationError;
use crate::model::{ModerationAction, Pair};

/// Platform API able to act on group members.
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    async fn ban(&self, group_id: u64, user_id: u64, reason: &str) -> anyhow::Result<()>;

    async fn mute(&self, group_id: u64, user_id: u64, duration: Duration) -> anyhow::Result<()>;

    async fn unmute(&self, group_id: u64, user_id: u64) -> anyhow::Result<()>;

    async fn kick(&self, group_id: u64, user_id: u64, reason: &str) -> anyhow::Result<()>;

    async fn send_message(&self, group_id: u64, text: &str) -> anyhow::Result<()>;
}

/// Run `action` against `pair`, giving up after `timeout`.
pub async fn dispatch(
    gateway: &dyn ModerationGateway,
    pair: Pair,
    action: &ModerationAction,
    timeout: Duration,
) -> Result<(), EscalationError> {
    let Pair { group_id, user_id } = pair;
    let call = async {
        match action {
            ModerationAction::Warn { notify } => gateway.send_message(group_id, notify).await,
            ModerationAction::Ban { reason } => gateway.ban(group_id, user_id, reason).await,
            ModerationAction::Mute { duration } => gateway.mute(group_id, user_id, *duration).await,
            ModerationAction::Unmute => gateway.unmute(group_id, user_id).await,
            ModerationAction::Kick { reason } => gateway.kick(group_id, user_id, reason).await,
        }
    };

    let reason = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(source)) => {
            error!(?source, %pair, action = action.name(), "moderation action failed");
            source.to_string()
        }
        Err(_) => {
            error!(%pair, action = action.name(), timeout_ms = timeout.as_millis() as u64, "moderation action timed out");
            format!("timed out after {}s", timeout.as_secs())
        }
    };

    Err(EscalationError::GatewayActionFailed {
        action: action.name(),
        reason,
    })
}
