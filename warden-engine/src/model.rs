use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::EscalationError;

/// Reason recorded when the issuing admin gives none.
pub const DEFAULT_WARNING_REASON: &str = "No reason provided";

/// One user's warning scope inside one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub group_id: u64,
    pub user_id: u64,
}

impl Pair {
    pub fn new(group_id: u64, user_id: u64) -> Self {
        Self { group_id, user_id }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.user_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub group_id: u64,
    pub user_id: u64,
    pub issuer_id: u64,
    pub reason: String,
    /// Unix seconds.
    pub timestamp: u64,
}

impl WarningRecord {
    pub fn new(pair: Pair, issuer_id: u64, reason: Option<&str>, timestamp: u64) -> Self {
        Self {
            group_id: pair.group_id,
            user_id: pair.user_id,
            issuer_id,
            reason: normalize_reason(reason),
            timestamp,
        }
    }

    pub fn pair(&self) -> Pair {
        Pair::new(self.group_id, self.user_id)
    }
}

/// A validated "warn this user" request coming out of the command router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarningRequest {
    pub pair: Pair,
    pub issuer_id: u64,
    pub reason: Option<String>,
}

impl WarningRequest {
    pub fn new(
        group_id: u64,
        target_user_id: Option<u64>,
        issuer_id: u64,
        reason: Option<String>,
    ) -> Result<Self, EscalationError> {
        let Some(user_id) = target_user_id else {
            return Err(EscalationError::invalid("reply to a message to warn user"));
        };

        if user_id == issuer_id {
            return Err(EscalationError::invalid("you can't warn yourself"));
        }

        Ok(Self {
            pair: Pair::new(group_id, user_id),
            issuer_id,
            reason,
        })
    }
}

/// A decided side effect against a group member. Fire-and-forget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    Warn { notify: String },
    Ban { reason: String },
    Mute { duration: Duration },
    Unmute,
    Kick { reason: String },
}

impl ModerationAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Warn { .. } => "warn",
            Self::Ban { .. } => "ban",
            Self::Mute { .. } => "mute",
            Self::Unmute => "unmute",
            Self::Kick { .. } => "kick",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningOutcome {
    Warned {
        count: u64,
        threshold: u64,
    },
    Escalated {
        action: ModerationAction,
        triggering_count: u64,
        /// The counter is already cleared even when this is set.
        action_failed: bool,
        failure: Option<String>,
    },
}

impl WarningOutcome {
    pub fn is_escalated(&self) -> bool {
        matches!(self, Self::Escalated { .. })
    }
}

fn normalize_reason(reason: Option<&str>) -> String {
    match reason.map(str::trim) {
        Some(reason) if !reason.is_empty() => reason.to_owned(),
        _ => DEFAULT_WARNING_REASON.to_owned(),
    }
}

pub(crate) fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
