use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::EscalationError;
use crate::gateway::{ModerationGateway, dispatch};
use crate::locks::PairLocks;
use crate::model::{ModerationAction, Pair, WarningOutcome, WarningRecord, WarningRequest, now_unix_secs};
use crate::store::WarningStore;

pub const DEFAULT_MAX_WARNINGS: u64 = 3;
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscalationPolicy {
    /// Warnings at which a ban fires. Compared with `>=`.
    pub max_warnings: u64,
    /// Upper bound on each gateway call.
    pub gateway_timeout: Duration,
}

impl EscalationPolicy {
    pub fn new(max_warnings: u64, gateway_timeout: Duration) -> Self {
        Self {
            max_warnings: max_warnings.max(1),
            gateway_timeout,
        }
    }

    pub fn ban_reason(&self) -> String {
        format!("Reached {} warnings", self.max_warnings)
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WARNINGS, DEFAULT_GATEWAY_TIMEOUT)
    }
}

/// Stateless apart from the per-pair locks: every decision re-reads the store.
pub struct EscalationEngine {
    store: Arc<dyn WarningStore>,
    gateway: Arc<dyn ModerationGateway>,
    policy: EscalationPolicy,
    locks: PairLocks,
}

impl EscalationEngine {
    pub fn new(
        store: Arc<dyn WarningStore>,
        gateway: Arc<dyn ModerationGateway>,
        policy: EscalationPolicy,
    ) -> Self {
        Self {
            store,
            gateway,
            policy,
            locks: PairLocks::new(),
        }
    }

    pub fn policy(&self) -> EscalationPolicy {
        self.policy
    }

    pub fn store(&self) -> &dyn WarningStore {
        self.store.as_ref()
    }

    /// Record one warning and ban the target once the threshold is reached.
    ///
    /// On escalation the pair's history is cleared before the ban is
    /// attempted and stays cleared if the ban fails.
    pub async fn issue_warning(
        &self,
        request: WarningRequest,
    ) -> Result<WarningOutcome, EscalationError> {
        let WarningRequest {
            pair,
            issuer_id,
            reason,
        } = request;
        let threshold = self.policy.max_warnings;

        let guard = self.locks.acquire(pair).await;

        let record = WarningRecord::new(pair, issuer_id, reason.as_deref(), now_unix_secs());
        let count = self
            .store
            .append_warning(pair, &record)
            .await
            .map_err(|source| {
                warn!(?source, %pair, "failed to record warning");
                EscalationError::StorageUnavailable(source)
            })?;

        if count < threshold {
            info!(group_id = pair.group_id, user_id = pair.user_id, count, threshold, "warning issued");
            return Ok(WarningOutcome::Warned { count, threshold });
        }

        self.store.clear_warnings(pair).await.map_err(|source| {
            warn!(?source, %pair, count, "failed to reset warnings after reaching threshold");
            EscalationError::StorageUnavailable(source)
        })?;
        drop(guard);

        info!(
            group_id = pair.group_id,
            user_id = pair.user_id,
            count,
            threshold,
            "warning threshold reached; banning"
        );

        let action = ModerationAction::Ban {
            reason: self.policy.ban_reason(),
        };
        let failure = match self.execute(pair, &action).await {
            Ok(()) => None,
            Err(source) => {
                error!(%source, %pair, "escalation ban failed; warnings were already reset");
                Some(source.to_string())
            }
        };

        Ok(WarningOutcome::Escalated {
            action,
            triggering_count: count,
            action_failed: failure.is_some(),
            failure,
        })
    }

    /// Current warning count for a pair, read from the store.
    pub async fn warning_count(&self, pair: Pair) -> Result<u64, EscalationError> {
        self.store
            .count(pair)
            .await
            .map_err(EscalationError::StorageUnavailable)
    }

    pub async fn warning_history(&self, pair: Pair) -> Result<Vec<WarningRecord>, EscalationError> {
        self.store
            .list_warnings(pair)
            .await
            .map_err(EscalationError::StorageUnavailable)
    }

    /// Run a direct moderation action under the configured timeout.
    pub async fn execute(&self, pair: Pair, action: &ModerationAction) -> Result<(), EscalationError> {
        dispatch(self.gateway.as_ref(), pair, action, self.policy.gateway_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{EscalationEngine, EscalationPolicy};
    use crate::gateway::ModerationGateway;
    use crate::model::{ModerationAction, Pair, WarningOutcome, WarningRequest};
    use crate::store::{MemoryWarningStore, WarningStore};

    #[derive(Default)]
    struct RecordingGateway {
        bans: Mutex<Vec<(u64, u64, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ModerationGateway for RecordingGateway {
        async fn ban(&self, group_id: u64, user_id: u64, reason: &str) -> anyhow::Result<()> {
            self.bans
                .lock()
                .unwrap()
                .push((group_id, user_id, reason.to_owned()));
            if self.fail {
                anyhow::bail!("network error");
            }
            Ok(())
        }

        async fn mute(&self, _: u64, _: u64, _: Duration) -> anyhow::Result<()> {
            Ok(())
        }

        async fn unmute(&self, _: u64, _: u64) -> anyhow::Result<()> {
            Ok(())
        }

        async fn kick(&self, _: u64, _: u64, _: &str) -> anyhow::Result<()> {
            Ok(())
        }

        async fn send_message(&self, _: u64, _: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn engine(
        max_warnings: u64,
        gateway: Arc<RecordingGateway>,
    ) -> (EscalationEngine, Arc<MemoryWarningStore>) {
        let store = Arc::new(MemoryWarningStore::new());
        let engine = EscalationEngine::new(
            store.clone(),
            gateway,
            EscalationPolicy::new(max_warnings, Duration::from_secs(1)),
        );
        (engine, store)
    }

    fn warn(group: u64, user: u64) -> WarningRequest {
        WarningRequest::new(group, Some(user), 1, None).unwrap()
    }

    #[tokio::test]
    async fn below_threshold_never_calls_gateway() {
        let gateway = Arc::new(RecordingGateway::default());
        let (engine, _) = engine(5, gateway.clone());

        for expected in 1..5 {
            let outcome = engine.issue_warning(warn(10, 20)).await.unwrap();
            assert_eq!(
                outcome,
                WarningOutcome::Warned {
                    count: expected,
                    threshold: 5
                }
            );
        }
        assert!(gateway.bans.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn threshold_bans_once_and_resets() {
        let gateway = Arc::new(RecordingGateway::default());
        let (engine, store) = engine(3, gateway.clone());
        let pair = Pair::new(10, 20);

        engine.issue_warning(warn(10, 20)).await.unwrap();
        engine.issue_warning(warn(10, 20)).await.unwrap();
        let outcome = engine.issue_warning(warn(10, 20)).await.unwrap();

        assert_eq!(
            outcome,
            WarningOutcome::Escalated {
                action: ModerationAction::Ban {
                    reason: "Reached 3 warnings".to_owned()
                },
                triggering_count: 3,
                action_failed: false,
                failure: None,
            }
        );
        assert_eq!(
            *gateway.bans.lock().unwrap(),
            vec![(10, 20, "Reached 3 warnings".to_owned())]
        );
        assert_eq!(store.count(pair).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_ban_still_resets_counter() {
        let gateway = Arc::new(RecordingGateway {
            fail: true,
            ..Default::default()
        });
        let (engine, _) = engine(1, gateway.clone());

        let outcome = engine.issue_warning(warn(10, 20)).await.unwrap();
        let WarningOutcome::Escalated {
            action_failed,
            failure,
            ..
        } = outcome
        else {
            panic!("expected escalation");
        };
        assert!(action_failed);
        assert!(failure.unwrap().contains("network error"));
        assert_eq!(engine.warning_count(Pair::new(10, 20)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn counter_restarts_after_escalation() {
        let gateway = Arc::new(RecordingGateway::default());
        let (engine, _) = engine(2, gateway);

        engine.issue_warning(warn(1, 2)).await.unwrap();
        assert!(engine.issue_warning(warn(1, 2)).await.unwrap().is_escalated());
        assert_eq!(
            engine.issue_warning(warn(1, 2)).await.unwrap(),
            WarningOutcome::Warned {
                count: 1,
                threshold: 2
            }
        );
    }

    #[test]
    fn policy_clamps_threshold_to_one() {
        let policy = EscalationPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_warnings, 1);
        assert_eq!(policy.ban_reason(), "Reached 1 warnings");
        assert_eq!(EscalationPolicy::default().max_warnings, 3);
    }
}
