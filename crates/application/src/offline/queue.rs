use std::sync::Arc;

use tracing::{info, warn};

use domain::error::{DomainError, Result};
use domain::offline::OfflineStore;
use domain::{ActionPayload, Identity, OfflineAction, MAX_RETRIES};

use crate::weighing::WeighingEngine;

/// Result of executing a mutation through the queue.
#[derive(Debug)]
pub enum ExecuteOutcome {
    /// The operation ran against the store and succeeded.
    Completed(serde_json::Value),
    /// The store was unreachable; the action is queued and will replay on
    /// reconnect. The operator is not blocked.
    AcceptedOffline(OfflineAction),
}

/// What a replay pass did. Actions in `failed` and `exhausted` remain in the
/// queue for manual intervention; nothing is silently dropped.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: Vec<OfflineAction>,
    /// Retryable failures below the cap; will be attempted again next pass.
    pub deferred: Vec<OfflineAction>,
    /// Terminal failures from this pass, with the error that stopped them.
    pub failed: Vec<(OfflineAction, DomainError)>,
    /// Actions that had already hit the retry cap before this pass.
    pub exhausted: Vec<OfflineAction>,
    pub remaining: i64,
}

/// Makes the mutating engine operations resilient to connectivity loss.
///
/// Connectivity failures are converted into durable queue entries; every
/// other error propagates unchanged. Replay walks the queue in enqueue order
/// so same-session causality holds (a record-weight enqueued after its
/// add-bin can only run after it).
pub struct OfflineQueue {
    engine: Arc<WeighingEngine>,
    store: Arc<dyn OfflineStore>,
}

impl OfflineQueue {
    pub fn new(engine: Arc<WeighingEngine>, store: Arc<dyn OfflineStore>) -> Self {
        Self { engine, store }
    }

    /// Run one mutation, falling back to the queue when the store is
    /// unreachable.
    pub async fn execute(
        &self,
        identity: &Identity,
        payload: ActionPayload,
    ) -> Result<ExecuteOutcome> {
        match self.engine.apply(identity, &payload).await {
            Ok(value) => Ok(ExecuteOutcome::Completed(value)),
            Err(e) if e.is_retryable() => {
                warn!(kind = payload.kind(), error = %e, "store unreachable, queuing action");
                let action = self.store.append(identity, &payload).await?;
                Ok(ExecuteOutcome::AcceptedOffline(action))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn pending(&self) -> Result<Vec<OfflineAction>> {
        self.store.pending().await
    }

    /// Replay queued actions in FIFO order. Invoked on reconnect or by an
    /// explicit "sync now".
    ///
    /// Per-action outcomes: success removes the action; a retryable failure
    /// bumps its counter (auto-retry stops at the cap); a non-retryable
    /// failure is terminal immediately. One action failing never halts the
    /// pass - actions for the same session simply keep failing their own
    /// precondition checks until the blocker is resolved.
    pub async fn replay(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        for action in self.store.pending().await? {
            if action.retries >= MAX_RETRIES {
                report.exhausted.push(action);
                continue;
            }

            match self.engine.apply(&action.identity, &action.payload).await {
                Ok(_) => {
                    self.store.remove(action.id).await?;
                    info!(id = action.id, kind = action.payload.kind(), "action synced");
                    report.synced.push(action);
                }
                Err(e) if e.is_retryable() => {
                    let retries = action.retries + 1;
                    self.store.set_retries(action.id, retries).await?;
                    let action = OfflineAction { retries, ..action };
                    if retries >= MAX_RETRIES {
                        warn!(id = action.id, kind = action.payload.kind(), error = %e,
                            "action failed {retries} times, giving up on auto-retry");
                        report.failed.push((action, e));
                    } else {
                        report.deferred.push(action);
                    }
                }
                Err(e) => {
                    // Terminal: e.g. a Conflict surfaced by a duplicate queued
                    // start. Park it at the cap so it is never auto-retried.
                    self.store.set_retries(action.id, MAX_RETRIES).await?;
                    warn!(id = action.id, kind = action.payload.kind(), error = %e,
                        "queued action rejected, needs manual intervention");
                    report.failed.push((
                        OfflineAction {
                            retries: MAX_RETRIES,
                            ..action
                        },
                        e,
                    ));
                }
            }
        }

        report.remaining = self.store.count().await?;
        Ok(report)
    }
}
