/*
 * Responsibility
 * - 認証ライフサイクルイベント (Failed / Validated / Challenged) の定義
 * - 観測用 sink への fan-out。sink の失敗は握りつぶし、検証結果には影響させない
 */
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use thiserror::Error;

use super::access_jwt::VerificationFailure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    Failed(VerificationFailure),
    Validated { subject: String },
    Challenged { reason: String },
}

#[derive(Debug, Error)]
#[error("auth event sink failed: {0}")]
pub struct SinkError(pub String);

/// Observability sink for auth lifecycle events.
pub trait AuthEventSink: Send + Sync {
    fn notify(&self, event: &AuthEvent) -> Result<(), SinkError>;
}

/// Fire-and-forget fan-out to every registered sink.
#[derive(Clone, Default)]
pub struct Notifier {
    sinks: Vec<Arc<dyn AuthEventSink>>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuthEventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn notify(&self, event: &AuthEvent) {
        for sink in &self.sinks {
            if let Err(err) = sink.notify(event) {
                tracing::debug!(error = %err, "auth event sink error ignored");
            }
        }
    }
}

/// Logs every event under the `jwt_auth` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuthEventSink for TracingSink {
    fn notify(&self, event: &AuthEvent) -> Result<(), SinkError> {
        match event {
            AuthEvent::Failed(reason) => {
                tracing::error!(target: "jwt_auth", reason = reason.code(), "JWT auth failed: {reason}");
            }
            AuthEvent::Validated { subject } => {
                tracing::info!(target: "jwt_auth", subject = %subject, "JWT token validated");
            }
            AuthEvent::Challenged { reason } => {
                tracing::warn!(target: "jwt_auth", reason = %reason, "JWT challenge");
            }
        }
        Ok(())
    }
}

/// Process-wide counters, surfaced by the health endpoint.
#[derive(Debug, Default)]
pub struct AuthStats {
    validated: AtomicU64,
    failed: AtomicU64,
    challenged: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthStatsSnapshot {
    pub validated: u64,
    pub failed: u64,
    pub challenged: u64,
}

impl AuthStats {
    pub fn snapshot(&self) -> AuthStatsSnapshot {
        AuthStatsSnapshot {
            validated: self.validated.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            challenged: self.challenged.load(Ordering::Relaxed),
        }
    }
}

impl AuthEventSink for AuthStats {
    fn notify(&self, event: &AuthEvent) -> Result<(), SinkError> {
        let counter = match event {
            AuthEvent::Failed(_) => &self.failed,
            AuthEvent::Validated { .. } => &self.validated,
            AuthEvent::Challenged { .. } => &self.challenged,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
