use crate::infra::audit::{AuditLogger, AuditRecord};
use engine_core::{EngineEvent, EngineObserver, LogObserver};
use std::sync::Arc;
use tracing::warn;

/// Sends engine events to the log pipeline and, when enabled, the audit trail.
pub struct HostObserver {
    log: LogObserver,
    audit: Option<Arc<AuditLogger>>,
}

impl HostObserver {
    pub fn new(audit: Option<Arc<AuditLogger>>) -> Self {
        Self {
            log: LogObserver,
            audit,
        }
    }
}

impl EngineObserver for HostObserver {
    fn on_event(&self, event: &EngineEvent) {
        self.log.on_event(event);
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_record(AuditRecord::Engine(event.clone())) {
                warn!(error = %e, "Failed to write audit entry");
            }
        }
    }
}
