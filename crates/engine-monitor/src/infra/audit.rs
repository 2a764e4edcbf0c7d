//! Audit trail for engine sessions.
//!
//! Every engine event, plus a session start and end marker, is appended
//! to a JSONL file so a run can be reconstructed afterwards.

use engine_core::EngineEvent;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// What a single audit line records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditRecord {
    /// Host began driving a fresh engine
    SessionStart {
        version: String,
        fuel_percent: i32,
        commands: usize,
    },
    /// Event reported by the engine
    Engine(EngineEvent),
    /// Host finished its command list
    SessionEnd { commands_run: u64, rejected: u64 },
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position in this logger's output, starting at 0
    pub sequence: u64,
    /// Wall-clock Unix timestamp in microseconds
    pub unix_us: u64,
    pub record: AuditRecord,
}

/// Thread-safe audit logger that writes to a JSONL file
pub struct AuditLogger {
    writer: Mutex<BufWriter<File>>,
    sequence: AtomicU64,
}

impl AuditLogger {
    /// Opens `path` in append mode, creating parent directories as needed.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::with_capacity(8192, file)),
            sequence: AtomicU64::new(0),
        })
    }

    pub fn log(&self, entry: &AuditEntry) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("audit writer lock poisoned"))?;
        serde_json::to_writer(&mut *writer, entry)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Stamps `record` with the next sequence number and the current time.
    pub fn log_record(&self, record: AuditRecord) -> io::Result<()> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.log(&AuditEntry {
            sequence,
            unix_us: unix_us(),
            record,
        })
    }
}

fn unix_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{EngineState, RecordingObserver};
    use tempfile::tempdir;

    #[test]
    fn test_audit_logger_writes_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");

        let logger = AuditLogger::new(&path).unwrap();

        logger
            .log_record(AuditRecord::SessionStart {
                version: "0.1.0".to_string(),
                fuel_percent: 100,
                commands: 1,
            })
            .unwrap();

        let mut engine = EngineState::new(RecordingObserver::new());
        engine.start().unwrap();
        let started = engine.observer().events()[2].clone();
        logger
            .log_record(AuditRecord::Engine(started.clone()))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);

        let entry1: AuditEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry1.sequence, 0);
        assert!(matches!(entry1.record, AuditRecord::SessionStart { .. }));

        let entry2: AuditEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(entry2.sequence, 1);
        assert_eq!(entry2.record, AuditRecord::Engine(started));
        assert!(entry2.unix_us >= entry1.unix_us);
    }

    #[test]
    fn test_audit_logger_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        for _ in 0..2 {
            let logger = AuditLogger::new(&path).unwrap();
            logger
                .log_record(AuditRecord::SessionEnd {
                    commands_run: 0,
                    rejected: 0,
                })
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
