use crate::infra::audit::{AuditLogger, AuditRecord};
use crate::runtime::config::{ConfigError, RuntimeConfig};
use crate::runtime::logging::{init_tracing, LoggingError};
use crate::runtime::observer::HostObserver;
use crate::runtime::script::{Command, CommandError};
use engine_core::{EngineObserver, EngineState, Severity};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid script: {0}")]
    Script(#[from] CommandError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("failed to open audit log: {0}")]
    Audit(#[source] io::Error),
}

impl RuntimeError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RuntimeError::Config(_) | RuntimeError::Script(_) => ExitCode::from(2),
            RuntimeError::Logging(_) | RuntimeError::Audit(_) => ExitCode::from(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub commands_run: u64,
    pub rejected: u64,
    /// Worst severity seen across all `classify` commands.
    pub worst: Option<Severity>,
}

pub fn run_from_args() -> ExitCode {
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return RuntimeError::from(e).exit_code();
        }
    };
    if config.show_help {
        RuntimeConfig::print_help();
        return ExitCode::SUCCESS;
    }
    match run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

pub fn run(config: RuntimeConfig) -> Result<RunSummary, RuntimeError> {
    // Reject a bad script before touching the filesystem.
    let commands = config.commands()?;

    let _log_guard = init_tracing(config.json_logs, config.log_file.as_deref())?;
    let audit_logger = init_audit_logger(config.audit_path.as_deref())?;

    if let Some(ref logger) = audit_logger {
        let record = AuditRecord::SessionStart {
            version: env!("CARGO_PKG_VERSION").to_string(),
            fuel_percent: config.fuel_percent,
            commands: commands.len(),
        };
        if let Err(e) = logger.log_record(record) {
            warn!(error = %e, "Failed to write audit entry");
        }
    }

    info!(
        commands = commands.len(),
        fuel_percent = config.fuel_percent,
        audit = audit_logger.is_some(),
        "Starting engine monitor"
    );

    let mut engine = EngineState::with_fuel(
        HostObserver::new(audit_logger.clone()),
        config.fuel_percent,
    );
    let mut summary = RunSummary::default();
    for command in &commands {
        execute(&mut engine, command, &mut summary);
    }

    info!(
        commands_run = summary.commands_run,
        rejected = summary.rejected,
        worst = summary.worst.map(Severity::as_str).unwrap_or("n/a"),
        running = engine.is_running(),
        "Run complete"
    );

    if let Some(ref logger) = audit_logger {
        let record = AuditRecord::SessionEnd {
            commands_run: summary.commands_run,
            rejected: summary.rejected,
        };
        if let Err(e) = logger.log_record(record) {
            warn!(error = %e, "Failed to write audit entry");
        }
    }

    Ok(summary)
}

fn execute<O: EngineObserver>(
    engine: &mut EngineState<O>,
    command: &Command,
    summary: &mut RunSummary,
) {
    summary.commands_run += 1;
    let outcome = match command {
        Command::Start => engine.start(),
        Command::Stop => {
            engine.stop();
            Ok(())
        }
        Command::Update(readings) => engine.set_readings(*readings),
        Command::Classify => {
            let worst = engine.classify().worst();
            summary.worst = Some(summary.worst.map_or(worst, |w| w.max(worst)));
            Ok(())
        }
        Command::Status => {
            println!("{}", engine.describe());
            Ok(())
        }
        Command::Running => {
            println!("running: {}", engine.is_running());
            Ok(())
        }
    };

    if let Err(e) = outcome {
        summary.rejected += 1;
        debug!(command = ?command, error = %e, "Command rejected");
    }
}

fn init_audit_logger(audit_path: Option<&Path>) -> Result<Option<Arc<AuditLogger>>, RuntimeError> {
    audit_path
        .map(|path| {
            let logger = AuditLogger::new(path).map_err(RuntimeError::Audit)?;
            info!(path = %path.display(), "Audit logging enabled");
            Ok::<_, RuntimeError>(Arc::new(logger))
        })
        .transpose()
}
