use crate::runtime::script::{parse_script, Command, CommandError};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SCRIPT: &str = "status;start;classify;update 95 60 3000 75;classify;status;stop";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub show_help: bool,
    pub json_logs: bool,
    pub log_file: Option<PathBuf>,
    pub audit_path: Option<PathBuf>,
    pub fuel_percent: i32,
    pub cycles: Option<u32>,
    pub script: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            show_help: false,
            json_logs: false,
            log_file: None,
            audit_path: None,
            fuel_percent: 100,
            cycles: None,
            script: DEFAULT_SCRIPT.to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut cfg = RuntimeConfig::default();
        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--script" => {
                    cfg.script = value_of(args, i)?.to_string();
                    i += 1;
                }
                "--fuel" => {
                    cfg.fuel_percent = parse_value(args, i)?;
                    i += 1;
                }
                "--cycles" => {
                    cfg.cycles = Some(parse_value(args, i)?);
                    i += 1;
                }
                "--json-logs" => {
                    cfg.json_logs = true;
                }
                "--log-file" => {
                    cfg.log_file = Some(PathBuf::from(value_of(args, i)?));
                    i += 1;
                }
                "--audit-log" => {
                    cfg.audit_path = Some(PathBuf::from(value_of(args, i)?));
                    i += 1;
                }
                "--help" | "-h" => {
                    cfg.show_help = true;
                    break;
                }
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            }
            i += 1;
        }
        Ok(cfg)
    }

    /// Commands to run: `--cycles` wins over `--script`.
    pub fn commands(&self) -> Result<Vec<Command>, CommandError> {
        match self.cycles {
            Some(cycles) => Ok((0..cycles)
                .flat_map(|_| [Command::Start, Command::Stop])
                .collect()),
            None => parse_script(&self.script),
        }
    }

    pub fn print_help() {
        println!(
            r#"engine-monitor - Engine state monitor

USAGE:
    engine-monitor [OPTIONS]

OPTIONS:
    --script <CMDS>         Semicolon-separated commands to run against the engine
                            [default: {DEFAULT_SCRIPT}]
    --fuel <PCT>            Initial fuel level in percent [default: 100]
    --cycles <N>            Run N start/stop cycles instead of a script
    --json-logs             Output logs in JSON format (for log aggregation)
    --log-file <PATH>       Also write logs to the given file
    --audit-log <PATH>      Enable audit logging to specified JSONL file
    -h, --help              Print this help message

COMMANDS:
    start                   Start the engine (needs fuel)
    stop                    Stop the engine
    update <T> <P> <R> <F>  Set temperature, pressure, rpm and fuel (engine must be on)
    classify                Evaluate every reading against its safety band
    status                  Print the status block
    running                 Print whether the engine is on

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log filter (e.g., RUST_LOG=info,engine_core=trace)

EXAMPLES:
    # Drive a short session and keep an audit trail
    engine-monitor --script "start;update 125 50 700 15;classify;stop" --audit-log audit.jsonl

    # Start/stop stress run with a log file
    engine-monitor --cycles 100 --log-file logs/engine.log
"#
        );
    }
}

fn value_of(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(args[i].clone()))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T, ConfigError> {
    let raw = value_of(args, i)?;
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        flag: args[i].clone(),
        value: raw.to_string(),
    })
}
