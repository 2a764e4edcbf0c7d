use engine_core::Readings;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command} expects {expected} argument(s), got {found}")]
    Arity {
        command: String,
        expected: usize,
        found: usize,
    },
    #[error("not an integer: {0}")]
    InvalidNumber(String),
}

/// One step of a host script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Update(Readings),
    Classify,
    Status,
    Running,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let expected = match name {
            "start" | "stop" | "classify" | "status" | "running" => 0,
            "update" => 4,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        if args.len() != expected {
            return Err(CommandError::Arity {
                command: name.to_string(),
                expected,
                found: args.len(),
            });
        }

        let command = match name {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "classify" => Command::Classify,
            "status" => Command::Status,
            "running" => Command::Running,
            _ => {
                let values = args
                    .iter()
                    .map(|raw| {
                        raw.parse::<i32>()
                            .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
                    })
                    .collect::<Result<Vec<i32>, _>>()?;
                Command::Update(Readings::new(values[0], values[1], values[2], values[3]))
            }
        };
        Ok(command)
    }
}

/// Parses `;`-separated commands, skipping empty entries.
pub fn parse_script(script: &str) -> Result<Vec<Command>, CommandError> {
    script
        .split(';')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::parse)
        .collect()
}
