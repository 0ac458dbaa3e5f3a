//! Replay command parsing
//!
//! One command per line:
//! - `set <key> <value>` (the value is the rest of the line, trailing
//!   whitespace included)
//! - `get <key>`
//! - `del <key>`
//! - `clear`, `len`, `stats`

use std::str::FromStr;

use crate::error::CacheError;

/// A single parsed replay instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Del { key: String },
    Clear,
    Len,
    Stats,
}

impl Command {
    /// Parses a line, returning `None` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> Option<Result<Self, CacheError>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        Some(line.trim_end_matches(['\r', '\n']).parse())
    }
}

impl FromStr for Command {
    type Err = CacheError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(key, value)| (key, value.trim_start()))
                    .filter(|(_, value)| !value.is_empty())
                    .ok_or_else(|| usage("set <key> <value>"))?;
                Ok(Command::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "get" => Ok(Command::Get {
                key: single_key(rest, "get <key>")?,
            }),
            "del" => Ok(Command::Del {
                key: single_key(rest, "del <key>")?,
            }),
            "clear" => no_args(rest, "clear", Command::Clear),
            "len" => no_args(rest, "len", Command::Len),
            "stats" => no_args(rest, "stats", Command::Stats),
            "" => Err(CacheError::InvalidCommand("empty command".to_string())),
            other => Err(CacheError::InvalidCommand(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

fn single_key(rest: &str, form: &str) -> Result<String, CacheError> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(key), None) => Ok(key.to_string()),
        _ => Err(usage(form)),
    }
}

fn no_args(rest: &str, form: &str, command: Command) -> Result<Command, CacheError> {
    if rest.trim().is_empty() {
        Ok(command)
    } else {
        Err(usage(form))
    }
}

fn usage(form: &str) -> CacheError {
    CacheError::InvalidCommand(format!("usage: {}", form))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        let cmd: Command = "set user:1 hello world".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                key: "user:1".to_string(),
                value: "hello world".to_string()
            }
        );
    }

    #[test]
    fn test_parse_set_keeps_trailing_whitespace() {
        assert_eq!(
            Command::parse_line("set k v  \r\n"),
            Some(Ok(Command::Set {
                key: "k".to_string(),
                value: "v  ".to_string()
            }))
        );
        assert!("set k    ".parse::<Command>().is_err());
        assert_eq!(Command::parse_line("  len  "), Some(Ok(Command::Len)));
    }

    #[test]
    fn test_parse_set_without_value() {
        assert!(matches!(
            "set lonely".parse::<Command>(),
            Err(CacheError::InvalidCommand(_))
        ));
        assert!("set".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_get_and_del() {
        assert_eq!(
            "GET k".parse::<Command>().unwrap(),
            Command::Get {
                key: "k".to_string()
            }
        );
        assert_eq!(
            "del   k  ".parse::<Command>().unwrap(),
            Command::Del {
                key: "k".to_string()
            }
        );
        assert!("get a b".parse::<Command>().is_err());
        assert!("get".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!("clear".parse::<Command>().unwrap(), Command::Clear);
        assert_eq!("len".parse::<Command>().unwrap(), Command::Len);
        assert_eq!("stats".parse::<Command>().unwrap(), Command::Stats);
        assert!("clear now".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "frobnicate x".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert!(Command::parse_line("").is_none());
        assert!(Command::parse_line("   ").is_none());
        assert!(Command::parse_line("# warmup").is_none());
        assert!(matches!(Command::parse_line("len"), Some(Ok(Command::Len))));
    }
}
