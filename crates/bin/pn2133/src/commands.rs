//! Console command parsing.
//!
//! One command per line. Each command stands in for one control of the
//! dashboard page (a button, a checkbox, a text field or a key chord).

use std::str::FromStr;

use pn2133_app::settings_form::SettingsEdit;
use pn2133_app::shortcuts::KeyChord;
use pn2133_domain::tab::{Tab, UnknownTab};

pub const HELP: &str = "\
commands:
  tab <scanner|logger|settings|data>   switch tab
  ^1 .. ^4, ^s                         keyboard shortcuts (ctrl/cmd + key)
  scan                                 scan for a tag
  write <data>                         write data to the tag
  logging on|off                       toggle silent logging
  interval <ms>                        change the scan interval
  set <field> <value>                  edit a settings field
                                       (silent_logging, scan_interval, entropy_threshold,
                                        entropy_monitoring, remote_url, remote_key)
  save                                 save settings
  reset                                reset settings to defaults
  refresh                              refresh logs
  export                               export logs to a JSON file
  clear                                clear all logs
  diag api|scan|logs                   diagnostics
  show                                 print the dashboard
  help                                 this text
  quit                                 exit";

/// Developer diagnostics target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagTarget {
    Api,
    Scan,
    Logs,
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Shortcut(KeyChord),
    Scan,
    Write(String),
    Logging(bool),
    Interval(String),
    Set(SettingsEdit),
    Save,
    Reset,
    Refresh,
    Export,
    Clear,
    Diag(DiagTarget),
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Tab(#[from] UnknownTab),
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_edit(field: &str, value: &str) -> Result<SettingsEdit, CommandError> {
    const USAGE: &str = "set <field> <value>";
    let switch = || parse_switch(value).ok_or(CommandError::Usage(USAGE));
    Ok(match field {
        "silent_logging" => SettingsEdit::SilentLogging(switch()?),
        "scan_interval" => SettingsEdit::ScanInterval(value.to_string()),
        "entropy_threshold" => SettingsEdit::EntropyThreshold(value.to_string()),
        "entropy_monitoring" => SettingsEdit::EntropyMonitoring(switch()?),
        "remote_url" => SettingsEdit::RemoteUrl(value.to_string()),
        "remote_key" => SettingsEdit::RemoteKey(value.to_string()),
        _ => return Err(CommandError::Usage(USAGE)),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        if let Some(key) = word.strip_prefix('^') {
            let mut chars = key.chars();
            return match (chars.next(), chars.next()) {
                (Some(key), None) => Ok(Self::Shortcut(KeyChord::ctrl(key))),
                _ => Err(CommandError::Usage("^<key>")),
            };
        }

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "tab" => Ok(Self::Tab(rest.parse()?)),
            "scan" => Ok(Self::Scan),
            "write" => Ok(Self::Write(rest.to_string())),
            "logging" => parse_switch(rest)
                .map(Self::Logging)
                .ok_or(CommandError::Usage("logging on|off")),
            "interval" if !rest.is_empty() => Ok(Self::Interval(rest.to_string())),
            "interval" => Err(CommandError::Usage("interval <ms>")),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                parse_edit(field, value).map(Self::Set)
            }
            "save" => Ok(Self::Save),
            "reset" => Ok(Self::Reset),
            "refresh" => Ok(Self::Refresh),
            "export" => Ok(Self::Export),
            "clear" => Ok(Self::Clear),
            "diag" => match rest {
                "api" => Ok(Self::Diag(DiagTarget::Api)),
                "scan" => Ok(Self::Diag(DiagTarget::Scan)),
                "logs" => Ok(Self::Diag(DiagTarget::Logs)),
                _ => Err(CommandError::Usage("diag api|scan|logs")),
            },
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}
