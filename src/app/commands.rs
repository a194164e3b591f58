//! Inbound garage commands and console parsing.
//!
//! Both command sources — the remote store poll and the local serial
//! console — produce the same [`GarageCommand`] value and feed the single
//! reconciliation point in
//! [`GarageReconciler`](crate::control::garage::GarageReconciler).  Neither
//! source carries its own debounce state; dedup happens at the reconciler.

use core::fmt;

/// The two physical endpoints a garage command can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarageAction {
    Open,
    Close,
}

impl GarageAction {
    pub fn from_desired_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Close }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
        }
    }
}

/// Where a command came from.  Carried for diagnostic reporting only —
/// it never affects which action is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    /// Polled from the remote store (`garage/garageDoor`).
    Remote,
    /// Typed on the local serial console.
    Console,
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Console => write!(f, "serial"),
        }
    }
}

/// An ephemeral garage request — constructed per poll tick or per console
/// line, consumed immediately by the reconciler.
#[derive(Debug, Clone, Copy)]
pub struct GarageCommand {
    pub desired_open: bool,
    pub source: CommandSource,
}

impl GarageCommand {
    pub fn new(desired_open: bool, source: CommandSource) -> Self {
        Self {
            desired_open,
            source,
        }
    }

    pub fn action(&self) -> GarageAction {
        GarageAction::from_desired_open(self.desired_open)
    }
}

/// Parse a trimmed console line into a desired garage state.
///
/// `"open"` / `"1"` → open, `"close"` / `"0"` → close.  Anything else is
/// not a command and is silently ignored by the caller.
pub fn parse_console_command(line: &str) -> Option<bool> {
    match line.trim() {
        "open" | "1" => Some(true),
        "close" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_open_and_close_words() {
        assert_eq!(parse_console_command("open"), Some(true));
        assert_eq!(parse_console_command("close"), Some(false));
    }

    #[test]
    fn parses_numeric_forms() {
        assert_eq!(parse_console_command("1"), Some(true));
        assert_eq!(parse_console_command("0"), Some(false));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_console_command("  open\r\n"), Some(true));
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(parse_console_command("opeen"), None);
        assert_eq!(parse_console_command(""), None);
        assert_eq!(parse_console_command("2"), None);
        assert_eq!(parse_console_command("OPEN"), None);
    }

    #[test]
    fn action_mapping() {
        assert_eq!(GarageAction::from_desired_open(true), GarageAction::Open);
        assert_eq!(GarageAction::from_desired_open(false), GarageAction::Close);
        assert_eq!(GarageAction::Open.as_str(), "open");
    }
}
