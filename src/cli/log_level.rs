use clap::ValueEnum;
use tracing::Level;

/// Verbosity of diagnostics written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// `None` means no subscriber should be installed at all.
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Trace => Some(Level::TRACE),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::*;
    use crate::cli::Cli;

    #[rstest]
    #[case(LogLevel::Debug, Some(Level::DEBUG))]
    #[case(LogLevel::Warn, Some(Level::WARN))]
    #[case(LogLevel::Silent, None)]
    fn maps_to_tracing_level(#[case] level: LogLevel, #[case] expected: Option<Level>) {
        assert_eq!(level.to_tracing_level(), expected);
    }

    #[test]
    fn cli_defaults_to_warn_and_stdin() {
        let cli = Cli::parse_from(["dirsh"]);
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert!(cli.script.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.print_tree_on_exit);
    }

    #[test]
    fn cli_accepts_script_and_flags() {
        let cli = Cli::parse_from([
            "dirsh",
            "session.txt",
            "--log-level",
            "silent",
            "--config",
            "shell.yaml",
            "--print-tree-on-exit",
        ]);
        assert_eq!(cli.log_level, LogLevel::Silent);
        assert_eq!(cli.script.unwrap().to_str(), Some("session.txt"));
        assert_eq!(cli.config.unwrap().to_str(), Some("shell.yaml"));
        assert!(cli.print_tree_on_exit);
    }
}
