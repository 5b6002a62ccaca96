use std::io::{self, BufRead, Cursor};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::config::{ShellConfig, ShellConfigError};
use crate::ext::read_text_file;
use crate::filesystem::DirectoryTree;
use crate::terminal::{Terminal, TerminalError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();

        let shell_config = match &app_config.config {
            Some(path) => ShellConfig::read(path).await.context(ShellConfigSnafu)?,
            None => ShellConfig::default(),
        };
        debug!("Loaded shell config: {:?}", shell_config);

        let input: Box<dyn BufRead> = match &app_config.script {
            Some(path) => {
                let script = read_text_file(path).await.context(ScriptSnafu {
                    file_path: path.display().to_string(),
                })?;
                Box::new(Cursor::new(script))
            }
            None => Box::new(io::stdin().lock()),
        };

        let mut terminal = Terminal::new(DirectoryTree::new(), &shell_config, io::stdout().lock());
        terminal.run_startup(&shell_config.startup);
        terminal.run(input).context(SessionSnafu)?;

        if app_config.print_tree_on_exit {
            terminal.print_entire_tree().context(SessionSnafu)?;
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the shell config"))]
    ShellConfigError { source: ShellConfigError },
    #[snafu(display("Failed to read the script file: {}", file_path))]
    ScriptError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Critical failure encountered during the terminal session"))]
    SessionError { source: TerminalError },
}
