use std::io::{BufRead, Write};

use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::filesystem::DirectoryTree;
use crate::terminal::{Command, Reply};

/// Read-eval-print loop driving a [`DirectoryTree`].
///
/// Every recoverable command failure is written to the output as its message
/// and the loop carries on; only `exit` or the end of input stop it.
pub struct Terminal<W: Write> {
    tree: DirectoryTree,
    prompt: String,
    greeting: String,
    farewell: String,
    out: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(tree: DirectoryTree, config: &ShellConfig, out: W) -> Self {
        Self {
            tree,
            prompt: config.prompt.clone(),
            greeting: config.greeting.clone(),
            farewell: config.farewell.clone(),
            out,
        }
    }

    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Replays commands without printing anything.
    pub fn run_startup<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            let line = line.as_ref();
            let Some(command) = Command::parse(line) else {
                warn!("Skipping unrecognized startup command '{}'", line);
                continue;
            };
            match command.apply(&mut self.tree) {
                Ok(Reply::Exit) => {
                    warn!("Ignoring 'exit' in startup commands");
                }
                Ok(_) => debug!("Startup command '{}' succeeded", line),
                Err(err) => warn!("Startup command '{}' failed: {}", line, err),
            }
        }
    }

    pub fn run(&mut self, input: impl BufRead) -> Result<(), TerminalError> {
        writeln!(self.out, "{}", self.greeting).context(WriteSnafu)?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", self.prompt).context(WriteSnafu)?;
            self.out.flush().context(WriteSnafu)?;

            let Some(line) = lines.next() else {
                info!("Input exhausted, ending session");
                break;
            };
            let line = line.context(ReadSnafu)?;

            let Some(command) = Command::parse(&line) else {
                continue;
            };
            match command.apply(&mut self.tree) {
                Ok(Reply::Exit) => break,
                Ok(Reply::Silent) => {}
                Ok(Reply::Output(text)) => writeln!(self.out, "{text}").context(WriteSnafu)?,
                Err(err) => {
                    debug!("Command {:?} failed: {}", command, err);
                    writeln!(self.out, "{err}").context(WriteSnafu)?;
                }
            }
        }

        writeln!(self.out, "{}", self.farewell).context(WriteSnafu)?;
        Ok(())
    }

    /// Writes the whole tree, starting at the root.
    pub fn print_entire_tree(&mut self) -> Result<(), TerminalError> {
        writeln!(self.out, "{}", self.tree.render_entire_tree()).context(WriteSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum TerminalError {
    #[snafu(display("Failed to read terminal input"))]
    ReadError { source: std::io::Error },
    #[snafu(display("Failed to write terminal output"))]
    WriteError { source: std::io::Error },
}
