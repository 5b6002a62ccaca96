use tracing::debug;

use crate::filesystem::{DirectoryTree, TreeError};

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PresentWorkingDirectory,
    List,
    ListRecursive,
    ChangeToRoot,
    ChangeToParent,
    ChangeDirectory(String),
    MakeDirectory(String),
    MakeFile(String),
    Find(String),
    Move { src: String, dest: String },
    Exit,
}

/// What the terminal should do after a command ran successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Silent,
    Output(String),
    Exit,
}

impl Command {
    /// Parses a line into a command.
    ///
    /// The verb is everything before the first space and the argument is the
    /// trimmed remainder. Unknown verbs and verbs missing their argument yield
    /// `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, Some(rest.trim())),
            None => (line, None),
        };
        let owned = |argument: &str| argument.to_owned();

        match verb {
            "pwd" => Some(Command::PresentWorkingDirectory),
            "ls" if line == "ls -R" => Some(Command::ListRecursive),
            "ls" => Some(Command::List),
            "cd" if line == "cd /" => Some(Command::ChangeToRoot),
            "cd" if line == "cd .." => Some(Command::ChangeToParent),
            "cd" => argument.map(owned).map(Command::ChangeDirectory),
            "mkdir" => argument.map(owned).map(Command::MakeDirectory),
            "touch" => argument.map(owned).map(Command::MakeFile),
            "find" => argument.map(owned).map(Command::Find),
            "mv" => {
                let (src, dest) = argument?.split_once(' ')?;
                Some(Command::Move {
                    src: src.to_owned(),
                    dest: dest.trim().to_owned(),
                })
            }
            "exit" if line == "exit" => Some(Command::Exit),
            _ => {
                debug!("Ignoring unrecognized input '{}'", line);
                None
            }
        }
    }

    pub fn apply(&self, tree: &mut DirectoryTree) -> Result<Reply, TreeError> {
        let reply = match self {
            Command::PresentWorkingDirectory => Reply::Output(tree.present_working_directory()),
            Command::List => Reply::Output(tree.list_directory()),
            Command::ListRecursive => Reply::Output(tree.render_directory_tree()),
            Command::ChangeToRoot => {
                tree.reset_cursor();
                Reply::Silent
            }
            Command::ChangeToParent => {
                tree.change_directory_to_parent()?;
                Reply::Silent
            }
            Command::ChangeDirectory(name) => {
                tree.change_directory(name)?;
                Reply::Silent
            }
            Command::MakeDirectory(name) => {
                tree.make_directory(name)?;
                Reply::Silent
            }
            Command::MakeFile(name) => {
                tree.make_file(name)?;
                Reply::Silent
            }
            Command::Find(name) => {
                let mut paths = tree.find(name)?.join("\n");
                paths.push('\n');
                Reply::Output(paths)
            }
            Command::Move { src, dest } => {
                tree.move_node(src, dest)?;
                Reply::Silent
            }
            Command::Exit => Reply::Exit,
        };
        Ok(reply)
    }
}
