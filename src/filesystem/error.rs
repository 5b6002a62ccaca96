use derive_more::Display;
use snafu::Snafu;

/// Broad failure categories a tree operation can report.
///
/// Lookup misses share `NotADirectory` with genuine type mismatches; the
/// message text is what tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TreeErrorKind {
    #[display("not a directory")]
    NotADirectory,
    #[display("full directory")]
    FullDirectory,
    #[display("invalid argument")]
    InvalidArgument,
    #[display("out of bounds")]
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("ERROR: No such directory named '{name}'."))]
    NoSuchDirectory { name: String },
    #[snafu(display("ERROR: Cannot change directory into a file."))]
    CannotEnterFile,
    #[snafu(display("ERROR: Cannot add file to file."))]
    CannotAddToFile,
    #[snafu(display("ERROR: Cannot get child of a file."))]
    FileHasNoChildren,
    #[snafu(display("ERROR: Present directory is full."))]
    DirectoryFull,
    #[snafu(display("ERROR: Illegal name"))]
    IllegalName { name: String },
    #[snafu(display("ERROR: Cannot remove root."))]
    CannotMoveRoot,
    #[snafu(display("ERROR: Cannot move '{src}' into itself."))]
    MoveIntoItself { src: String },
    #[snafu(display("ERROR: Already at root directory."))]
    AlreadyAtRoot,
}

impl TreeError {
    pub fn kind(&self) -> TreeErrorKind {
        match self {
            TreeError::NoSuchDirectory { .. }
            | TreeError::CannotEnterFile
            | TreeError::CannotAddToFile
            | TreeError::FileHasNoChildren => TreeErrorKind::NotADirectory,
            TreeError::DirectoryFull => TreeErrorKind::FullDirectory,
            TreeError::IllegalName { .. }
            | TreeError::CannotMoveRoot
            | TreeError::MoveIntoItself { .. } => TreeErrorKind::InvalidArgument,
            TreeError::AlreadyAtRoot => TreeErrorKind::OutOfBounds,
        }
    }
}
