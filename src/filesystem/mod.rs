//! In-memory directory hierarchy.
//!
//! Directories own their children in insertion order, capped at
//! [`MAX_CHILDREN`] entries each. A [`DirectoryTree`] keeps one open
//! directory that navigation, creation and path resolution work relative to.

mod error;
mod node;
mod tree;

pub use error::{TreeError, TreeErrorKind};
pub use node::{DirectoryNode, MAX_CHILDREN, NodeKind};
pub use tree::{DirectoryTree, ROOT_NAME};
