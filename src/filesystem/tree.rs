use snafu::{OptionExt, ensure, location};
use tracing::{debug, error, warn};

use super::error::{
    AlreadyAtRootSnafu, CannotEnterFileSnafu, CannotMoveRootSnafu, IllegalNameSnafu,
    MoveIntoItselfSnafu, NoSuchDirectorySnafu, TreeError,
};
use super::node::{DirectoryNode, MAX_CHILDREN};

pub const ROOT_NAME: &str = "root";

/// Location of the open directory, as child indices from the root.
///
/// `anchor` leads to the directory the visible path starts at and `trail`
/// continues from there down to the open directory. Both are empty for the
/// root. A multi-segment `cd` rebases the anchor at the directory where
/// resolution started, so the visible path (and how far `cd ..` can climb)
/// begins there rather than at the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Cursor {
    anchor: Vec<usize>,
    trail: Vec<usize>,
}

impl Cursor {
    fn full_chain(&self) -> Vec<usize> {
        self.anchor.iter().chain(&self.trail).copied().collect()
    }
}

/// An in-memory directory hierarchy with a single open directory.
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    root: DirectoryNode,
    cursor: Cursor,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::directory(ROOT_NAME),
            cursor: Cursor::default(),
        }
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    /// The open directory.
    pub fn cursor(&self) -> &DirectoryNode {
        self.cursor_path().pop().unwrap_or(&self.root)
    }

    /// Nodes from the start of the visible path down to the open directory.
    pub fn cursor_path(&self) -> Vec<&DirectoryNode> {
        let Some(start) = self.root.descend(&self.cursor.anchor) else {
            error!(
                "Assumption that the cursor anchor always resolves failed {}",
                location!()
            );
            return vec![&self.root];
        };

        let mut path = vec![start];
        let mut node = start;
        for &index in &self.cursor.trail {
            match node.descend(&[index]) {
                Some(child) => {
                    path.push(child);
                    node = child;
                }
                None => {
                    error!(
                        "Assumption that the cursor trail always resolves failed {}",
                        location!()
                    );
                    break;
                }
            }
        }
        path
    }

    pub fn reset_cursor(&mut self) {
        debug!("Resetting cursor to {}", ROOT_NAME);
        self.cursor = Cursor::default();
    }

    pub fn present_working_directory(&self) -> String {
        self.cursor_path()
            .iter()
            .map(|node| node.name())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Names of the open directory's children, each followed by a space.
    pub fn list_directory(&self) -> String {
        let cursor = self.cursor();
        let mut listing = String::new();
        for n in 0..MAX_CHILDREN {
            match cursor.nth_child(n) {
                Ok(Some(child)) => {
                    listing.push_str(child.name());
                    listing.push(' ');
                }
                Ok(None) => break,
                Err(err) => {
                    warn!("{err}");
                    break;
                }
            }
        }
        listing
    }

    /// Pre-order rendering of the subtree under the open directory.
    pub fn render_directory_tree(&self) -> String {
        self.cursor().render_tree()
    }

    /// Pre-order rendering of the whole tree.
    pub fn render_entire_tree(&self) -> String {
        self.root.render_tree()
    }

    /// Opens a child directory by name, or follows a slash-separated path
    /// whose first segment names the open directory.
    pub fn change_directory(&mut self, name: &str) -> Result<(), TreeError> {
        let cursor = self.cursor();

        if name.contains('/') {
            let chain = cursor
                .follow_path(name)
                .context(NoSuchDirectorySnafu { name })?;
            let target = cursor
                .descend(&chain)
                .context(NoSuchDirectorySnafu { name })?;
            ensure!(!target.is_file(), CannotEnterFileSnafu);

            debug!("Changing directory along '{}'", name);
            self.cursor = Cursor {
                anchor: self.cursor.full_chain(),
                trail: chain,
            };
            return Ok(());
        }

        let index = cursor.position_of(name)?;
        let entering_file = cursor
            .nth_child(index)?
            .is_some_and(DirectoryNode::is_file);
        ensure!(!entering_file, CannotEnterFileSnafu);

        debug!("Changing directory to '{}'", name);
        self.cursor.trail.push(index);
        Ok(())
    }

    pub fn change_directory_to_parent(&mut self) -> Result<(), TreeError> {
        self.cursor.trail.pop().context(AlreadyAtRootSnafu)?;
        debug!("Moved cursor to {}", self.present_working_directory());
        Ok(())
    }

    pub fn make_directory(&mut self, name: &str) -> Result<(), TreeError> {
        self.adopt_at_cursor(DirectoryNode::directory(name))
    }

    pub fn make_file(&mut self, name: &str) -> Result<(), TreeError> {
        self.adopt_at_cursor(DirectoryNode::file(name))
    }

    /// Every path from the root to a node called `name`.
    pub fn find(&self, name: &str) -> Result<Vec<String>, TreeError> {
        self.root.find(name)
    }

    /// Relocates the node at `src_path` under the directory at `dest_path`.
    ///
    /// Both paths resolve from the open directory. Every check runs before
    /// anything is detached, so a failed move leaves the tree untouched.
    pub fn move_node(&mut self, src_path: &str, dest_path: &str) -> Result<(), TreeError> {
        let cursor = self.cursor();

        let src_chain = cursor
            .follow_path(src_path)
            .context(NoSuchDirectorySnafu { name: src_path })?;
        let Some((&src_index, src_parent)) = src_chain.split_last() else {
            return CannotMoveRootSnafu.fail();
        };

        let mut dest_chain = cursor
            .follow_path(dest_path)
            .context(NoSuchDirectorySnafu { name: dest_path })?;
        let dest = cursor
            .descend(&dest_chain)
            .context(NoSuchDirectorySnafu { name: dest_path })?;
        ensure!(!dest.is_file(), NoSuchDirectorySnafu { name: dest_path });
        ensure!(
            !dest_chain.starts_with(&src_chain),
            MoveIntoItselfSnafu { src: src_path }
        );
        dest.ensure_can_adopt()?;

        // Detaching the source shifts its later siblings one slot left
        if dest_chain.starts_with(src_parent) {
            if let Some(step) = dest_chain.get_mut(src_parent.len()) {
                if *step > src_index {
                    *step -= 1;
                }
            }
        }

        let base = self.cursor.full_chain();
        let absolute = |relative: &[usize]| -> Vec<usize> {
            base.iter().chain(relative).copied().collect()
        };

        let moved = self
            .node_mut(&absolute(src_parent))?
            .remove_child(src_index)
            .context(NoSuchDirectorySnafu { name: src_path })?;
        let moved_name = moved.name().to_owned();
        self.node_mut(&absolute(&dest_chain))?.add_child(moved)?;

        debug!("Moved '{}' under '{}'", moved_name, dest_path);
        Ok(())
    }

    /// Nodes from the open directory down to the node at `path`, or `None`
    /// when the path does not resolve.
    pub fn path_to_node(&self, path: &str) -> Option<Vec<&DirectoryNode>> {
        let cursor = self.cursor();
        let chain = cursor.follow_path(path)?;

        let mut nodes = vec![cursor];
        let mut node = cursor;
        for &index in &chain {
            node = node.descend(&[index])?;
            nodes.push(node);
        }
        Some(nodes)
    }

    fn adopt_at_cursor(&mut self, node: DirectoryNode) -> Result<(), TreeError> {
        validate_name(node.name())?;
        let chain = self.cursor.full_chain();
        let kind = node.kind();
        let name = node.name().to_owned();
        self.node_mut(&chain)?.add_child(node)?;
        debug!("Created {} '{}'", kind, name);
        Ok(())
    }

    fn node_mut(&mut self, chain: &[usize]) -> Result<&mut DirectoryNode, TreeError> {
        let pwd = self.present_working_directory();
        self.root
            .descend_mut(chain)
            .context(NoSuchDirectorySnafu { name: pwd })
            .inspect_err(|_| {
                error!(
                    "Assumption that resolved chains always point into the tree failed {}",
                    location!()
                )
            })
    }
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    ensure!(!name.contains([' ', '/']), IllegalNameSnafu { name });
    Ok(())
}
