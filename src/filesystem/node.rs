use std::fmt;

use derive_more::Display;
use snafu::{OptionExt, ensure};
use tracing::warn;

use super::error::{
    CannotAddToFileSnafu, DirectoryFullSnafu, FileHasNoChildrenSnafu, NoSuchDirectorySnafu,
    TreeError,
};

/// Maximum number of children a single directory may hold.
pub const MAX_CHILDREN: usize = 10;

/// Extra leading spaces per level when rendering a subtree.
const INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
}

/// A single vertex of the directory tree.
///
/// Directories own their children in insertion order. Files never hold
/// children, so their child list stays empty for their whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    name: String,
    kind: NodeKind,
    children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::with_capacity(MAX_CHILDREN),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> impl Iterator<Item = &DirectoryNode> {
        self.children.iter()
    }

    /// Returns the child at position `n`, or `None` once `n` runs past the
    /// last occupied slot.
    pub fn nth_child(&self, n: usize) -> Result<Option<&DirectoryNode>, TreeError> {
        ensure!(!self.is_file(), FileHasNoChildrenSnafu);
        Ok(self.children.get(n))
    }

    /// Checks that one more child could be added without mutating anything.
    pub fn ensure_can_adopt(&self) -> Result<(), TreeError> {
        ensure!(!self.is_file(), CannotAddToFileSnafu);
        ensure!(self.children.len() < MAX_CHILDREN, DirectoryFullSnafu);
        Ok(())
    }

    /// Appends `child` after the existing children.
    pub fn add_child(&mut self, child: DirectoryNode) -> Result<(), TreeError> {
        self.ensure_can_adopt()?;
        self.children.push(child);
        Ok(())
    }

    /// Detaches the child at `index`, shifting later siblings left.
    ///
    /// Returns `None` when this is a file or nothing occupies `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<DirectoryNode> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Position of the first direct child called `target_name`.
    pub fn position_of(&self, target_name: &str) -> Result<usize, TreeError> {
        self.children
            .iter()
            .position(|child| child.name == target_name)
            .context(NoSuchDirectorySnafu { name: target_name })
    }

    /// First direct child called `target_name`, in insertion order.
    pub fn search(&self, target_name: &str) -> Result<&DirectoryNode, TreeError> {
        let index = self.position_of(target_name)?;
        Ok(&self.children[index])
    }

    /// Collects the slash-joined path, starting at this node, of every node in
    /// the subtree named `target_name`, in pre-order.
    pub fn find(&self, target_name: &str) -> Result<Vec<String>, TreeError> {
        let mut matches = Vec::new();
        self.collect_matches(target_name, "", &mut matches);
        ensure!(
            !matches.is_empty(),
            NoSuchDirectorySnafu { name: target_name }
        );
        Ok(matches)
    }

    fn collect_matches(&self, target_name: &str, prefix: &str, matches: &mut Vec<String>) {
        let path = format!("{prefix}{}", self.name);
        if self.name == target_name {
            matches.push(path.clone());
        }
        let child_prefix = format!("{path}/");
        for child in &self.children {
            child.collect_matches(target_name, &child_prefix, matches);
        }
    }

    /// Writes the subtree in pre-order, one node per line.
    pub fn write_tree(&self, out: &mut impl fmt::Write, indent: usize) -> fmt::Result {
        let marker = match self.kind {
            NodeKind::File => "-",
            NodeKind::Directory => "|-",
        };
        writeln!(out, "{:indent$}{marker} {}", "", self.name)?;
        for child in &self.children {
            child.write_tree(out, indent + INDENT_WIDTH)?;
        }
        Ok(())
    }

    pub fn render_tree(&self) -> String {
        let mut rendered = String::new();
        match self.write_tree(&mut rendered, 0) {
            Ok(()) => rendered.truncate(rendered.trim_end_matches('\n').len()),
            Err(err) => warn!("Failed to render tree under '{}': {}", self.name, err),
        }
        rendered
    }

    /// Resolves a slash-separated path whose first segment names this node.
    ///
    /// Returns the child indices leading from this node to the target; an
    /// empty chain means the path named this node itself. When several
    /// same-named children exist, each is tried in order until one completes
    /// the path.
    pub fn follow_path(&self, path: &str) -> Option<Vec<usize>> {
        let mut chain = self.follow_path_reversed(path)?;
        chain.reverse();
        Some(chain)
    }

    fn follow_path_reversed(&self, path: &str) -> Option<Vec<usize>> {
        if self.name == path {
            return Some(Vec::new());
        }
        let (head, rest) = path.split_once('/')?;
        if head != self.name {
            return None;
        }
        self.children.iter().enumerate().find_map(|(index, child)| {
            child.follow_path_reversed(rest).map(|mut chain| {
                chain.push(index);
                chain
            })
        })
    }

    /// Walks a chain of child indices down from this node.
    pub fn descend(&self, chain: &[usize]) -> Option<&DirectoryNode> {
        chain
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub fn descend_mut(&mut self, chain: &[usize]) -> Option<&mut DirectoryNode> {
        chain
            .iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::TreeErrorKind;

    fn sample() -> DirectoryNode {
        let mut docs = DirectoryNode::directory("docs");
        docs.add_child(DirectoryNode::file("readme")).unwrap();
        let mut root = DirectoryNode::directory("root");
        root.add_child(docs).unwrap();
        root.add_child(DirectoryNode::directory("bin")).unwrap();
        root.add_child(DirectoryNode::file("readme")).unwrap();
        root
    }

    #[test]
    fn files_cannot_adopt_children() {
        let mut file = DirectoryNode::file("notes");
        let result = file.add_child(DirectoryNode::file("inner"));
        assert_eq!(result, Err(TreeError::CannotAddToFile));
        assert_eq!(file.child_count(), 0);
        assert_eq!(file.nth_child(0), Err(TreeError::FileHasNoChildren));
    }

    #[test]
    fn eleventh_child_is_rejected() {
        let mut dir = DirectoryNode::directory("full");
        for i in 0..MAX_CHILDREN {
            dir.add_child(DirectoryNode::file(format!("f{i}"))).unwrap();
        }
        let err = dir.add_child(DirectoryNode::file("extra")).unwrap_err();
        assert_eq!(err.kind(), TreeErrorKind::FullDirectory);
        assert_eq!(dir.child_count(), MAX_CHILDREN);
        assert!(dir.search("extra").is_err());
    }

    #[test]
    fn nth_child_reports_end_of_children() {
        let root = sample();
        assert_eq!(root.nth_child(1).unwrap().map(|c| c.name()), Some("bin"));
        assert_eq!(root.nth_child(3).unwrap(), None);
    }

    #[test]
    fn remove_child_compacts_remaining_children() {
        let mut root = sample();
        let removed = root.remove_child(0).unwrap();
        assert_eq!(removed.name(), "docs");
        let names: Vec<_> = root.children().map(|c| c.name()).collect();
        assert_eq!(names, ["bin", "readme"]);
        assert_eq!(root.nth_child(2).unwrap(), None);
    }

    #[test]
    fn remove_child_out_of_range_is_none() {
        let mut root = sample();
        assert!(root.remove_child(7).is_none());
        assert_eq!(root.child_count(), 3);
    }

    #[test]
    fn search_returns_first_match_in_insertion_order() {
        let mut root = DirectoryNode::directory("root");
        root.add_child(DirectoryNode::file("dup")).unwrap();
        root.add_child(DirectoryNode::directory("dup")).unwrap();
        assert!(root.search("dup").unwrap().is_file());
        assert_eq!(
            root.search("missing"),
            Err(TreeError::NoSuchDirectory {
                name: "missing".into()
            })
        );
    }

    #[test]
    fn find_lists_every_match_in_preorder() {
        let root = sample();
        assert_eq!(
            root.find("readme").unwrap(),
            ["root/docs/readme", "root/readme"]
        );
        assert_eq!(root.find("root").unwrap(), ["root"]);
        assert_eq!(
            root.find("ghost").unwrap_err().kind(),
            TreeErrorKind::NotADirectory
        );
    }

    #[test]
    fn render_tree_indents_four_spaces_per_level() {
        let root = sample();
        assert_eq!(
            root.render_tree(),
            "|- root\n    |- docs\n        - readme\n    |- bin\n    - readme"
        );
    }

    #[test]
    fn follow_path_matches_own_name_first() {
        let root = sample();
        assert_eq!(root.follow_path("root"), Some(vec![]));
        assert_eq!(root.follow_path("root/docs/readme"), Some(vec![0, 0]));
        assert_eq!(root.follow_path("root/readme"), Some(vec![2]));
        assert_eq!(root.follow_path("docs/readme"), None);
        assert_eq!(root.follow_path("root/nothing"), None);
        assert_eq!(root.follow_path("root/"), None);
    }

    #[test]
    fn follow_path_backtracks_over_same_named_siblings() {
        let mut first = DirectoryNode::directory("a");
        first.add_child(DirectoryNode::file("x")).unwrap();
        let mut second = DirectoryNode::directory("a");
        second.add_child(DirectoryNode::file("y")).unwrap();
        let mut root = DirectoryNode::directory("root");
        root.add_child(first).unwrap();
        root.add_child(second).unwrap();

        assert_eq!(root.follow_path("root/a/y"), Some(vec![1, 0]));
    }

    #[test]
    fn set_name_renames_node() {
        let mut node = DirectoryNode::directory("old");
        node.set_name("new");
        assert_eq!(node.name(), "new");
        assert_eq!(node.kind(), NodeKind::Directory);
    }

    #[test]
    fn descend_follows_index_chain() {
        let root = sample();
        assert_eq!(root.descend(&[0, 0]).map(|n| n.name()), Some("readme"));
        assert!(root.descend(&[5]).is_none());
        assert!(root.descend(&[2, 0]).is_none());
    }
}
