// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tree of already executed [`Example`]s and [`ExampleGroup`]s.
//!
//! The [`ResultTree`] owns every node in a flat arena. Groups refer to their
//! children by [`NodeId`], and every node refers to its parent the same way,
//! so there are no ownership cycles between parents and children.
//!
//! [`Writer`]s never see the arena directly, but rather borrowed views
//! ([`ExampleRef`], [`GroupRef`]) able to walk up their ancestors.
//!
//! [`Writer`]: crate::Writer

mod position;

use std::{fmt, time::Duration};

use derive_more::{Deref, Display};

pub use self::position::{depth, display_name, full_name, Ancestors};

/// Index of a node inside a [`ResultTree`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct NodeId(usize);

/// Outcome of an executed [`Example`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// [`Example`] passed.
    Passed,

    /// [`Example`] failed with the given [`Failure`].
    Failed(Failure),

    /// [`Example`] was marked as not runnable yet.
    Pending,
}

impl Outcome {
    /// Creates a new [`Outcome::Failed`] from the given `message` and
    /// `traceback` frames.
    #[must_use]
    pub fn failed<F>(message: impl Into<String>, traceback: F) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self::Failed(Failure::new(message, traceback))
    }

    /// Returns the [`Failure`] of this [`Outcome`], if it failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(f) => Some(f),
            Self::Passed | Self::Pending => None,
        }
    }

    /// Indicates whether this [`Outcome`] is [`Outcome::Pending`].
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Captured error of a failed [`Example`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure {
    /// Message of the failed expectation.
    pub message: String,

    /// Call-stack frames, outermost first.
    ///
    /// Every frame is expected to be already rendered the way the runner
    /// prints it: two characters of indentation followed by the frame text
    /// and a trailing newline.
    pub traceback: Vec<String>,
}

impl Failure {
    /// Creates a new [`Failure`].
    #[must_use]
    pub fn new<F>(message: impl Into<String>, traceback: F) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            message: message.into(),
            traceback: traceback.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Single executed test case (leaf node of a [`ResultTree`]).
#[derive(Clone, Debug)]
pub struct Example {
    /// Name of this [`Example`] as declared, with `_` word separators.
    pub name: String,

    /// Time this [`Example`] took to run.
    pub elapsed: Duration,

    /// [`Outcome`] of running this [`Example`].
    pub outcome: Outcome,

    parent: Option<NodeId>,
}

impl Example {
    /// Returns the [`NodeId`] of the [`ExampleGroup`] this [`Example`]
    /// belongs to.
    #[must_use]
    pub const fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Named collection of [`Example`]s and nested [`ExampleGroup`]s.
#[derive(Clone, Debug)]
pub struct ExampleGroup {
    /// Description of this [`ExampleGroup`].
    pub name: String,

    /// Described subject, if it differs from the [`ExampleGroup::name`].
    pub subject: Option<String>,

    /// Indicator whether this [`ExampleGroup`] is pending.
    pub pending: bool,

    elapsed: Option<Duration>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl ExampleGroup {
    /// Returns the described subject of this [`ExampleGroup`], falling back
    /// to its [`ExampleGroup::name`].
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(&self.name)
    }

    /// Returns time all the children of this [`ExampleGroup`] took to run.
    ///
    /// Zero until [`ResultTree::finish_group()`] is called.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_default()
    }

    /// Indicates whether [`ResultTree::finish_group()`] was called for
    /// this [`ExampleGroup`].
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Returns children of this [`ExampleGroup`] in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the [`NodeId`] of the enclosing [`ExampleGroup`].
    #[must_use]
    pub const fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Node of a [`ResultTree`].
#[derive(Clone, Debug)]
pub enum Node {
    /// Leaf node.
    Example(Example),

    /// Internal node.
    Group(ExampleGroup),
}

impl Node {
    /// Returns the declared name of this [`Node`].
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Example(e) => &e.name,
            Self::Group(g) => &g.name,
        }
    }

    /// Returns the [`NodeId`] of the parent of this [`Node`].
    #[must_use]
    pub const fn parent_id(&self) -> Option<NodeId> {
        match self {
            Self::Example(e) => e.parent,
            Self::Group(g) => g.parent,
        }
    }
}

/// Arena of executed [`Example`]s and [`ExampleGroup`]s.
///
/// Nodes can only be appended, and only under already existing groups, so a
/// [`ResultTree`] is acyclic by construction.
#[derive(Clone, Debug, Default)]
pub struct ResultTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl ResultTree {
    /// Creates a new empty [`ResultTree`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new [`ExampleGroup`] under the given `parent` (or at the root
    /// level if [`None`]).
    ///
    /// # Panics
    ///
    /// If `parent` doesn't refer to an [`ExampleGroup`] of this tree.
    pub fn add_group(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
    ) -> NodeId {
        self.push_group(parent, name.into(), None, false)
    }

    /// Adds a new [`ExampleGroup`] describing the given `subject`.
    ///
    /// # Panics
    ///
    /// If `parent` doesn't refer to an [`ExampleGroup`] of this tree.
    pub fn add_group_with_subject(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        subject: impl Into<String>,
    ) -> NodeId {
        self.push_group(parent, name.into(), Some(subject.into()), false)
    }

    /// Adds a new pending [`ExampleGroup`].
    ///
    /// # Panics
    ///
    /// If `parent` doesn't refer to an [`ExampleGroup`] of this tree.
    pub fn add_pending_group(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
    ) -> NodeId {
        self.push_group(parent, name.into(), None, true)
    }

    /// Adds a new executed [`Example`] under the given `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` doesn't refer to an [`ExampleGroup`] of this tree.
    pub fn add_example(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        elapsed: Duration,
        outcome: Outcome,
    ) -> NodeId {
        self.push(Node::Example(Example {
            name: name.into(),
            elapsed,
            outcome,
            parent,
        }))
    }

    /// Records the time all the children of the given [`ExampleGroup`] took
    /// to run.
    ///
    /// # Panics
    ///
    /// If `id` doesn't refer to an [`ExampleGroup`], or the group has been
    /// finished already.
    pub fn finish_group(&mut self, id: NodeId, elapsed: Duration) {
        let group = self.group_mut(id);
        assert!(
            group.elapsed.is_none(),
            "`ExampleGroup` \"{}\" is finished twice",
            group.name,
        );
        group.elapsed = Some(elapsed);
    }

    /// Returns root-level nodes in declaration order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns total number of nodes in this [`ResultTree`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indicates whether this [`ResultTree`] has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the [`Node`] with the given `id`.
    ///
    /// # Panics
    ///
    /// If `id` doesn't belong to this [`ResultTree`].
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        match self.get(id) {
            Node::Example(example) => {
                NodeRef::Example(ExampleRef { tree: self, id, example })
            }
            Node::Group(group) => {
                NodeRef::Group(GroupRef { tree: self, id, group })
            }
        }
    }

    /// Returns a view of the [`Example`] with the given `id`.
    ///
    /// # Panics
    ///
    /// If `id` doesn't refer to an [`Example`] of this tree.
    #[must_use]
    pub fn example(&self, id: NodeId) -> ExampleRef<'_> {
        match self.node(id) {
            NodeRef::Example(e) => e,
            NodeRef::Group(g) => {
                panic!("node {id} is `ExampleGroup` \"{}\", not `Example`", g.name)
            }
        }
    }

    /// Returns a view of the [`ExampleGroup`] with the given `id`.
    ///
    /// # Panics
    ///
    /// If `id` doesn't refer to an [`ExampleGroup`] of this tree.
    #[must_use]
    pub fn group(&self, id: NodeId) -> GroupRef<'_> {
        match self.node(id) {
            NodeRef::Group(g) => g,
            NodeRef::Example(e) => {
                panic!("node {id} is `Example` \"{}\", not `ExampleGroup`", e.name)
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id.0).unwrap_or_else(|| {
            panic!("node {id} doesn't belong to this `ResultTree`")
        })
    }

    fn group_mut(&mut self, id: NodeId) -> &mut ExampleGroup {
        match self.nodes.get_mut(id.0) {
            Some(Node::Group(g)) => g,
            Some(Node::Example(e)) => {
                panic!("node {id} is `Example` \"{}\", not `ExampleGroup`", e.name)
            }
            None => panic!("node {id} doesn't belong to this `ResultTree`"),
        }
    }

    fn push_group(
        &mut self,
        parent: Option<NodeId>,
        name: String,
        subject: Option<String>,
        pending: bool,
    ) -> NodeId {
        self.push(Node::Group(ExampleGroup {
            name,
            subject,
            pending,
            elapsed: None,
            children: vec![],
            parent,
        }))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        match node.parent_id() {
            Some(parent) => self.group_mut(parent).children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }
}

/// Borrowed view of an [`Example`] inside its [`ResultTree`].
#[derive(Clone, Copy, Debug, Deref)]
pub struct ExampleRef<'t> {
    tree: &'t ResultTree,
    id: NodeId,
    #[deref(forward)]
    example: &'t Example,
}

impl<'t> ExampleRef<'t> {
    /// Returns the [`NodeId`] of this [`Example`].
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the [`ResultTree`] this [`Example`] belongs to.
    #[must_use]
    pub const fn tree(&self) -> &'t ResultTree {
        self.tree
    }

    /// Returns the enclosing [`ExampleGroup`].
    #[must_use]
    pub fn parent(&self) -> Option<GroupRef<'t>> {
        self.example.parent.map(|id| self.tree.group(id))
    }

    /// Returns number of [`ExampleGroup`]s enclosing this [`Example`].
    #[must_use]
    pub fn depth(&self) -> usize {
        depth(self.tree, self.id)
    }

    /// Returns the name of this [`Example`] prefixed with names of all its
    /// ancestors.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(self.tree, self.id)
    }

    /// Returns the name of this [`Example`] with word separators replaced by
    /// spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.example.name).into_owned()
    }
}

/// Borrowed view of an [`ExampleGroup`] inside its [`ResultTree`].
#[derive(Clone, Copy, Debug, Deref)]
pub struct GroupRef<'t> {
    tree: &'t ResultTree,
    id: NodeId,
    #[deref(forward)]
    group: &'t ExampleGroup,
}

impl<'t> GroupRef<'t> {
    /// Returns the [`NodeId`] of this [`ExampleGroup`].
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the [`ResultTree`] this [`ExampleGroup`] belongs to.
    #[must_use]
    pub const fn tree(&self) -> &'t ResultTree {
        self.tree
    }

    /// Returns the enclosing [`ExampleGroup`].
    #[must_use]
    pub fn parent(&self) -> Option<GroupRef<'t>> {
        self.group.parent.map(|id| self.tree.group(id))
    }

    /// Indicates whether this [`ExampleGroup`] is a root-level one.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.group.parent.is_none()
    }

    /// Returns number of [`ExampleGroup`]s enclosing this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        depth(self.tree, self.id)
    }

    /// Returns the name of this [`ExampleGroup`] prefixed with names of all
    /// its ancestors.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(self.tree, self.id)
    }

    /// Iterates over children of this [`ExampleGroup`].
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let (tree, group) = (self.tree, self.group);
        group.children.iter().map(move |&id| tree.node(id))
    }
}

/// Borrowed view of any [`Node`] inside its [`ResultTree`].
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'t> {
    /// [`Example`] view.
    Example(ExampleRef<'t>),

    /// [`ExampleGroup`] view.
    Group(GroupRef<'t>),
}

impl NodeRef<'_> {
    /// Returns the [`NodeId`] of this [`Node`].
    #[must_use]
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Example(e) => e.id,
            Self::Group(g) => g.id,
        }
    }
}
