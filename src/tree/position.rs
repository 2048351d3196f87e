// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Position of a node inside a [`ResultTree`].
//!
//! Everything here is recomputed from parent links on every call.

use std::{borrow::Cow, iter};

use itertools::Itertools as _;

use super::{GroupRef, NodeId, ResultTree};

/// Separator of words in declared names.
const WORD_SEPARATOR: char = '_';

/// [`Iterator`] over ancestors of a node, from its parent up to the root.
#[derive(Clone, Debug)]
pub struct Ancestors<'t> {
    tree: &'t ResultTree,
    next: Option<NodeId>,
}

impl<'t> Ancestors<'t> {
    /// Creates new [`Ancestors`] of the node with the given `id`.
    #[must_use]
    pub fn of(tree: &'t ResultTree, id: NodeId) -> Self {
        Self { tree, next: tree.get(id).parent_id() }
    }
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = GroupRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.tree.group(self.next?);
        self.next = group.parent_id();
        Some(group)
    }
}

/// Returns number of [`ExampleGroup`]s enclosing the node with the given
/// `id`.
///
/// [`ExampleGroup`]: super::ExampleGroup
#[must_use]
pub fn depth(tree: &ResultTree, id: NodeId) -> usize {
    Ancestors::of(tree, id).count()
}

/// Replaces word separators of the given declared `name` with spaces.
#[must_use]
pub fn display_name(name: &str) -> Cow<'_, str> {
    if name.contains(WORD_SEPARATOR) {
        name.replace(WORD_SEPARATOR, " ").into()
    } else {
        name.into()
    }
}

/// Returns display names of the node with the given `id` and all its
/// ancestors, root first, joined with spaces.
#[must_use]
pub fn full_name(tree: &ResultTree, id: NodeId) -> String {
    let mut segments = iter::once(display_name(tree.get(id).name()))
        .chain(Ancestors::of(tree, id).map(|g| display_name(&g.group.name)))
        .collect::<Vec<_>>();
    segments.reverse();
    segments.into_iter().join(" ")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::tree::Outcome;

    #[test]
    fn root_level_nodes_have_zero_depth() {
        let mut tree = ResultTree::new();
        let group = tree.add_group(None, "group");
        let example =
            tree.add_example(None, "lonely", Duration::ZERO, Outcome::Passed);

        assert_eq!(depth(&tree, group), 0);
        assert_eq!(depth(&tree, example), 0);
    }

    #[test]
    fn child_is_one_level_deeper_than_parent() {
        let mut tree = ResultTree::new();
        let mut parent = tree.add_group(None, "level_0");
        for level in 1..6 {
            let child = tree.add_group(Some(parent), format!("level_{level}"));

            assert_eq!(depth(&tree, child), depth(&tree, parent) + 1);
            parent = child;
        }
        let leaf =
            tree.add_example(Some(parent), "leaf", Duration::ZERO, Outcome::Passed);

        assert_eq!(depth(&tree, leaf), 6);
    }

    #[test]
    fn ancestors_go_from_parent_to_root() {
        let mut tree = ResultTree::new();
        let outer = tree.add_group(None, "outer");
        let inner = tree.add_group(Some(outer), "inner");
        let leaf =
            tree.add_example(Some(inner), "leaf", Duration::ZERO, Outcome::Passed);

        let ids = Ancestors::of(&tree, leaf).map(|g| g.id()).collect::<Vec<_>>();

        assert_eq!(ids, [inner, outer]);
        assert_eq!(Ancestors::of(&tree, outer).count(), 0);
    }

    #[test]
    fn full_name_joins_normalized_segments_root_first() {
        let mut tree = ResultTree::new();
        let outer = tree.add_group(None, "Shopping_cart");
        let inner = tree.add_group(Some(outer), "when_empty");
        let leaf = tree.add_example(
            Some(inner),
            "it_has_zero_total",
            Duration::ZERO,
            Outcome::Passed,
        );

        assert_eq!(
            full_name(&tree, leaf),
            "Shopping cart when empty it has zero total",
        );
        assert_eq!(full_name(&tree, inner), "Shopping cart when empty");
        assert_eq!(full_name(&tree, outer), "Shopping cart");
    }

    #[test]
    fn display_name_borrows_when_nothing_to_replace() {
        assert!(matches!(display_name("plain name"), Cow::Borrowed(_)));
        assert_eq!(display_name("it__works_"), "it  works ");
    }
}
