// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Driver feeding a [`ResultTree`] into a [`Writer`].

use std::time::Duration;

use derive_more::{Deref, DerefMut};
use tracing::{debug, trace};

use crate::{
    error::WriterResult,
    tree::{ExampleRef, GroupRef, NodeRef, Outcome, ResultTree},
    writer::{RunSummary, Writer},
};

/// Replays an already executed [`ResultTree`] as a sequence of [`Writer`]
/// events, keeping the totals of the run.
///
/// Nodes are walked depth-first in declaration order. Root-level examples
/// are reported too, without any enclosing group events.
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Reporter<W> {
    /// Wrapped [`Writer`].
    #[deref]
    #[deref_mut]
    writer: W,

    /// Totals of the reported examples so far.
    summary: RunSummary,
}

impl<W: Writer> Reporter<W> {
    /// Wraps the given [`Writer`] into a new [`Reporter`].
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, summary: RunSummary::default() }
    }

    /// Returns the totals of the examples reported by the last (or the
    /// ongoing) [`Reporter::run()`].
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Unwraps this [`Reporter`] into the wrapped [`Writer`].
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Reports the whole `tree`: events of all its nodes, then the summary,
    /// the failures and the end of the run.
    ///
    /// Totals are counted afresh on every call.
    ///
    /// The run duration is the sum of the root-level nodes ones.
    ///
    /// # Errors
    ///
    /// If the [`Writer`] fails to write its output.
    pub fn run(&mut self, tree: &ResultTree) -> WriterResult<RunSummary> {
        self.summary = RunSummary::default();

        let mut failed = vec![];
        for &id in tree.roots() {
            self.node(tree.node(id), &mut failed)?;
        }
        self.summary.duration = tree
            .roots()
            .iter()
            .map(|&id| match tree.node(id) {
                NodeRef::Example(e) => e.elapsed,
                NodeRef::Group(g) => g.elapsed(),
            })
            .sum::<Duration>();

        let summary = self.summary;
        debug!(
            examples = summary.examples,
            failed = summary.failed,
            pending = summary.pending,
            "run reported",
        );
        self.writer.summary(&summary)?;
        self.writer.failures(&failed)?;
        self.writer.finished()?;
        Ok(summary)
    }

    fn node<'t>(
        &mut self,
        node: NodeRef<'t>,
        failed: &mut Vec<ExampleRef<'t>>,
    ) -> WriterResult<()> {
        match node {
            NodeRef::Example(example) => self.example(example, failed),
            NodeRef::Group(group) => self.group(group, failed),
        }
    }

    fn group<'t>(
        &mut self,
        group: GroupRef<'t>,
        failed: &mut Vec<ExampleRef<'t>>,
    ) -> WriterResult<()> {
        trace!(group = %group.name, pending = group.pending, "reporting group");

        if group.pending {
            self.writer.example_group_pending(group)?;
        } else {
            self.writer.example_group_started(group)?;
        }
        for child in group.iter() {
            self.node(child, failed)?;
        }
        if !group.pending {
            self.writer.example_group_finished(group)?;
        }
        Ok(())
    }

    fn example<'t>(
        &mut self,
        example: ExampleRef<'t>,
        failed: &mut Vec<ExampleRef<'t>>,
    ) -> WriterResult<()> {
        trace!(example = %example.name, "reporting example");

        self.summary.examples += 1;
        match &example.outcome {
            Outcome::Passed => {
                self.writer.example_started(example)?;
                self.writer.example_passed(example)?;
            }
            Outcome::Failed(_) => {
                self.summary.failed += 1;
                failed.push(example);
                self.writer.example_started(example)?;
                self.writer.example_failed(example)?;
            }
            Outcome::Pending => {
                self.summary.pending += 1;
                self.writer.example_pending(example)?;
            }
        }
        Ok(())
    }
}
