// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core trait of test run output writers.

use std::time::Duration;

use crate::{
    error::WriterResult,
    tree::{ExampleRef, GroupRef},
};

/// Totals of a whole test run, computed by the caller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Time the whole run took.
    pub duration: Duration,

    /// Number of executed [`Example`]s, including failed and pending ones.
    ///
    /// [`Example`]: crate::tree::Example
    pub examples: usize,

    /// Number of failed [`Example`]s.
    ///
    /// [`Example`]: crate::tree::Example
    pub failed: usize,

    /// Number of pending [`Example`]s.
    ///
    /// [`Example`]: crate::tree::Example
    pub pending: usize,
}

impl RunSummary {
    /// Creates a new [`RunSummary`].
    #[must_use]
    pub const fn new(
        duration: Duration,
        examples: usize,
        failed: usize,
        pending: usize,
    ) -> Self {
        Self { duration, examples, failed, pending }
    }
}

/// Writer of test run events to some output.
///
/// A [`Reporter`] (or any other driver) calls these methods strictly
/// sequentially, in the order nodes of a [`ResultTree`] are walked:
///
/// 1. [`example_group_started()`] (or [`example_group_pending()`]);
/// 2. events of every child, recursively;
/// 3. [`example_group_finished()`] (not called for pending groups);
///
/// and then, once for the whole run, [`summary()`], [`failures()`] and
/// [`finished()`].
///
/// Every method does nothing by default, so implementors override only the
/// events they render. Errors are the ones of the underlying output, and
/// should abort the reporting.
///
/// [`Reporter`]: crate::Reporter
/// [`ResultTree`]: crate::tree::ResultTree
/// [`example_group_finished()`]: Writer::example_group_finished
/// [`example_group_pending()`]: Writer::example_group_pending
/// [`example_group_started()`]: Writer::example_group_started
/// [`failures()`]: Writer::failures
/// [`finished()`]: Writer::finished
/// [`summary()`]: Writer::summary
pub trait Writer {
    /// Handles the given non-pending [`Example`] being started.
    ///
    /// [`Example`]: crate::tree::Example
    fn example_started(&mut self, _example: ExampleRef<'_>) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the given [`Example`] having passed.
    ///
    /// [`Example`]: crate::tree::Example
    fn example_passed(&mut self, _example: ExampleRef<'_>) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the given [`Example`] having failed.
    ///
    /// [`Example`]: crate::tree::Example
    fn example_failed(&mut self, _example: ExampleRef<'_>) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the given [`Example`] being pending.
    ///
    /// [`Example`]: crate::tree::Example
    fn example_pending(&mut self, _example: ExampleRef<'_>) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the given [`ExampleGroup`] being started.
    ///
    /// [`ExampleGroup`]: crate::tree::ExampleGroup
    fn example_group_started(
        &mut self,
        _group: GroupRef<'_>,
    ) -> WriterResult<()> {
        Ok(())
    }

    /// Handles all the children of the given [`ExampleGroup`] having
    /// finished.
    ///
    /// [`ExampleGroup`]: crate::tree::ExampleGroup
    fn example_group_finished(
        &mut self,
        _group: GroupRef<'_>,
    ) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the given [`ExampleGroup`] being pending.
    ///
    /// [`ExampleGroup`]: crate::tree::ExampleGroup
    fn example_group_pending(
        &mut self,
        _group: GroupRef<'_>,
    ) -> WriterResult<()> {
        Ok(())
    }

    /// Handles totals of the whole run.
    fn summary(&mut self, _summary: &RunSummary) -> WriterResult<()> {
        Ok(())
    }

    /// Handles all the failed [`Example`]s of the run, in the order they
    /// were executed.
    ///
    /// [`Example`]: crate::tree::Example
    fn failures(&mut self, _failed: &[ExampleRef<'_>]) -> WriterResult<()> {
        Ok(())
    }

    /// Handles the run being completely reported.
    fn finished(&mut self) -> WriterResult<()> {
        Ok(())
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    fn example_started(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        (**self).example_started(example)
    }

    fn example_passed(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        (**self).example_passed(example)
    }

    fn example_failed(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        (**self).example_failed(example)
    }

    fn example_pending(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        (**self).example_pending(example)
    }

    fn example_group_started(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        (**self).example_group_started(group)
    }

    fn example_group_finished(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        (**self).example_group_finished(group)
    }

    fn example_group_pending(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        (**self).example_group_pending(group)
    }

    fn summary(&mut self, summary: &RunSummary) -> WriterResult<()> {
        (**self).summary(summary)
    }

    fn failures(&mut self, failed: &[ExampleRef<'_>]) -> WriterResult<()> {
        (**self).failures(failed)
    }

    fn finished(&mut self) -> WriterResult<()> {
        (**self).finished()
    }
}
