// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [JUnit XML report][1] [`Writer`] implementation.
//!
//! The produced report has the following shape:
//!
//! ```xml
//! <testsuites name="mamba" tests="2" failures="0" disabled="1" time="0.1200">
//!   <testsuite name="Calculator" tests="1" time="0.1200">
//!     <testcase name="it_adds"/>
//!   </testsuite>
//! </testsuites>
//! ```
//!
//! [1]: https://llg.cubic.org/docs/junit

pub mod document;

use std::{io, time::Duration};

use tracing::{debug, trace};

use crate::{
    error::WriterResult,
    tree::{ExampleRef, GroupRef},
    writer::{RunSummary, Writer},
};

pub use self::document::Element;

/// Value of the `name` attribute of the root `testsuites` element.
pub const REPORT_NAME: &str = "mamba";

/// Formats the given `duration` as seconds with 4 decimal places.
#[must_use]
pub fn format_time(duration: Duration) -> String {
    format!("{:.4}", duration.as_secs_f64())
}

/// `testsuite` being currently filled with `testcase`s.
#[derive(Clone, Copy, Debug)]
struct OpenSuite {
    /// Index of the `testsuite` element among the root's children.
    index: usize,

    /// Number of `testcase`s added so far.
    tests: usize,
}

/// [JUnit XML report][1] [`Writer`] implementation outputting XML to an
/// [`io::Write`] implementor.
///
/// Every [`ExampleGroup`] becomes a `testsuite` directly under the root,
/// whatever its nesting is. Root totals are the ones given to
/// [`Writer::summary()`], and are never recounted from the document.
///
/// The report is written into the output on [`Writer::finished()`].
///
/// [`ExampleGroup`]: crate::tree::ExampleGroup
/// [1]: https://llg.cubic.org/docs/junit
#[derive(Clone, Debug)]
pub struct XUnit<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to output XML report into.
    output: Out,

    /// Root `testsuites` element.
    root: Element,

    /// Started and not yet finished `testsuite`s, innermost last.
    open: Vec<OpenSuite>,
}

impl XUnit {
    /// Creates a new [`XUnit`] [`Writer`] outputting XML report into
    /// [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<Out: io::Write> XUnit<Out> {
    /// Creates a new [`XUnit`] [`Writer`] outputting XML report into the
    /// given `output`.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self {
            output,
            root: Element::new("testsuites").with("name", REPORT_NAME),
            open: vec![],
        }
    }

    /// Returns the report built so far.
    #[must_use]
    pub const fn document(&self) -> &Element {
        &self.root
    }

    /// Returns the `output` of this [`Writer`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }
}

impl<Out: io::Write> Writer for XUnit<Out> {
    fn example_started(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        let Some(suite) = self.open.last_mut() else {
            trace!(example = %example.name, "example outside of any testsuite");
            return Ok(());
        };
        suite.tests += 1;

        if let Some(el) = self.root.child_mut(suite.index) {
            _ = el.push(Element::new("testcase").with("name", example.name.as_str()));
        }
        Ok(())
    }

    fn example_group_started(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        let index = self
            .root
            .push(Element::new("testsuite").with("name", group.subject()));
        self.open.push(OpenSuite { index, tests: 0 });
        trace!(suite = group.subject(), index, "testsuite opened");
        Ok(())
    }

    fn example_group_finished(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        let Some(OpenSuite { index, tests }) = self.open.pop() else {
            trace!(suite = group.subject(), "no testsuite to close");
            return Ok(());
        };

        if let Some(el) = self.root.child_mut(index) {
            el.set("tests", tests.to_string());
            el.set("time", format_time(group.elapsed()));
        }
        trace!(suite = group.subject(), tests, "testsuite closed");
        Ok(())
    }

    fn summary(&mut self, summary: &RunSummary) -> WriterResult<()> {
        self.root.set("tests", summary.examples.to_string());
        self.root.set("failures", summary.failed.to_string());
        self.root.set("disabled", summary.pending.to_string());
        self.root.set("time", format_time(summary.duration));
        Ok(())
    }

    fn finished(&mut self) -> WriterResult<()> {
        debug!(suites = self.root.children().len(), "writing xUnit report");
        self.root.write_document(&mut self.output)?;
        Ok(self.output.flush()?)
    }
}
