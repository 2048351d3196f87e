// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compact single-character-per-example [`Writer`] implementation.

use std::io;

use derive_more::{Deref, DerefMut};

use crate::{
    cli::Settings,
    error::WriterResult,
    tree::ExampleRef,
    writer::{
        common,
        out::{Styles, WriteStrExt as _},
        RunSummary, Writer,
    },
};

/// [`Writer`] outputting a single character per [`Example`]: `.` for passed,
/// `F` for failed and `*` for pending ones.
///
/// [`ExampleGroup`]s aren't outputted at all. The summary and failures are
/// the same as the ones of a [`Documentation`] [`Writer`].
///
/// [`Documentation`]: crate::writer::Documentation
/// [`Example`]: crate::tree::Example
/// [`ExampleGroup`]: crate::tree::ExampleGroup
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Progress<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    #[deref]
    #[deref_mut]
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,
}

impl Progress {
    /// Creates a new [`Progress`] [`Writer`] outputting to [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Settings::for_stdout())
    }
}

impl<Out: io::Write> Progress<Out> {
    /// Creates a new [`Progress`] [`Writer`] outputting to the given
    /// `output`.
    #[must_use]
    pub fn new(output: Out, settings: Settings) -> Self {
        Self { output, styles: Styles::from_settings(&settings) }
    }

    /// Returns the `output` of this [`Writer`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    /// Outputs a single `mark` without a newline.
    fn mark(&mut self, mark: &str) -> io::Result<()> {
        self.output.write_str(mark)?;
        self.output.flush()
    }
}

impl<Out: io::Write> Writer for Progress<Out> {
    fn example_passed(&mut self, _: ExampleRef<'_>) -> WriterResult<()> {
        let mark = self.styles.ok(".");
        Ok(self.mark(&mark)?)
    }

    fn example_failed(&mut self, _: ExampleRef<'_>) -> WriterResult<()> {
        let mark = self.styles.err("F");
        Ok(self.mark(&mark)?)
    }

    fn example_pending(&mut self, _: ExampleRef<'_>) -> WriterResult<()> {
        let mark = self.styles.pending("*");
        Ok(self.mark(&mark)?)
    }

    fn summary(&mut self, summary: &RunSummary) -> WriterResult<()> {
        self.output.write_line("")?;
        self.output.write_line("")?;
        let line = common::format_summary(&self.styles, summary);
        Ok(self.output.write_line(line)?)
    }

    fn failures(&mut self, failed: &[ExampleRef<'_>]) -> WriterResult<()> {
        Ok(common::write_failures(&mut self.output, &self.styles, failed)?)
    }

    fn finished(&mut self) -> WriterResult<()> {
        Ok(self.output.flush()?)
    }
}
