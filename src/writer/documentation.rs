// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Verbose tree-like [`Writer`] implementation.

use std::{borrow::Cow, io, time::Duration};

use derive_more::{Deref, DerefMut};

use crate::{
    cli::Settings,
    error::WriterResult,
    tree::{ExampleRef, GroupRef},
    writer::{
        common::{self, INDENT},
        out::{Color, Styles, WriteStrExt as _},
        RunSummary, Writer,
    },
};

/// Number of thresholds after which a slow example is highlighted as an
/// error.
const VERY_SLOW_FACTOR: u32 = 5;

/// [`Writer`] outputting every [`ExampleGroup`] and [`Example`] on its own
/// line, indented according to its nesting.
///
/// ```text
/// Calculator
///   when adding
///     ✓ it returns the sum
///     ✗ it handles overflow (0.5000 seconds)
///       expected 0 to equal 256
/// ```
///
/// [`Example`]: crate::tree::Example
/// [`ExampleGroup`]: crate::tree::ExampleGroup
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct Documentation<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    #[deref]
    #[deref_mut]
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,

    /// Duration above which an example is reported as slow.
    slow_test_threshold: Duration,
}

impl Documentation {
    /// Creates a new [`Documentation`] [`Writer`] outputting to
    /// [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Settings::for_stdout())
    }
}

impl<Out: io::Write> Documentation<Out> {
    /// Creates a new [`Documentation`] [`Writer`] outputting to the given
    /// `output`.
    #[must_use]
    pub fn new(output: Out, settings: Settings) -> Self {
        Self {
            output,
            styles: Styles::from_settings(&settings),
            slow_test_threshold: settings.slow_test_threshold,
        }
    }

    /// Returns the `output` of this [`Writer`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    /// Outputs the given `example` line, prefixed with the `glyph`.
    fn write_example(
        &mut self,
        glyph: Cow<'_, str>,
        example: &ExampleRef<'_>,
    ) -> io::Result<()> {
        let line = format!(
            "{}{glyph} {}{}",
            INDENT.repeat(example.depth()),
            example.display_name(),
            self.format_slow(example.elapsed),
        );
        self.output.write_line(line)
    }

    /// Outputs the given `group` line, painted with the given [`Color`].
    fn write_group(
        &mut self,
        group: &GroupRef<'_>,
        color: Color,
    ) -> io::Result<()> {
        let line = format!(
            "{}{}",
            INDENT.repeat(group.depth()),
            self.styles.paint(color, group.name.as_str()),
        );
        self.output.write_line(line)
    }

    /// Formats the `elapsed` time of an example, if it exceeds the slow-test
    /// threshold.
    fn format_slow(&self, elapsed: Duration) -> Cow<'static, str> {
        let threshold = self.slow_test_threshold;
        if elapsed <= threshold {
            return "".into();
        }

        let color = if elapsed > threshold * VERY_SLOW_FACTOR {
            Color::Red
        } else {
            Color::Yellow
        };
        self.styles
            .paint(color, format!(" ({})", common::format_duration(elapsed)))
    }
}

impl<Out: io::Write> Writer for Documentation<Out> {
    fn example_passed(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        let glyph = self.styles.ok("✓");
        Ok(self.write_example(glyph, &example)?)
    }

    fn example_failed(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        let glyph = self.styles.err("✗");
        self.write_example(glyph, &example)?;

        if let Some(failure) = example.outcome.failure() {
            let message = common::format_lines(
                &self.styles,
                Color::Red,
                &failure.message,
                (example.depth() + 1) * INDENT.len(),
            );
            self.output.write_line(message)?;
        }
        Ok(())
    }

    fn example_pending(&mut self, example: ExampleRef<'_>) -> WriterResult<()> {
        let glyph = self.styles.pending("✗");
        Ok(self.write_example(glyph, &example)?)
    }

    fn example_group_started(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        Ok(self.write_group(&group, Color::White)?)
    }

    fn example_group_finished(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        if group.is_root() {
            self.output.write_line("")?;
        }
        Ok(())
    }

    fn example_group_pending(
        &mut self,
        group: GroupRef<'_>,
    ) -> WriterResult<()> {
        Ok(self.write_group(&group, Color::Yellow)?)
    }

    fn summary(&mut self, summary: &RunSummary) -> WriterResult<()> {
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
