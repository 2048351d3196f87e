// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Formatting shared by console [`Writer`]s.
//!
//! [`Writer`]: crate::Writer

use std::{borrow::Cow, io, time::Duration};

use itertools::Itertools as _;

use crate::{
    tree::{ExampleRef, Failure},
    writer::{
        out::{Color, Styles, WriteStrExt as _},
        RunSummary,
    },
};

/// Indentation of a single nesting level.
pub(crate) const INDENT: &str = "  ";

/// Formats the given `duration` as seconds with 4 decimal places.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.4} seconds", duration.as_secs_f64())
}

/// Formats the final line of a run, colored according to its outcome.
#[must_use]
pub fn format_summary(styles: &Styles, summary: &RunSummary) -> Cow<'static, str> {
    let RunSummary { duration, examples, failed, pending } = *summary;
    let duration = format_duration(duration);

    if failed != 0 {
        styles.err(format!(
            "{failed} examples failed of {examples} ran in {duration}",
        ))
    } else if pending != 0 {
        styles.pending(format!(
            "{examples} examples ran ({pending} pending) in {duration}",
        ))
    } else {
        styles.ok(format!("{examples} examples ran in {duration}"))
    }
}

/// Formats the captured traceback of the given [`Failure`].
///
/// The outermost frame belongs to the runner itself, so is omitted, and the
/// leading indentation of every other frame is stripped.
#[must_use]
pub fn format_traceback(failure: &Failure) -> String {
    failure
        .traceback
        .iter()
        .skip(1)
        .map(|frame| frame.chars().skip(2).collect::<String>())
        .collect()
}

/// Indents every line of the given `text` by `indent` spaces, painting the
/// lines with the given [`Color`].
#[must_use]
pub(crate) fn format_lines(
    styles: &Styles,
    color: Color,
    text: &str,
    indent: usize,
) -> String {
    text.lines()
        .map(|line| format!("{}{}", " ".repeat(indent), styles.paint(color, line)))
        .join("\n")
}

/// Writes the digest of all the `failed` [`Example`]s into the given
/// `output`.
///
/// Nothing is written if there are no failures.
///
/// [`Example`]: crate::tree::Example
///
/// # Errors
///
/// If the `output` fails to be written into.
pub fn write_failures<Out: io::Write + ?Sized>(
    output: &mut Out,
    styles: &Styles,
    failed: &[ExampleRef<'_>],
) -> io::Result<()> {
    if failed.is_empty() {
        return Ok(());
    }

    output.write_line("")?;
    output.write_line("Failures:")?;
    output.write_line("")?;

    for (n, example) in failed.iter().enumerate() {
        output.write_line(format!("{INDENT}{}) {}", n + 1, example.full_name()))?;

        let failure = example.outcome.failure();
        let message = failure.map(|f| f.message.as_str()).unwrap_or_default();
        output.write_line(format_lines(
            styles,
            Color::Red,
            &format!("Failure/Error: {message}"),
            5,
        ))?;
        output.write_line("")?;

        output.write_line(format!("{}Traceback:", " ".repeat(5)))?;
        let traceback = failure.map(format_traceback).unwrap_or_default();
        if !traceback.is_empty() {
            output.write_line(format_lines(styles, Color::Red, &traceback, 5))?;
        }
        output.write_line("")?;
    }

    Ok(())
}
