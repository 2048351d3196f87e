// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io, str};

use console::Style;
use derive_more::{Deref, DerefMut, Display, From, Into};

use crate::cli::Settings;

/// Colors used in a terminal output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    /// Failures and very slow examples.
    Red,

    /// Passed examples and successful runs.
    Green,

    /// Pending examples and slow examples.
    Yellow,

    /// Example groups.
    White,
}

impl Color {
    fn style(self) -> Style {
        // Whether to style at all is decided by `Styles::is_present`, not by
        // `console`'s global detection.
        let style = Style::new().force_styling(true);
        match self {
            Self::Red => style.red(),
            Self::Green => style.green(),
            Self::Yellow => style.yellow(),
            Self::White => style.white(),
        }
    }
}

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering passed examples.
    pub ok: Style,

    /// [`Style`] for rendering pending examples.
    pub pending: Style,

    /// [`Style`] for rendering failures.
    pub err: Style,

    /// [`Style`] for rendering example groups.
    pub header: Style,

    /// Indicates whether output should be colored.
    pub is_present: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Styles {
    /// Creates new [`Styles`], applying colors only if `is_present`.
    #[must_use]
    pub fn new(is_present: bool) -> Self {
        Self {
            ok: Color::Green.style(),
            pending: Color::Yellow.style(),
            err: Color::Red.style(),
            header: Color::White.style(),
            is_present,
        }
    }

    /// Creates new [`Styles`] according to the given [`Settings`].
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.is_colored())
    }

    /// If colors are enabled, colors `input` with the given [`Color`], or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn paint<'a>(
        &self,
        color: Color,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        let style = match color {
            Color::Red => &self.err,
            Color::Green => &self.ok,
            Color::Yellow => &self.pending,
            Color::White => &self.header,
        };
        self.apply(style, input)
    }

    /// If colors are enabled, colors `input` with [`Styles::ok`] color, or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn ok<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.ok, input)
    }

    /// If colors are enabled, colors `input` with [`Styles::pending`] color,
    /// or leaves "as is" otherwise.
    #[must_use]
    pub fn pending<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.pending, input)
    }

    /// If colors are enabled, colors `input` with [`Styles::err`] color, or
    /// leaves "as is" otherwise.
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.err, input)
    }

    /// If colors are enabled, colors `input` with [`Styles::header`] color,
    /// or leaves "as is" otherwise.
    #[must_use]
    pub fn header<'a>(&self, input: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.apply(&self.header, input)
    }

    fn apply<'a>(
        &self,
        style: &Style,
        input: impl Into<Cow<'a, str>>,
    ) -> Cow<'a, str> {
        if self.is_present {
            style.apply_to(input.into()).to_string().into()
        } else {
            input.into()
        }
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref()).and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

/// [`String`] wrapper implementing [`io::Write`].
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    DerefMut,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct WritableString(pub String);

impl io::Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.push_str(
            str::from_utf8(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
