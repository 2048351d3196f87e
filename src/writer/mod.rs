// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting test run results.
//!
//! Every output format is a separate [`Writer`] implementation, interpreting
//! the same sequence of events on its own:
//!
//! - [`Documentation`]: verbose tree of groups and examples;
//! - [`Progress`]: a character per example;
//! - [`XUnit`]: [JUnit XML report][1].
//!
//! [1]: https://llg.cubic.org/docs/junit

pub mod common;
pub mod documentation;
pub mod out;
pub mod progress;
pub mod traits;
#[cfg(feature = "output-xunit")]
pub mod xunit;

use std::{fmt, io, str::FromStr};

use crate::cli::Settings;

#[cfg(feature = "output-xunit")]
#[doc(inline)]
pub use self::xunit::XUnit;
#[doc(inline)]
pub use self::{
    documentation::Documentation,
    progress::Progress,
    traits::{RunSummary, Writer},
};

/// Possible output formats of a test run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// [`Documentation`] [`Writer`].
    Documentation,

    /// [`Progress`] [`Writer`].
    Progress,

    /// [`XUnit`] [`Writer`].
    #[cfg(feature = "output-xunit")]
    XUnit,
}

impl Format {
    /// Creates a new [`Writer`] of this [`Format`] outputting to the given
    /// `output`.
    ///
    /// [`Settings`] affect console [`Writer`]s only.
    #[must_use]
    pub fn writer<'out, Out>(
        self,
        output: Out,
        settings: Settings,
    ) -> Box<dyn Writer + 'out>
    where
        Out: io::Write + 'out,
    {
        match self {
            Self::Documentation => Box::new(Documentation::new(output, settings)),
            Self::Progress => Box::new(Progress::new(output, settings)),
            #[cfg(feature = "output-xunit")]
            Self::XUnit => Box::new(XUnit::new(output)),
        }
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "documentation" => Ok(Self::Documentation),
            "progress" => Ok(Self::Progress),
            #[cfg(feature = "output-xunit")]
            "xunit" | "junit" => Ok(Self::XUnit),
            _ => Err("possible options: documentation, progress, xunit"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Documentation => "documentation",
            Self::Progress => "progress",
            #[cfg(feature = "output-xunit")]
            Self::XUnit => "xunit",
        })
    }
}
