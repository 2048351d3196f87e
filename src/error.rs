// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of [`Writer`]s and their configuration.
//!
//! Failed examples are not errors: they are reported as data. The only
//! errors originating here are failures of the output sink itself and
//! invalid configuration values.
//!
//! [`Writer`]: crate::Writer

use std::io;

use derive_more::{Display, Error, From};

/// Errors of writing a rendered output into a sink.
///
/// Serializing the XML report can only fail on the sink too, so it's reported
/// as [`WriterError::Io`] as well.
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum WriterError {
    /// I/O error of the underlying sink.
    #[display("I/O error: {_0}")]
    Io(io::Error),
}

impl WriterError {
    /// Indicates whether this is an I/O error of the sink.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type alias for [`Writer`] operations.
///
/// [`Writer`]: crate::Writer
pub type WriterResult<T> = Result<T, WriterError>;

/// Errors of parsing [`Cli`] options.
///
/// [`Cli`]: crate::cli::Cli
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// Slow-test threshold is neither a number of seconds nor a
    /// human-readable duration.
    #[display("invalid slow test threshold `{value}`: {reason}")]
    InvalidThreshold {
        /// Rejected input.
        #[error(not(source))]
        value: String,

        /// Why the input was rejected.
        #[error(not(source))]
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidThreshold`].
    #[must_use]
    pub fn invalid_threshold(
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidThreshold { value: value.into(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_error_is_transparent_source() {
        let err = WriterError::from(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));

        assert!(err.is_io_error());
        assert_eq!(err.to_string(), "I/O error: pipe closed");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_threshold_displays_value_and_reason() {
        let err = ConfigError::invalid_threshold("fast", "not a duration");

        assert_eq!(
            err.to_string(),
            "invalid slow test threshold `fast`: not a duration",
        );
        assert!(err.source().is_none());
    }
}
