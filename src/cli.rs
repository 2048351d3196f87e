// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI options and configuration of [`Writer`]s.
//!
//! [`Cli`] is meant to be flattened into the CLI of a test runner:
//!
//! ```rust
//! use clap::Parser as _;
//! use mamba_formatters::{cli, writer::Format};
//!
//! #[derive(clap::Parser)]
//! struct Opts {
//!     #[command(flatten)]
//!     formatter: cli::Cli,
//! }
//!
//! let opts = Opts::parse_from(["runner", "--format", "progress", "--slow", "200ms"]);
//! let settings = opts.formatter.settings(false);
//!
//! assert_eq!(opts.formatter.format, Format::Progress);
//! assert_eq!(settings.slow_test_threshold.as_millis(), 200);
//! assert!(!settings.is_colored());
//! ```
//!
//! [`Writer`]: crate::Writer

use std::time::Duration;

use smart_default::SmartDefault;

use crate::{error::ConfigError, writer::Format};

/// Default [`Settings::slow_test_threshold`].
pub const DEFAULT_SLOW_TEST_THRESHOLD: Duration = Duration::from_millis(75);

/// CLI options of console [`Writer`]s.
///
/// [`Writer`]: crate::Writer
#[derive(Clone, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Output format of the test run.
    #[arg(
        long,
        value_name = "documentation|progress|xunit",
        default_value = "documentation",
        global = true
    )]
    #[default(Format::Documentation)]
    pub format: Format,

    /// Disables colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Threshold above which an example is reported as slow.
    ///
    /// Either seconds (`0.075`) or a human-readable duration (`75ms`).
    #[arg(
        long = "slow",
        value_name = "threshold",
        default_value = "75ms",
        value_parser = parse_threshold,
        global = true
    )]
    #[default(DEFAULT_SLOW_TEST_THRESHOLD)]
    pub slow_test_threshold: Duration,
}

impl Cli {
    /// Converts these [`Cli`] options into [`Settings`] for an output, which
    /// is an interactive terminal if `is_terminal`.
    #[must_use]
    pub const fn settings(&self, is_terminal: bool) -> Settings {
        Settings {
            no_color: self.no_color,
            slow_test_threshold: self.slow_test_threshold,
            is_terminal,
        }
    }
}

/// Configuration of console [`Writer`]s.
///
/// [`Writer`]: crate::Writer
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Settings {
    /// Suppresses all colors when `true`.
    pub no_color: bool,

    /// Duration above which an example's elapsed time is shown.
    #[default(DEFAULT_SLOW_TEST_THRESHOLD)]
    pub slow_test_threshold: Duration,

    /// Indicates whether the output is an interactive terminal.
    pub is_terminal: bool,
}

impl Settings {
    /// Creates new [`Settings`] for [`io::Stdout`], detecting whether it's an
    /// interactive terminal.
    ///
    /// [`io::Stdout`]: std::io::Stdout
    #[must_use]
    pub fn for_stdout() -> Self {
        Self { is_terminal: console::Term::stdout().is_term(), ..Self::default() }
    }

    /// Sets [`Settings::no_color`].
    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Sets [`Settings::slow_test_threshold`].
    #[must_use]
    pub const fn slow_test_threshold(mut self, threshold: Duration) -> Self {
        self.slow_test_threshold = threshold;
        self
    }

    /// Sets [`Settings::is_terminal`].
    #[must_use]
    pub const fn terminal(mut self, is_terminal: bool) -> Self {
        self.is_terminal = is_terminal;
        self
    }

    /// Indicates whether output should be colored.
    ///
    /// Either [`Settings::no_color`] or a non-terminal output disables
    /// colors.
    #[must_use]
    pub const fn is_colored(&self) -> bool {
        !self.no_color && self.is_terminal
    }
}

/// Parses a slow-test threshold from either seconds or a [`humantime`]
/// duration.
///
/// # Errors
///
/// If `value` is neither, or is a negative number of seconds.
pub fn parse_threshold(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(secs) => Duration::try_from_secs_f64(secs)
            .map_err(|e| ConfigError::invalid_threshold(value, e)),
        Err(_) => humantime::parse_duration(value)
            .map_err(|e| ConfigError::invalid_threshold(value, e)),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Opts {
        #[command(flatten)]
        cli: Cli,
    }

    #[test]
    fn defaults_match_clap_defaults() {
        let parsed = Opts::parse_from(["runner"]).cli;
        let default = Cli::default();

        assert_eq!(parsed.format, default.format);
        assert_eq!(parsed.no_color, default.no_color);
        assert_eq!(parsed.slow_test_threshold, default.slow_test_threshold);
        assert_eq!(default.slow_test_threshold, Duration::from_millis(75));
    }

    #[cfg(feature = "output-xunit")]
    #[test]
    fn parses_all_options() {
        let cli = Opts::parse_from([
            "runner",
            "--format",
            "XUnit",
            "--no-color",
            "--slow",
            "1.5",
        ])
        .cli;

        assert_eq!(cli.format, Format::XUnit);
        assert!(cli.no_color);
        assert_eq!(cli.slow_test_threshold, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_unknown_format() {
        let res = Opts::try_parse_from(["runner", "--format", "tap"]);

        assert!(res.is_err());
    }

    #[test]
    fn threshold_accepts_seconds_and_humantime() {
        assert_eq!(parse_threshold("0.1").unwrap(), Duration::from_millis(100));
        assert_eq!(parse_threshold(" 2 ").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_threshold("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_threshold("1s 500ms").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn threshold_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_threshold("fast"),
            Err(ConfigError::InvalidThreshold { value, .. }) if value == "fast",
        ));
        assert!(parse_threshold("-1").is_err());
    }

    #[test]
    fn either_condition_suppresses_colors() {
        let settings = Settings::default();

        assert!(settings.terminal(true).is_colored());
        assert!(!settings.terminal(false).is_colored());
        assert!(!settings.terminal(true).no_color(true).is_colored());
        assert!(!settings.terminal(false).no_color(true).is_colored());
    }

    #[test]
    fn cli_converts_into_settings() {
        let cli = Cli { no_color: true, ..Cli::default() };

        let settings = cli.settings(true);

        assert!(settings.no_color);
        assert!(settings.is_terminal);
        assert_eq!(settings.slow_test_threshold, DEFAULT_SLOW_TEST_THRESHOLD);
    }
}
