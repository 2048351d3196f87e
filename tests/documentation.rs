use std::{io, time::Duration};

use mamba_formatters::{
    cli::Settings,
    tree::{Outcome, ResultTree},
    writer::{out::WritableString, Documentation, Writer as _},
    Reporter, RunSummary, WriterError,
};

fn frames(test: &str) -> Vec<String> {
    vec![
        "  File \"mamba/example.py\", line 44, in _execute_test\n    self.test(context)\n".into(),
        format!("  File \"spec/calc_spec.py\", line 12, in {test}\n    expect(result).to(equal(4))\n"),
    ]
}

fn calculator_tree() -> ResultTree {
    let mut tree = ResultTree::new();

    let calc = tree.add_group(None, "Calculator");
    let adding = tree.add_group(Some(calc), "when_adding");
    _ = tree.add_example(
        Some(adding),
        "it_returns_the_sum",
        Duration::from_millis(3),
        Outcome::Passed,
    );
    _ = tree.add_example(
        Some(adding),
        "it_handles_negatives",
        Duration::from_millis(120),
        Outcome::failed("expected: 4 got: 0", frames("it_handles_negatives")),
    );
    tree.finish_group(adding, Duration::from_millis(123));
    _ = tree.add_example(Some(calc), "it_divides", Duration::ZERO, Outcome::Pending);
    tree.finish_group(calc, Duration::from_millis(123));

    let later = tree.add_pending_group(None, "Scientific");
    _ = tree.add_example(Some(later), "it_computes_sin", Duration::ZERO, Outcome::Pending);

    tree
}

fn render(tree: &ResultTree, settings: Settings) -> String {
    let writer = Documentation::new(WritableString::default(), settings);
    let mut reporter = Reporter::new(writer);
    _ = reporter.run(tree).unwrap();
    reporter.into_inner().into_inner().0
}

#[test]
fn renders_whole_run() {
    let output = render(&calculator_tree(), Settings::default());

    assert_eq!(
        output,
        "Calculator\n\
         \x20 when_adding\n\
         \x20   ✓ it returns the sum\n\
         \x20   ✗ it handles negatives (0.1200 seconds)\n\
         \x20     expected: 4 got: 0\n\
         \x20 ✗ it divides\n\
         \n\
         Scientific\n\
         \x20 ✗ it computes sin\n\
         1 examples failed of 4 ran in 0.1230 seconds\n\
         \n\
         Failures:\n\
         \n\
         \x20 1) Calculator when adding it handles negatives\n\
         \x20    Failure/Error: expected: 4 got: 0\n\
         \n\
         \x20    Traceback:\n\
         \x20    File \"spec/calc_spec.py\", line 12, in it_handles_negatives\n\
         \x20        expect(result).to(equal(4))\n\
         \n",
    );
}

#[test]
fn pending_summary_when_nothing_failed() {
    let mut tree = ResultTree::new();
    let group = tree.add_group(None, "group");
    _ = tree.add_example(Some(group), "a", Duration::ZERO, Outcome::Passed);
    _ = tree.add_example(Some(group), "b", Duration::ZERO, Outcome::Pending);
    tree.finish_group(group, Duration::from_millis(1));

    let output = render(&tree, Settings::default());

    assert!(output.ends_with("\n2 examples ran (1 pending) in 0.0010 seconds\n"));
    assert!(!output.contains("Failures:"));
}

#[test]
fn summary_branches_with_literal_counts() {
    let cases = [
        (RunSummary::new(Duration::from_secs(1), 5, 2, 0), "2 examples failed of 5 ran in 1.0000 seconds\n"),
        (RunSummary::new(Duration::from_secs(1), 5, 2, 3), "2 examples failed of 5 ran in 1.0000 seconds\n"),
        (RunSummary::new(Duration::from_secs(1), 5, 0, 3), "5 examples ran (3 pending) in 1.0000 seconds\n"),
        (RunSummary::new(Duration::from_secs(1), 5, 0, 0), "5 examples ran in 1.0000 seconds\n"),
    ];

    for (summary, expected) in cases {
        let mut writer = Documentation::new(WritableString::default(), Settings::default());
        writer.summary(&summary).unwrap();

        assert_eq!(writer.into_inner().0, expected, "{summary:?}");
    }
}

#[test]
fn failures_digest_keeps_input_order() {
    let mut tree = ResultTree::new();
    let group = tree.add_group(None, "Suite");
    let ids = ["A", "B", "C"].map(|name| {
        tree.add_example(
            Some(group),
            name,
            Duration::ZERO,
            Outcome::failed("no", Vec::<String>::new()),
        )
    });
    let failed = ids.map(|id| tree.example(id));
    let mut writer = Documentation::new(WritableString::default(), Settings::default());

    writer.failures(&failed).unwrap();

    let output = writer.into_inner().0;
    let positions = ["1) Suite A", "2) Suite B", "3) Suite C"]
        .map(|needle| output.find(needle).unwrap());
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn colors_only_on_terminal_without_no_color() {
    let tree = calculator_tree();

    let colored = render(&tree, Settings::default().terminal(true));
    let not_terminal = render(&tree, Settings::default().terminal(false));
    let no_color = render(&tree, Settings::default().terminal(true).no_color(true));

    assert!(colored.contains("\u{1b}[32m✓\u{1b}[0m it returns the sum"));
    assert!(colored.contains("\u{1b}[37mCalculator\u{1b}[0m"));
    assert!(colored.contains("\u{1b}[33mScientific\u{1b}[0m"));
    assert!(colored.contains("\u{1b}[33m (0.1200 seconds)\u{1b}[0m"));
    assert!(!not_terminal.contains('\u{1b}'));
    assert!(!no_color.contains('\u{1b}'));
    assert_eq!(console::strip_ansi_codes(&colored), not_terminal);
}

/// Sink failing after the given number of writes.
struct FailingSink {
    writes_left: usize,
}

impl io::Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.writes_left == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"));
        }
        self.writes_left -= 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_are_surfaced() {
    let writer = Documentation::new(FailingSink { writes_left: 3 }, Settings::default());

    let err = Reporter::new(writer).run(&calculator_tree()).unwrap_err();

    assert!(err.is_io_error());
    assert!(matches!(err, WriterError::Io(e) if e.kind() == io::ErrorKind::WriteZero));
}
